//! Sequential Minimal Optimization (SMO) solver implementation
//!
//! Solves the soft-margin SVM dual by repeatedly optimizing two Lagrange
//! multipliers analytically, following Platt's outer loop: full sweeps over
//! every sample alternate with sweeps over the non-bound multipliers until
//! no KKT violation larger than the tolerance can be repaired.

use crate::core::{ConvergenceStatus, Dataset, OptimizerConfig, SolveOutcome, TrainingSet};
use crate::kernel::Kernel;
use crate::solver::scan::CircularScan;
use crate::solver::state::ModelState;
use log::{debug, info, warn};
use rand::Rng;

/// Slack used for bound snapping, step acceptance and objective ties
pub const ALPHA_EPSILON: f64 = 1e-8;

/// SMO solver for the SVM dual problem
///
/// The solver itself is immutable; all optimization progress lives in the
/// [`ModelState`] passed to each operation.
pub struct SMOSolver<'a, K: Kernel> {
    kernel: &'a K,
    data: &'a TrainingSet,
    config: &'a OptimizerConfig,
}

impl<'a, K: Kernel> SMOSolver<'a, K> {
    /// Create a solver over a validated training set
    pub fn new(kernel: &'a K, data: &'a TrainingSet, config: &'a OptimizerConfig) -> Self {
        Self {
            kernel,
            data,
            config,
        }
    }

    /// Zero multipliers, zero bias, errors `-y_i`
    pub fn initial_state(&self) -> ModelState {
        ModelState::new(&self.data.labels())
    }

    /// Run the outer loop until convergence or until the pass budget runs out
    pub fn solve<R: Rng + ?Sized>(&self, state: &mut ModelState, rng: &mut R) -> SolveOutcome {
        let m = self.data.len();
        let c = self.config.c;

        let mut num_changed = 0;
        let mut examine_all = true;
        let mut passes = 0;
        let mut updates = 0;

        while num_changed > 0 || examine_all {
            if passes == self.config.max_passes {
                warn!(
                    "SMO stopped after {passes} passes without converging ({updates} updates)"
                );
                return SolveOutcome {
                    status: ConvergenceStatus::MaxPassesReached,
                    passes,
                    updates,
                };
            }

            num_changed = 0;
            if examine_all {
                for i in 0..m {
                    if self.examine_example(state, i, rng) {
                        num_changed += 1;
                    }
                }
            } else {
                for i in 0..m {
                    if state.is_non_bound(i, c) && self.examine_example(state, i, rng) {
                        num_changed += 1;
                    }
                }
            }

            passes += 1;
            updates += num_changed;
            debug!(
                "pass {passes} over {} samples: {num_changed} changed, {} non-bound",
                if examine_all { "all" } else { "non-bound" },
                state.count_non_bound(c)
            );

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }
        }

        info!(
            "SMO converged after {passes} passes ({updates} updates, {} support vectors)",
            state.support_vector_indices().len()
        );

        SolveOutcome {
            status: ConvergenceStatus::Converged,
            passes,
            updates,
        }
    }

    /// Check sample `i2` against the KKT conditions and, if it violates them,
    /// look for a partner that lets the pair make progress.
    ///
    /// Returns whether an update was committed.
    pub fn examine_example<R: Rng + ?Sized>(
        &self,
        state: &mut ModelState,
        i2: usize,
        rng: &mut R,
    ) -> bool {
        let c = self.config.c;
        let tol = self.config.tolerance;

        let y2 = self.data.label(i2);
        let alpha2 = state.alpha[i2];
        let r2 = state.error_cache[i2] * y2;

        let violates_kkt = (r2 < -tol && alpha2 < c) || (r2 > tol && alpha2 > 0.0);
        if !violates_kkt {
            return false;
        }

        if state.count_non_bound(c) > 1 {
            let i1 = second_choice(&state.error_cache, i2);
            if self.take_step(state, i1, i2) {
                return true;
            }
        }

        let m = self.data.len();

        // The bound status is re-read at every candidate: a failed attempt
        // leaves the state untouched, a successful one ends the search.
        for i1 in CircularScan::random(m, rng) {
            if state.is_non_bound(i1, c) && self.take_step(state, i1, i2) {
                return true;
            }
        }

        for i1 in CircularScan::random(m, rng) {
            if self.take_step(state, i1, i2) {
                return true;
            }
        }

        false
    }

    /// Jointly optimize the multipliers of samples `i1` and `i2`
    ///
    /// Commits the new multipliers, bias and error cache and returns `true`
    /// only when the pair moves by a non-negligible amount; otherwise the
    /// state is left exactly as it was.
    pub fn take_step(&self, state: &mut ModelState, i1: usize, i2: usize) -> bool {
        if i1 == i2 {
            return false;
        }

        let c = self.config.c;

        let y1 = self.data.label(i1);
        let y2 = self.data.label(i2);
        let alpha1 = state.alpha[i1];
        let alpha2 = state.alpha[i2];
        let e1 = state.error_cache[i1];
        let e2 = state.error_cache[i2];

        let s = y1 * y2;

        // Feasible segment for alpha2 along the equality constraint
        let (low, high) = if s == 1.0 {
            ((alpha1 + alpha2 - c).max(0.0), c.min(alpha1 + alpha2))
        } else {
            ((alpha2 - alpha1).max(0.0), c.min(c + alpha2 - alpha1))
        };

        if low >= high {
            return false;
        }

        let k11 = self.kernel_at(i1, i1);
        let k12 = self.kernel_at(i1, i2);
        let k22 = self.kernel_at(i2, i2);

        let eta = 2.0 * k12 - k11 - k22;

        let mut a2 = if eta < 0.0 {
            (alpha2 - y2 * (e1 - e2) / eta).clamp(low, high)
        } else {
            // Objective is linear or convex along the segment: the maximum
            // sits at one of its ends.
            let (low_obj, high_obj) = self.endpoint_objectives(state, i1, i2, low, high);
            if low_obj > high_obj + ALPHA_EPSILON {
                low
            } else if low_obj < high_obj - ALPHA_EPSILON {
                high
            } else {
                return false;
            }
        };

        if a2 < ALPHA_EPSILON {
            a2 = 0.0;
        } else if a2 > c - ALPHA_EPSILON {
            a2 = c;
        }

        if (a2 - alpha2).abs() < ALPHA_EPSILON * (a2 + alpha2 + ALPHA_EPSILON) {
            return false;
        }

        let a1 = alpha1 + s * (alpha2 - a2);

        let old_b = state.b;
        state.b = self.updated_bias(state, i1, i2, a1, a2, k11, k12, k22);
        self.update_error_cache(state, i1, i2, a1 - alpha1, a2 - alpha2, old_b);

        state.alpha[i1] = a1;
        state.alpha[i2] = a2;

        true
    }

    /// Kernel value between training samples `i` and `j`
    pub fn kernel_at(&self, i: usize, j: usize) -> f64 {
        self.kernel
            .compute(self.data.features(i), self.data.features(j))
    }

    /// `f(x_i) = sum_j alpha_j y_j K(x_j, x_i) - b`, computed from scratch
    pub fn decision_function(&self, state: &ModelState, i: usize) -> f64 {
        (0..self.data.len())
            .filter(|&j| state.alpha[j] != 0.0)
            .map(|j| state.alpha[j] * self.data.label(j) * self.kernel_at(j, i))
            .sum::<f64>()
            - state.b
    }

    /// Dual objective `sum_i a_i - 1/2 sum_i sum_j y_i y_j K(i, j) a_i a_j`
    pub fn objective(&self, alpha: &[f64]) -> f64 {
        let m = self.data.len();
        let linear: f64 = alpha.iter().sum();

        let mut quadratic = 0.0;
        for i in 0..m {
            if alpha[i] == 0.0 {
                continue;
            }
            for j in 0..m {
                if alpha[j] == 0.0 {
                    continue;
                }
                quadratic += self.data.label(i)
                    * self.data.label(j)
                    * self.kernel_at(i, j)
                    * alpha[i]
                    * alpha[j];
            }
        }

        linear - quadratic / 2.0
    }

    /// Dual objective with alpha2 moved to each end of the segment and
    /// alpha1 moved along with it to keep `sum_i alpha_i y_i` fixed
    fn endpoint_objectives(
        &self,
        state: &ModelState,
        i1: usize,
        i2: usize,
        low: f64,
        high: f64,
    ) -> (f64, f64) {
        let s = self.data.label(i1) * self.data.label(i2);
        let alpha1 = state.alpha[i1];
        let alpha2 = state.alpha[i2];

        let mut trial = state.alpha.clone();

        trial[i1] = alpha1 + s * (alpha2 - low);
        trial[i2] = low;
        let low_obj = self.objective(&trial);

        trial[i1] = alpha1 + s * (alpha2 - high);
        trial[i2] = high;
        let high_obj = self.objective(&trial);

        (low_obj, high_obj)
    }

    /// New bias after moving the pair to `(a1, a2)`
    ///
    /// Each candidate zeroes the error of one sample of the pair; it is only
    /// trustworthy when that sample's multiplier ends up strictly inside
    /// (0, C). With neither inside, any value between the two satisfies KKT
    /// for the pair and the midpoint is used.
    #[allow(clippy::too_many_arguments)]
    fn updated_bias(
        &self,
        state: &ModelState,
        i1: usize,
        i2: usize,
        a1: f64,
        a2: f64,
        k11: f64,
        k12: f64,
        k22: f64,
    ) -> f64 {
        let c = self.config.c;
        let y1 = self.data.label(i1);
        let y2 = self.data.label(i2);
        let delta1 = y1 * (a1 - state.alpha[i1]);
        let delta2 = y2 * (a2 - state.alpha[i2]);

        let b1 = state.error_cache[i1] + delta1 * k11 + delta2 * k12 + state.b;
        let b2 = state.error_cache[i2] + delta1 * k12 + delta2 * k22 + state.b;

        if a1 > 0.0 && a1 < c {
            b1
        } else if a2 > 0.0 && a2 < c {
            b2
        } else {
            (b1 + b2) / 2.0
        }
    }

    /// Shift every cached error by the effect of the pair update; `state.b`
    /// must already hold the new bias.
    fn update_error_cache(
        &self,
        state: &mut ModelState,
        i1: usize,
        i2: usize,
        delta_alpha1: f64,
        delta_alpha2: f64,
        old_b: f64,
    ) {
        let t1 = self.data.label(i1) * delta_alpha1;
        let t2 = self.data.label(i2) * delta_alpha2;
        let bias_shift = old_b - state.b;

        for (i, error) in state.error_cache.iter_mut().enumerate() {
            *error += t1 * self.kernel_at(i1, i) + t2 * self.kernel_at(i2, i) + bias_shift;
        }
    }
}

/// Second-choice heuristic: the index whose cached error is farthest from
/// `error_cache[i2]`.
///
/// For a non-negative `E2` this is the smallest error, otherwise the largest.
/// Ties keep the earliest index. Bound status is not considered.
pub fn second_choice(error_cache: &[f64], i2: usize) -> usize {
    let mut i1 = 0;
    if error_cache[i2] >= 0.0 {
        for i in 1..error_cache.len() {
            if error_cache[i] < error_cache[i1] {
                i1 = i;
            }
        }
    } else {
        for i in 1..error_cache.len() {
            if error_cache[i] > error_cache[i1] {
                i1 = i;
            }
        }
    }
    i1
}
