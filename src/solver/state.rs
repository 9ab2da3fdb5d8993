//! Mutable optimization state shared by the SMO steps

use crate::solver::smo::ALPHA_EPSILON;

/// Lagrange multipliers, bias and error cache of one training run
///
/// `error_cache[i]` always holds `f(x_i) - y_i` for the current multipliers
/// and bias. It is only ever adjusted incrementally by the pairwise
/// optimizer, never recomputed from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    pub(crate) alpha: Vec<f64>,
    pub(crate) b: f64,
    pub(crate) error_cache: Vec<f64>,
}

impl ModelState {
    /// Fresh state: all multipliers zero, zero bias.
    ///
    /// The decision function is identically zero, so every error is `-y_i`.
    pub fn new(labels: &[f64]) -> Self {
        Self {
            alpha: vec![0.0; labels.len()],
            b: 0.0,
            error_cache: labels.iter().map(|&y| -y).collect(),
        }
    }

    /// Lagrange multipliers, one per sample
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Bias `b` of `f(x) = sum_j alpha_j y_j K(x_j, x) - b`
    pub fn bias(&self) -> f64 {
        self.b
    }

    /// Cached errors `f(x_i) - y_i`
    pub fn error_cache(&self) -> &[f64] {
        &self.error_cache
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// Whether alpha\[i\] lies strictly inside (0, C)
    pub fn is_non_bound(&self, i: usize, c: f64) -> bool {
        self.alpha[i] > 0.0 && self.alpha[i] < c
    }

    pub fn count_non_bound(&self, c: f64) -> usize {
        (0..self.len()).filter(|&i| self.is_non_bound(i, c)).count()
    }

    /// Indices whose multiplier is non-zero beyond rounding noise
    ///
    /// The partner multiplier of a clipped update can pick up residues of
    /// order 1e-17 instead of an exact zero, so anything below
    /// [`ALPHA_EPSILON`] is not reported.
    pub fn support_vector_indices(&self) -> Vec<usize> {
        self.alpha
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a > ALPHA_EPSILON { Some(i) } else { None })
            .collect()
    }

    /// `sum_i alpha_i y_i`, which every update keeps at its initial value of zero
    pub fn label_weighted_sum(&self, labels: &[f64]) -> f64 {
        self.alpha.iter().zip(labels).map(|(a, y)| a * y).sum()
    }
}
