//! Training front end for SVM models
//!
//! This module ties a kernel, an [`OptimizerConfig`] and a training set to the
//! SMO solver and wraps the converged state into a model that can predict.

use crate::core::{
    ConvergenceStatus, Dataset, LinearModel, OptimizerConfig, Result, SVMModel, SolveOutcome,
    TrainingSet,
};
use crate::kernel::{Kernel, LinearKernel};
use crate::solver::{ModelState, SMOSolver};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// High-level SVM optimizer that integrates kernel functions and the SMO solver
pub struct SVMOptimizer<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K: Kernel> SVMOptimizer<K> {
    /// Create a new optimizer, rejecting unusable parameters up front
    pub fn new(kernel: K, config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kernel: Arc::new(kernel),
            config,
        })
    }

    /// Create a new optimizer with the default configuration
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config: OptimizerConfig::default(),
        }
    }

    /// Train on a training set
    ///
    /// Scan offsets come from a [`SmallRng`] seeded with `config.seed`, or
    /// from entropy when no seed is set.
    pub fn train(&self, data: TrainingSet) -> TrainedSVM<K> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.train_with_rng(data, &mut rng)
    }

    /// Train on a training set drawing scan offsets from `rng`
    pub fn train_with_rng<R: Rng + ?Sized>(&self, data: TrainingSet, rng: &mut R) -> TrainedSVM<K> {
        let solver = SMOSolver::new(self.kernel.as_ref(), &data, &self.config);
        let mut state = solver.initial_state();
        let outcome = solver.solve(&mut state, rng);
        let objective = solver.objective(state.alpha());

        TrainedSVM {
            kernel: Arc::clone(&self.kernel),
            config: self.config.clone(),
            data,
            state,
            outcome,
            objective,
        }
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

/// A trained SVM model that can make predictions
///
/// Keeps the whole training set and the final optimization state; the state
/// is never modified after training.
pub struct TrainedSVM<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
    data: TrainingSet,
    state: ModelState,
    outcome: SolveOutcome,
    objective: f64,
}

impl<K: Kernel> TrainedSVM<K> {
    /// Decision value of training sample `i`, recomputed from the multipliers
    pub fn decision_value(&self, i: usize) -> f64 {
        SMOSolver::new(self.kernel.as_ref(), &self.data, &self.config)
            .decision_function(&self.state, i)
    }

    /// Final optimization state
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Lagrange multipliers of all training samples
    pub fn alpha(&self) -> &[f64] {
        self.state.alpha()
    }

    /// Indices of the support vectors in the training set
    pub fn support_vector_indices(&self) -> Vec<usize> {
        self.state.support_vector_indices()
    }

    pub fn n_support_vectors(&self) -> usize {
        self.state.support_vector_indices().len()
    }

    pub fn status(&self) -> ConvergenceStatus {
        self.outcome.status
    }

    pub fn outcome(&self) -> &SolveOutcome {
        &self.outcome
    }

    /// Dual objective at the final multipliers
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn training_set(&self) -> &TrainingSet {
        &self.data
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl TrainedSVM<LinearKernel> {
    /// Project the multipliers onto the primal weight vector
    /// `w = sum_i alpha_i y_i x_i`
    pub fn linear_params(&self) -> LinearModel {
        let mut weights = vec![0.0; self.data.dim()];
        for i in 0..self.data.len() {
            let coef = self.state.alpha()[i] * self.data.label(i);
            for (w, x) in weights.iter_mut().zip(self.data.features(i)) {
                *w += coef * x;
            }
        }
        LinearModel::new(weights, self.state.bias())
    }
}

impl<K: Kernel> SVMModel for TrainedSVM<K> {
    fn decision_function(&self, features: &[f64]) -> f64 {
        let alpha = self.state.alpha();
        (0..self.data.len())
            .filter(|&j| alpha[j] != 0.0)
            .map(|j| {
                alpha[j] * self.data.label(j) * self.kernel.compute(self.data.features(j), features)
            })
            .sum::<f64>()
            - self.state.bias()
    }

    fn bias(&self) -> f64 {
        self.state.bias()
    }
}
