//! High-level API for SMO training
//!
//! This module provides a builder for training, plus prediction and
//! evaluation helpers on the resulting model.
//!
//! # Quick Start
//!
//! ```rust
//! use rsmo::api::SVM;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = SVM::new()
//!     .with_c(1.0)
//!     .with_tolerance(0.01)
//!     .with_seed(42)
//!     .train_rows(
//!         vec![vec![2.0, 2.0], vec![2.0, 3.0], vec![0.0, -1.0], vec![-1.0, 0.0]],
//!         vec![1.0, 1.0, -1.0, -1.0],
//!     )?;
//!
//! let params = model.linear_params();
//! println!("w = {:?}, b = {}", params.weights, params.bias);
//! assert_eq!(model.predict(&[3.0, 3.0]).label, 1.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{
    ConvergenceStatus, Dataset, LinearModel, OptimizerConfig, Prediction, Result, SVMModel,
    TrainingSet,
};
use crate::data;
use crate::kernel::{Kernel, LinearKernel};
use crate::optimizer::{SVMOptimizer, TrainedSVM};
use std::path::Path;

/// High-level SVM interface with builder pattern
pub struct SVM<K: Kernel = LinearKernel> {
    kernel: K,
    config: OptimizerConfig,
}

impl SVM<LinearKernel> {
    /// Create a new SVM with linear kernel and default parameters
    pub fn new() -> Self {
        Self {
            kernel: LinearKernel::new(),
            config: OptimizerConfig::default(),
        }
    }
}

impl Default for SVM<LinearKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kernel> SVM<K> {
    /// Create SVM with custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: OptimizerConfig::default(),
        }
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set KKT tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set maximum number of outer-loop passes
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.config.max_passes = max_passes;
        self
    }

    /// Make the random scan offsets reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Train on a validated training set
    pub fn train(self, data: TrainingSet) -> Result<TrainedModel<K>> {
        let optimizer = SVMOptimizer::new(self.kernel, self.config)?;
        Ok(TrainedModel {
            model: optimizer.train(data),
        })
    }

    /// Train on feature rows and labels in matching order
    pub fn train_rows(self, features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<TrainedModel<K>> {
        self.config.validate()?;
        let data = TrainingSet::new(features, labels)?;
        self.train(data)
    }

    /// Train from a feature matrix file and a label file
    pub fn train_from_files<P1: AsRef<Path>, P2: AsRef<Path>>(
        self,
        matrix_path: P1,
        labels_path: P2,
    ) -> Result<TrainedModel<K>> {
        self.config.validate()?;
        let data = data::load_training_set(matrix_path, labels_path)?;
        self.train(data)
    }
}

/// Trained SVM model with high-level prediction interface
pub struct TrainedModel<K: Kernel> {
    model: TrainedSVM<K>,
}

impl<K: Kernel> TrainedModel<K> {
    /// Predict a single sample
    pub fn predict(&self, features: &[f64]) -> Prediction {
        self.model.predict(features)
    }

    /// Predict multiple samples
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Vec<Prediction> {
        rows.iter().map(|row| self.model.predict(row)).collect()
    }

    /// Predict every sample of a dataset
    pub fn predict_dataset<D: Dataset>(&self, dataset: &D) -> Vec<Prediction> {
        self.model.predict_dataset(dataset)
    }

    /// Evaluate accuracy on a dataset
    pub fn evaluate<D: Dataset>(&self, dataset: &D) -> f64 {
        self.evaluate_detailed(dataset).accuracy()
    }

    /// Get detailed evaluation metrics
    pub fn evaluate_detailed<D: Dataset>(&self, dataset: &D) -> EvaluationMetrics {
        let predictions = self.predict_dataset(dataset);
        EvaluationMetrics::from_predictions(&predictions, &dataset.labels())
    }

    /// Whether the optimizer reached its convergence criterion
    pub fn is_converged(&self) -> bool {
        self.model.status().is_converged()
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        let outcome = self.model.outcome();
        ModelInfo {
            n_support_vectors: self.model.n_support_vectors(),
            bias: self.model.bias(),
            support_vector_indices: self.model.support_vector_indices(),
            status: outcome.status,
            passes: outcome.passes,
            updates: outcome.updates,
            objective: self.model.objective(),
        }
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &TrainedSVM<K> {
        &self.model
    }
}

impl TrainedModel<LinearKernel> {
    /// Primal weight vector and bias
    pub fn linear_params(&self) -> LinearModel {
        self.model.linear_params()
    }
}

/// Detailed evaluation metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Confusion counts of predictions against true labels, pairwise in order
    pub fn from_predictions(predictions: &[Prediction], labels: &[f64]) -> Self {
        let mut tp = 0;
        let mut tn = 0;
        let mut fp = 0;
        let mut fn_ = 0;

        for (pred, &actual) in predictions.iter().zip(labels.iter()) {
            match (pred.label > 0.0, actual > 0.0) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
            }
        }

        Self::new(tp, tn, fp, fn_)
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.true_positives + self.true_negatives) as f64 / total as f64
        }
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub n_support_vectors: usize,
    pub bias: f64,
    pub support_vector_indices: Vec<usize>,
    pub status: ConvergenceStatus,
    pub passes: usize,
    pub updates: usize,
    pub objective: f64,
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train a linear SVM and return its weight vector and bias
    pub fn fit_linear(features: Vec<Vec<f64>>, labels: Vec<f64>, c: f64) -> Result<LinearModel> {
        let model = SVM::new().with_c(c).train_rows(features, labels)?;
        Ok(model.linear_params())
    }

    /// Train a linear SVM from a matrix file and a label file
    pub fn train_files<P1: AsRef<Path>, P2: AsRef<Path>>(
        matrix_path: P1,
        labels_path: P2,
        c: f64,
    ) -> Result<TrainedModel<LinearKernel>> {
        SVM::new().with_c(c).train_from_files(matrix_path, labels_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SVMError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_svm_builder_pattern() {
        let svm = SVM::new()
            .with_c(2.0)
            .with_tolerance(0.001)
            .with_max_passes(5000)
            .with_seed(9);

        assert_eq!(svm.config().c, 2.0);
        assert_eq!(svm.config().tolerance, 0.001);
        assert_eq!(svm.config().max_passes, 5000);
        assert_eq!(svm.config().seed, Some(9));
    }

    #[test]
    fn test_train_rows() {
        let model = SVM::new()
            .with_seed(5)
            .train_rows(
                vec![vec![2.0], vec![-2.0], vec![1.5], vec![-1.5]],
                vec![1.0, -1.0, 1.0, -1.0],
            )
            .expect("Training should succeed");

        assert!(model.is_converged());
        assert_eq!(model.predict(&[1.0]).label, 1.0);
        assert_eq!(model.predict(&[-1.0]).label, -1.0);

        let info = model.info();
        assert!(info.n_support_vectors > 0);
        assert!(info.passes >= 2);
        assert!(info.objective > 0.0);
    }

    #[test]
    fn test_invalid_c_fails_before_training() {
        let result = SVM::new()
            .with_c(0.0)
            .train_rows(vec![vec![1.0], vec![-1.0]], vec![1.0, -1.0]);
        assert!(matches!(result, Err(SVMError::InvalidParameter(_))));
    }

    #[test]
    fn test_evaluation_metrics() {
        let metrics = EvaluationMetrics::new(10, 5, 2, 3);

        assert_eq!(metrics.total(), 20);
        assert_eq!(metrics.accuracy(), 0.75); // (10+5)/(10+5+2+3)
        assert_eq!(metrics.precision(), 10.0 / 12.0); // 10/(10+2)
        assert_eq!(metrics.recall(), 10.0 / 13.0); // 10/(10+3)
        assert!(metrics.f1_score() > 0.0);
        assert_eq!(metrics.specificity(), 5.0 / 7.0); // 5/(5+2)
    }

    #[test]
    fn test_metrics_from_predictions() {
        let predictions = [
            Prediction::from_decision_value(1.2),
            Prediction::from_decision_value(-0.3),
            Prediction::from_decision_value(0.4),
            Prediction::from_decision_value(-2.0),
        ];
        let metrics = EvaluationMetrics::from_predictions(&predictions, &[1.0, 1.0, -1.0, -1.0]);

        assert_eq!(metrics, EvaluationMetrics::new(1, 1, 1, 1));
        assert_eq!(metrics.accuracy(), 0.5);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = EvaluationMetrics::from_predictions(&[], &[]);
        assert_eq!(metrics.accuracy(), 0.0);
        assert_eq!(metrics.precision(), 0.0);
        assert_eq!(metrics.f1_score(), 0.0);
    }

    #[test]
    fn test_file_operations() {
        let mut matrix = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(matrix, "2.0 1.0\n-2.0 -1.0\n1.5 0.8\n-1.5 -0.8").expect("Failed to write");
        matrix.flush().expect("Failed to flush");

        let mut labels = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(labels, "1\n-1\n1\n-1").expect("Failed to write");
        labels.flush().expect("Failed to flush");

        let model =
            quick::train_files(matrix.path(), labels.path(), 1.0).expect("Training should succeed");
        let data = data::load_training_set(matrix.path(), labels.path()).expect("valid files");

        assert_eq!(model.evaluate(&data), 1.0);
        assert_eq!(model.evaluate_detailed(&data).total(), 4);
    }

    #[test]
    fn test_fit_linear() {
        let params = quick::fit_linear(
            vec![vec![2.0, 2.0], vec![2.0, 3.0], vec![0.0, -1.0], vec![-1.0, 0.0]],
            vec![1.0, 1.0, -1.0, -1.0],
            1.0,
        )
        .expect("Training should succeed");

        assert_eq!(params.dim(), 2);
        assert!(params.decision_function(&[2.0, 2.0]) > 0.0);
        assert!(params.decision_function(&[-1.0, 0.0]) < 0.0);
    }
}
