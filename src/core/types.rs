//! Core type definitions for SMO training

use crate::core::{Dataset, Result, SVMError, SVMModel};
use serde::{Deserialize, Serialize};

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Label a decision value; zero is assigned to the positive class
    pub fn from_decision_value(decision_value: f64) -> Self {
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Self::new(label, decision_value)
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Training sample with a dense feature vector and a label
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Feature vector
    pub features: Vec<f64>,
    /// Class label (+1 or -1)
    pub label: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label }
    }
}

/// A validated training set
///
/// Holds at least two samples, every one with the same non-zero number of
/// finite features and a label of exactly -1 or +1.
#[derive(Clone, Debug)]
pub struct TrainingSet {
    samples: Vec<Sample>,
    dim: usize,
}

impl TrainingSet {
    /// Build a training set from feature rows and labels, in matching order
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let samples = features
            .into_iter()
            .zip(labels)
            .map(|(features, label)| Sample::new(features, label))
            .collect();
        Self::from_samples(samples)
    }

    /// Build a training set from samples
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(SVMError::InsufficientSamples(samples.len()));
        }

        let dim = samples[0].features.len();
        if dim == 0 {
            return Err(SVMError::InvalidDataset(
                "samples must have at least one feature".to_string(),
            ));
        }

        for (index, sample) in samples.iter().enumerate() {
            if sample.features.len() != dim {
                return Err(SVMError::DimensionMismatch {
                    index,
                    expected: dim,
                    actual: sample.features.len(),
                });
            }
            if let Some(value) = sample.features.iter().find(|v| !v.is_finite()) {
                return Err(SVMError::InvalidDataset(format!(
                    "sample {index} has a non-finite feature value {value}"
                )));
            }
            if sample.label != 1.0 && sample.label != -1.0 {
                return Err(SVMError::InvalidLabel {
                    index,
                    value: sample.label,
                });
            }
        }

        Ok(Self { samples, dim })
    }

    /// The samples, in training order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl Dataset for TrainingSet {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn features(&self, i: usize) -> &[f64] {
        &self.samples[i].features
    }

    fn label(&self, i: usize) -> f64 {
        self.samples[i].label
    }
}

/// Configuration for the optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT conditions
    pub tolerance: f64,
    /// Maximum number of outer-loop passes before giving up
    pub max_passes: usize,
    /// Seed for the random scan offsets; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 0.01,
            max_passes: 10_000,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Check that the parameters describe a solvable problem
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "C must be positive and finite, got: {}",
                self.c
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "tolerance must be non-negative and finite, got: {}",
                self.tolerance
            )));
        }
        if self.max_passes == 0 {
            return Err(SVMError::InvalidParameter(
                "max_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the outer loop terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceStatus {
    /// A full pass followed by a non-bound pass changed nothing
    Converged,
    /// The pass budget ran out first
    MaxPassesReached,
}

impl ConvergenceStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Summary of one optimization run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOutcome {
    pub status: ConvergenceStatus,
    /// Outer-loop passes performed
    pub passes: usize,
    /// Accepted pairwise updates
    pub updates: usize,
}

/// Primal form of a linear-kernel classifier: `f(x) = w·x - b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }
}

impl SVMModel for LinearModel {
    fn decision_function(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            - self.bias
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}
