//! Core traits for the SMO trainer

use crate::core::Prediction;

/// Read access to a labelled, dense dataset
pub trait Dataset {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// Feature vector of sample `i`
    ///
    /// # Panics
    /// Panics if index >= len()
    fn features(&self, i: usize) -> &[f64];

    /// Label of sample `i`
    ///
    /// # Panics
    /// Panics if index >= len()
    fn label(&self, i: usize) -> f64;

    /// Get all labels as a vector
    fn labels(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A model able to classify dense feature vectors
pub trait SVMModel {
    /// Raw decision value `f(x)`; positive means class +1
    fn decision_function(&self, features: &[f64]) -> f64;

    /// Predict a single sample
    fn predict(&self, features: &[f64]) -> Prediction {
        Prediction::from_decision_value(self.decision_function(features))
    }

    /// Predict every sample of a dataset, in order
    fn predict_dataset<D: Dataset + ?Sized>(&self, dataset: &D) -> Vec<Prediction>
    where
        Self: Sized,
    {
        (0..dataset.len())
            .map(|i| self.predict(dataset.features(i)))
            .collect()
    }

    /// Get the bias term (subtracted from the weighted kernel sum)
    fn bias(&self) -> f64;
}
