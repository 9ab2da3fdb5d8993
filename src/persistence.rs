//! Model serialization and persistence
//!
//! Linear-kernel models are stored in primal form: the weight vector and the
//! bias, plus metadata describing how they were trained.

use crate::api::TrainedModel;
use crate::core::{ConvergenceStatus, LinearModel, Result, SVMError};
use crate::kernel::LinearKernel;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable representation of a trained linear SVM
#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableModel {
    /// Primal weight vector `w`
    pub weights: Vec<f64>,
    /// Bias `b` of `f(x) = w·x - b`
    pub bias: f64,
    /// Kernel type identifier
    pub kernel_type: String,
    /// Model metadata
    pub metadata: ModelMetadata,
}

/// Model metadata for tracking and validation
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    /// Number of support vectors
    pub n_support_vectors: usize,
    /// Training parameters used
    pub training_params: TrainingParams,
    /// How the optimizer terminated
    pub status: ConvergenceStatus,
    /// Outer-loop passes performed
    pub passes: usize,
    /// Creation timestamp
    pub created_at: String,
}

/// Training parameters for reference
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingParams {
    pub c: f64,
    pub tolerance: f64,
    pub max_passes: usize,
    pub seed: Option<u64>,
}

impl SerializableModel {
    /// Create a serializable model from a trained model
    pub fn from_trained_model(model: &TrainedModel<LinearKernel>) -> Self {
        let info = model.info();
        let config = model.inner().config();
        let params = model.linear_params();

        Self {
            weights: params.weights,
            bias: params.bias,
            kernel_type: "linear".to_string(),
            metadata: ModelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_support_vectors: info.n_support_vectors,
                training_params: TrainingParams {
                    c: config.c,
                    tolerance: config.tolerance,
                    max_passes: config.max_passes,
                    seed: config.seed,
                },
                status: info.status,
                passes: info.passes,
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(SVMError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load model from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SVMError::IoError)?;
        let reader = BufReader::new(file);
        let model: Self = serde_json::from_reader(reader)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        if model.kernel_type != "linear" {
            return Err(SVMError::InvalidParameter(format!(
                "Unsupported kernel type '{}': only linear models can be loaded",
                model.kernel_type
            )));
        }
        Ok(model)
    }

    /// The stored weights and bias as a predictor
    pub fn to_linear_model(&self) -> LinearModel {
        LinearModel::new(self.weights.clone(), self.bias)
    }

    /// Print model summary
    pub fn print_summary(&self) {
        println!("=== SVM Model Summary ===");
        println!("Kernel Type: {}", self.kernel_type);
        println!("Dimensions: {}", self.weights.len());
        println!("Support Vectors: {}", self.metadata.n_support_vectors);
        println!("Bias: {:.6}", self.bias);
        println!("Status: {:?} after {} passes", self.metadata.status, self.metadata.passes);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Training Parameters:");
        println!("  C: {}", self.metadata.training_params.c);
        println!("  Tolerance: {}", self.metadata.training_params.tolerance);
        println!("  Max Passes: {}", self.metadata.training_params.max_passes);
        if let Some(seed) = self.metadata.training_params.seed {
            println!("  Seed: {seed}");
        }
    }
}
