//! Rust implementation of binary SVM training with Sequential Minimal Optimization
//!
//! Based on "Sequential Minimal Optimization: A Fast Algorithm for Training
//! Support Vector Machines" by John C. Platt

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod optimizer;
pub mod persistence;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, SVM};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, SVMError};
pub use crate::kernel::{FnKernel, Kernel, LinearKernel};
pub use crate::optimizer::{SVMOptimizer, TrainedSVM};
pub use crate::solver::{ModelState, SMOSolver};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
