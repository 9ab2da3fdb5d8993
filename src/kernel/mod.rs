//! Kernel functions for SVM training

pub mod linear;
pub mod traits;

pub use self::linear::*;
pub use self::traits::*;
