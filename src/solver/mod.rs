//! SVM solver implementations
//!
//! This module implements Platt's Sequential Minimal Optimization (SMO)
//! algorithm for the soft-margin SVM dual problem.

pub mod scan;
pub mod smo;
pub mod state;

pub use self::scan::*;
pub use self::smo::*;
pub use self::state::*;
