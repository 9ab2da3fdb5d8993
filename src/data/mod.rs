//! Data loading for training sets

pub mod text;

pub use self::text::{load_labels, load_matrix, load_training_set, read_labels, read_matrix};
