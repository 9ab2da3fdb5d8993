//! Plain-text matrix and label files
//!
//! Supports the two-file layout:
//! - a feature matrix with one sample per line and whitespace-separated values
//! - a label file with one `-1` / `+1` per line, in the same order
//!
//! Blank lines and lines starting with `#` are ignored in both files.

use crate::core::{Result, SVMError, TrainingSet};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a whitespace-separated feature matrix
///
/// Rows may differ in length here; [`TrainingSet::new`] rejects ragged input.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(SVMError::IoError)?;
        let line = line.trim();
        if is_skippable(line) {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| parse_value(token, line_idx + 1))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Read one label per line
pub fn read_labels<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut labels = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(SVMError::IoError)?;
        let line = line.trim();
        if is_skippable(line) {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let label = match (tokens.next(), tokens.next()) {
            (Some(token), None) => parse_value(token, line_idx + 1)?,
            _ => {
                return Err(SVMError::ParseError {
                    line: line_idx + 1,
                    message: format!("expected a single label, got '{line}'"),
                })
            }
        };
        labels.push(label);
    }

    Ok(labels)
}

/// Load a feature matrix file
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path).map_err(SVMError::IoError)?;
    read_matrix(BufReader::new(file))
}

/// Load a label file
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(SVMError::IoError)?;
    read_labels(BufReader::new(file))
}

/// Load and validate a training set from a matrix file and a label file
pub fn load_training_set<P1: AsRef<Path>, P2: AsRef<Path>>(
    matrix_path: P1,
    labels_path: P2,
) -> Result<TrainingSet> {
    let rows = load_matrix(&matrix_path)?;
    let labels = load_labels(&labels_path)?;
    debug!(
        "Read {} rows from {:?} and {} labels from {:?}",
        rows.len(),
        matrix_path.as_ref(),
        labels.len(),
        labels_path.as_ref()
    );
    TrainingSet::new(rows, labels)
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn parse_value(token: &str, line: usize) -> Result<f64> {
    let value = token.parse::<f64>().map_err(|_| SVMError::ParseError {
        line,
        message: format!("invalid number '{token}'"),
    })?;
    if !value.is_finite() {
        return Err(SVMError::ParseError {
            line,
            message: format!("non-finite value '{token}'"),
        });
    }
    Ok(value)
}
