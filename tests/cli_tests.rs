//! Integration tests for the CLI application
//!
//! These tests run the `rsmo` binary against small matrix and label files.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

/// Helper to create test data files
struct TestDataFiles {
    pub matrix_file: NamedTempFile,
    pub labels_file: NamedTempFile,
    pub test_matrix_file: NamedTempFile,
    pub test_labels_file: NamedTempFile,
}

impl TestDataFiles {
    fn new() -> std::io::Result<Self> {
        let mut matrix_file = NamedTempFile::new()?;
        writeln!(matrix_file, "2 2")?;
        writeln!(matrix_file, "2 3")?;
        writeln!(matrix_file, "0 -1")?;
        writeln!(matrix_file, "-1 0")?;
        matrix_file.flush()?;

        let mut labels_file = NamedTempFile::new()?;
        writeln!(labels_file, "1")?;
        writeln!(labels_file, "1")?;
        writeln!(labels_file, "-1")?;
        writeln!(labels_file, "-1")?;
        labels_file.flush()?;

        let mut test_matrix_file = NamedTempFile::new()?;
        writeln!(test_matrix_file, "3 3")?;
        writeln!(test_matrix_file, "-2 -1")?;
        test_matrix_file.flush()?;

        let mut test_labels_file = NamedTempFile::new()?;
        writeln!(test_labels_file, "1")?;
        writeln!(test_labels_file, "-1")?;
        test_labels_file.flush()?;

        Ok(TestDataFiles {
            matrix_file,
            labels_file,
            test_matrix_file,
            test_labels_file,
        })
    }
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rsmo"))
        .args(args)
        .output()
        .expect("Failed to run CLI binary")
}

fn path_str(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is valid UTF-8")
}

fn train_model(test_data: &TestDataFiles, model_path: &str) {
    let output = run_cli(&[
        "train",
        "--data",
        path_str(&test_data.matrix_file),
        "--labels",
        path_str(&test_data.labels_file),
        "--output",
        model_path,
        "--seed",
        "1",
    ]);
    assert!(
        output.status.success(),
        "Train command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_cli_train_prints_weights_and_bias() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(&test_data.matrix_file),
        "--labels",
        path_str(&test_data.labels_file),
        "-C",
        "1.0",
        "--tolerance",
        "0.01",
        "--seed",
        "42",
    ]);

    assert!(
        output.status.success(),
        "Train command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();

    let weights_line = lines.next().expect("weights line");
    let weights: Vec<f64> = weights_line
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|w| w.trim().parse().expect("numeric weight"))
        .collect();
    let bias: f64 = lines
        .next()
        .expect("bias line")
        .trim()
        .parse()
        .expect("numeric bias");

    assert_eq!(weights.len(), 2);
    // Boundary between the clusters: positives score above zero, negatives below
    assert!(weights[0] * 2.0 + weights[1] * 2.0 - bias > 0.0);
    assert!(weights[0] * -1.0 - bias < 0.0);
    assert!(weights[1] * -1.0 - bias < 0.0);
}

#[test]
fn test_cli_train_saves_model() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    train_model(&test_data, model_path.to_str().unwrap());

    assert!(model_path.exists(), "Model file was not created");
    let content = std::fs::read_to_string(&model_path).expect("Failed to read model");
    assert!(content.contains("\"weights\""));
    assert!(content.contains("\"Converged\""));
}

#[test]
fn test_cli_predict_command() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");
    let predictions_path = temp_dir.path().join("predictions.txt");

    train_model(&test_data, model_path.to_str().unwrap());

    let output = run_cli(&[
        "predict",
        "--model",
        model_path.to_str().unwrap(),
        "--data",
        path_str(&test_data.test_matrix_file),
        "--output",
        predictions_path.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "Predict command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = std::fs::read_to_string(&predictions_path).expect("Failed to read predictions");
    let labels: Vec<&str> = content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.split_whitespace().nth(1).expect("label column"))
        .collect();
    assert_eq!(labels, vec!["1", "-1"]);
}

#[test]
fn test_cli_predict_reports_accuracy() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    train_model(&test_data, model_path.to_str().unwrap());

    let output = run_cli(&[
        "predict",
        "--model",
        model_path.to_str().unwrap(),
        "--data",
        path_str(&test_data.test_matrix_file),
        "--labels",
        path_str(&test_data.test_labels_file),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Accuracy: 100.00%"), "stdout: {stdout}");
}

#[test]
fn test_cli_info_command() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    train_model(&test_data, model_path.to_str().unwrap());

    let output = run_cli(&["info", model_path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== SVM Model Summary ==="));
    assert!(stdout.contains("Kernel Type: linear"));
    assert!(stdout.contains("w0:"));
}

#[test]
fn test_cli_rejects_invalid_c() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(&test_data.matrix_file),
        "--labels",
        path_str(&test_data.labels_file),
        "-C",
        "0",
    ]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_mismatched_labels() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(&test_data.matrix_file),
        "--labels",
        path_str(&test_data.test_labels_file),
    ]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_missing_file() {
    let output = run_cli(&[
        "train",
        "--data",
        "/nonexistent/matrix.txt",
        "--labels",
        "/nonexistent/labels.txt",
    ]);

    assert!(!output.status.success());
}
