//! RSMO Command Line Interface
//!
//! Trains a linear SVM from a whitespace-separated feature matrix and a label
//! file, prints the resulting weight vector and bias, and applies saved
//! models to new data.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info, warn};
use rsmo::api::{EvaluationMetrics, SVM};
use rsmo::core::{Result, SVMError, SVMModel};
use rsmo::data;
use rsmo::persistence::SerializableModel;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rsmo")]
#[command(about = "Train binary SVM classifiers with Sequential Minimal Optimization")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RSMO Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a linear SVM and print its weight vector and bias
    Train(TrainArgs),
    /// Make predictions using a saved model
    Predict(PredictArgs),
    /// Display model information
    Info(InfoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Feature matrix file (one sample per line, whitespace-separated)
    #[arg(long)]
    data: PathBuf,

    /// Label file (one -1/+1 label per line)
    #[arg(long)]
    labels: PathBuf,

    /// Save the trained model as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// KKT violation tolerance
    #[arg(short, long, default_value = "0.01")]
    tolerance: f64,

    /// Maximum number of optimizer passes
    #[arg(short, long, default_value = "10000")]
    max_passes: usize,

    /// Seed for the random scan offsets
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct PredictArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Feature matrix file
    #[arg(long)]
    data: PathBuf,

    /// Optional label file; reports accuracy when given
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Output predictions file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Model file
    model: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training SVM model...");
    info!("Data file: {:?}, label file: {:?}", args.data, args.labels);
    info!(
        "Parameters: C={}, tolerance={}, max_passes={}",
        args.c, args.tolerance, args.max_passes
    );

    let mut svm = SVM::new()
        .with_c(args.c)
        .with_tolerance(args.tolerance)
        .with_max_passes(args.max_passes);
    if let Some(seed) = args.seed {
        svm = svm.with_seed(seed);
    }

    let dataset = data::load_training_set(&args.data, &args.labels)?;
    let model = svm.train(dataset)?;

    let info = model.info();
    if model.is_converged() {
        info!("Training converged after {} passes", info.passes);
    } else {
        warn!(
            "Training stopped after {} passes without converging; results are approximate",
            info.passes
        );
    }
    info!("Support vectors: {}", info.n_support_vectors);

    let params = model.linear_params();
    println!("{:?}", params.weights);
    println!("{}", params.bias);

    if let Some(output) = &args.output {
        SerializableModel::from_trained_model(&model).save_to_file(output)?;
        info!("Model saved to: {output:?}");
    }

    let accuracy = model.evaluate(model.inner().training_set());
    info!("Training accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;
    let model = serializable_model.to_linear_model();

    info!("Loading prediction data from: {:?}", args.data);
    let rows = data::load_matrix(&args.data)?;
    for (index, row) in rows.iter().enumerate() {
        if row.len() != model.dim() {
            return Err(SVMError::DimensionMismatch {
                index,
                expected: model.dim(),
                actual: row.len(),
            });
        }
    }

    let predictions: Vec<_> = rows.iter().map(|row| model.predict(row)).collect();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    writeln!(writer, "# Predictions for {} samples", predictions.len())?;
    writeln!(writer, "# Format: sample_index predicted_label decision_value")?;
    for (i, pred) in predictions.iter().enumerate() {
        writeln!(writer, "{} {:.0} {:.6}", i, pred.label, pred.decision_value)?;
    }
    writer.flush()?;

    if let Some(output) = &args.output {
        info!("Predictions saved to: {output:?}");
    }

    if let Some(labels_path) = &args.labels {
        let labels = data::load_labels(labels_path)?;
        if labels.len() != predictions.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} samples but {} labels",
                predictions.len(),
                labels.len()
            )));
        }
        let metrics = EvaluationMetrics::from_predictions(&predictions, &labels);
        println!("Accuracy: {:.2}%", metrics.accuracy() * 100.0);
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;

    serializable_model.print_summary();

    println!("\nWeights:");
    let n_show = serializable_model.weights.len().min(10);
    for (k, w) in serializable_model.weights.iter().enumerate().take(n_show) {
        println!("  w{k}: {w:.6}");
    }
    if serializable_model.weights.len() > n_show {
        println!("  ... ({} more)", serializable_model.weights.len() - n_show);
    }

    Ok(())
}
