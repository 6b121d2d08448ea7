// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the four subcommands: `train`, `test`, `convert`
// and `extract`, and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad flags
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::{convert_use_case::ConvertConfig, train_use_case::TrainConfig};
use crate::domain::heuristic::DEFAULT_GHOST_THRESHOLD;
use crate::domain::posting::{FEATURE_NAMES, NUM_FEATURES};

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled CSV
    Train(TrainArgs),

    /// Score one posting given its 13 feature values
    Test(TestArgs),

    /// Convert the trained model to TensorFlow.js format
    Convert(ConvertArgs),

    /// Derive the 13 feature values from posting text
    Extract(ExtractArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Labelled CSV: `label` plus the 13 feature columns
    #[arg(long, default_value = "training_data.csv")]
    pub data: String,

    /// Directory for the model and standardizer files
    #[arg(long, default_value = "trained_model")]
    pub output_dir: String,

    /// Upper bound on full passes through the training data
    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    /// Number of samples processed together in one step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.001)]
    pub lr: f64,

    /// Epochs without a val_accuracy improvement before stopping
    #[arg(long, default_value_t = 10)]
    pub patience: usize,

    /// Fraction of rows held out for validation and testing
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the split, shuffling and weight init
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Append per-epoch metrics to this CSV
    #[arg(long)]
    pub metrics_csv: Option<String>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 -
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data,
            output_dir:    a.output_dir,
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            lr:            a.lr,
            patience:      a.patience,
            test_fraction: a.test_fraction,
            seed:          a.seed,
            metrics_csv:   a.metrics_csv,
        }
    }
}

/// All arguments for the `test` command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// The 13 feature values, in column order
    #[arg(allow_negative_numbers = true, value_name = "FEATURE")]
    pub values: Vec<f64>,

    /// Directory the model was trained into
    #[arg(long, default_value = "trained_model")]
    pub model_dir: String,
}

/// All arguments for the `convert` command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory the model was trained into
    #[arg(long, default_value = "trained_model")]
    pub model_dir: String,

    /// Directory for the TensorFlow.js files
    #[arg(long, default_value = "tfjs_model")]
    pub output_dir: String,
}

impl From<ConvertArgs> for ConvertConfig {
    fn from(a: ConvertArgs) -> Self {
        ConvertConfig { model_dir: a.model_dir, output_dir: a.output_dir }
    }
}

/// All arguments for the `extract` command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text file with the posting, or `-` for stdin
    pub input: String,

    /// Also score the extracted vector with the trained model
    #[arg(long)]
    pub predict: bool,

    /// Directory the model was trained into (with --predict)
    #[arg(long, default_value = "trained_model")]
    pub model_dir: String,

    /// Also print the model-free heuristic ghost score
    #[arg(long)]
    pub heuristic: bool,

    /// Heuristic score (0-100) at which a posting is flagged
    #[arg(long, default_value_t = DEFAULT_GHOST_THRESHOLD, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: u32,
}

/// Printed when `test` gets fewer than 13 values
pub fn test_usage() -> String {
    let placeholders: Vec<String> = FEATURE_NAMES.iter().map(|n| format!("<{n}>")).collect();
    format!(
        "Usage: ghost-job-detector test {}\n\
         \n\
         Expected {} values in this order.\n\
         \n\
         Examples:\n  \
           Ghost-like: ghost-job-detector test 60 500 0 0 800 3 1 1 1 1 0 0 1\n  \
           Real-like:  ghost-job-detector test 3 25 1 15000 3500 0 0 0 0 0 1 1 0",
        placeholders.join(" "),
        NUM_FEATURES,
    )
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_feature() {
        let usage = test_usage();
        for name in FEATURE_NAMES {
            assert!(usage.contains(&format!("<{name}>")));
        }
        assert!(usage.contains("Ghost-like"));
        assert!(usage.contains("Real-like"));
    }

    #[test]
    fn test_example_rows_have_thirteen_values() {
        let usage = test_usage();
        for line in usage.lines().filter(|l| l.contains("-like:")) {
            let values = line.split("test ").nth(1).unwrap().split_whitespace().count();
            assert_eq!(values, NUM_FEATURES);
        }
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        use clap::Parser;
        let parsed = crate::cli::Cli::try_parse_from([
            "ghost-job-detector", "extract", "posting.txt", "--heuristic", "--threshold", "150",
        ]);
        assert!(parsed.is_err());
    }
}
