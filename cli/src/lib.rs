//! relmod CLI library - check object-relationship model scripts.
//!
//! - `check`: load a model script, validate it, print the report
//! - `ownership`: load a model script, print derived ownership
//!
//! Exit codes: 0 when the model has zero error findings, 1 otherwise,
//! 2 when the script cannot be read or applied.

mod format;
mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use relmod_session::{Model, ScriptError};
use relmod_validator::ValidatorConfig;
use thiserror::Error;
use tracing::info;

pub use format::{format_ownership, format_report, OutputFormat};
pub use logging::init_logging;

/// Exit code for unreadable or rejected scripts.
pub const EXIT_LOAD_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "relmod", author, version, about)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a model script and print its findings
    Check {
        /// Model script to load
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Note one-way friendship edges as info findings
        #[arg(long, env = "RELMOD_REQUIRE_MUTUAL_FRIENDSHIP")]
        require_mutual_friendship: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print ownership records, construction orders and diamonds
    Ownership {
        /// Model script to load
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Errors that stop the checker before a report exists.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: ScriptError,
    },

    #[error("cannot render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// What to print and how to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

/// Run a parsed command line.
pub fn run(cli: &Cli) -> Result<Outcome, CliError> {
    match &cli.command {
        Command::Check {
            file,
            require_mutual_friendship,
            format,
        } => {
            let config = ValidatorConfig::new().with_mutual_friendship(*require_mutual_friendship);
            let model = load(file, config)?;
            check_model(&model, *format)
        }
        Command::Ownership { file, format } => {
            let model = load(file, ValidatorConfig::default())?;
            let output = format_ownership(&model.derive_ownership(), *format)?;
            Ok(Outcome {
                output,
                exit_code: 0,
            })
        }
    }
}

/// Validate a loaded model and render its report.
pub fn check_model(model: &Model, format: OutputFormat) -> Result<Outcome, CliError> {
    let report = model.validate();
    info!(
        findings = report.len(),
        valid = report.is_valid(),
        "checked model"
    );
    Ok(Outcome {
        output: format_report(&report, format)?,
        exit_code: report.exit_code(),
    })
}

/// Build a model from script source.
pub fn load_source(
    path: &Path,
    source: &str,
    config: ValidatorConfig,
) -> Result<Model, CliError> {
    let mut model = Model::with_config(config);
    model
        .apply_script(source)
        .map_err(|source| CliError::Script {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        entities = model.graph().entity_count(),
        edges = model.graph().edge_count(),
        "loaded model"
    );
    Ok(model)
}

fn load(path: &Path, config: ValidatorConfig) -> Result<Model, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_source(path, &source, config)
}
