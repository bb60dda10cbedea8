//! Error types for the scenario framework.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read a file.
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a steps file.
    #[error("failed to parse steps '{origin}': {message}")]
    StepsParse { origin: String, message: String },

    /// The seed script was rejected.
    #[error("seed '{}' failed: {message}", path.display())]
    SeedFailed { path: PathBuf, message: String },

    /// Expectation not met.
    #[error("expectation failed for step '{step}': {message}")]
    ExpectationFailed { step: String, message: String },

    /// Step not found in the steps file.
    #[error("step '{step}' not found in steps file")]
    StepNotFound { step: String },

    /// Scenario has neither a steps file nor inline steps.
    #[error("no steps given for scenario '{scenario}'")]
    MissingSteps { scenario: String },
}

impl ScenarioError {
    pub fn file_read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn steps_parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepsParse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn seed_failed(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::SeedFailed {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn expectation_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExpectationFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_steps(scenario: impl Into<String>) -> Self {
        Self::MissingSteps {
            scenario: scenario.into(),
        }
    }
}
