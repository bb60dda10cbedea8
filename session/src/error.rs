//! Script error types.

use relmod_core::ModelError;
use thiserror::Error;

/// Errors raised while parsing or applying a model script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The line is not a valid statement.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The statement parsed but the model rejected it.
    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: ModelError,
    },
}

impl ScriptError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn model(line: usize, source: ModelError) -> Self {
        Self::Model { line, source }
    }

    /// 1-based line the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Syntax { line, .. } | ScriptError::Model { line, .. } => *line,
        }
    }
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;
