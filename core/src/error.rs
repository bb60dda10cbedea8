//! Common error types for relmod.

use crate::{EdgeId, Multiplicity, RelationKind};
use thiserror::Error;

/// Errors raised by model construction operations.
///
/// A failed operation never leaves the model partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An entity with this name is already declared.
    #[error("Duplicate entity: {0}")]
    DuplicateEntity(String),

    /// No entity with this name is declared.
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// No edge with this id exists.
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    /// The multiplicity does not fit the relationship kind.
    #[error("Invalid multiplicity for {kind}: {reason}")]
    InvalidMultiplicity {
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
        reason: String,
    },

    /// A field name appears twice in one entity declaration.
    #[error("Duplicate field {field} on entity {entity}")]
    DuplicateField { entity: String, field: String },

    /// An entity or field name is empty or contains whitespace.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

impl ModelError {
    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::DuplicateEntity(name.into())
    }

    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }

    pub fn invalid_multiplicity(
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidMultiplicity {
            kind,
            multiplicity,
            reason: reason.into(),
        }
    }

    pub fn duplicate_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            entity: entity.into(),
            field: field.into(),
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
