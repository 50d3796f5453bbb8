//! Error types for the entity model.

use crate::Violation;
use assay_types::EntityType;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while decoding, validating or (de)serializing entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Wrong number of positional arguments.
    #[error("incorrect arguments, expecting {} args: {}", .fields.len(), .fields.join(", "))]
    ArgumentCount {
        fields: &'static [&'static str],
        got: usize,
    },

    /// Positional arguments did not map onto the input record.
    #[error("cannot decode {entity} inputs: {reason}")]
    Decoding { entity: EntityType, reason: String },

    /// One or more fields violate their declared rules.
    #[error("invalid {entity} inputs: {}", join_violations(.violations))]
    Validation {
        entity: EntityType,
        violations: Vec<Violation>,
    },

    /// A stored document holds a different entity type than requested.
    #[error("stored document is a {found}, not a {expected}")]
    WrongType {
        expected: EntityType,
        found: EntityType,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Types(#[from] assay_types::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
