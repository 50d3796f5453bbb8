//! Error types for registration and queries.

use assay_model::{ModelError, Violation};
use assay_storage::StorageError;
use assay_types::EntityType;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Every way a registration or query can fail.
///
/// Nothing is retried inside the registry; retry policy belongs to the host.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Wrong number of positional arguments.
    #[error("{0}")]
    ArgumentCount(String),

    /// Positional arguments could not be mapped onto the input record, or a
    /// composite value failed to parse after validation.
    ///
    /// Current inputs are all strings, so past the arity check this only
    /// surfaces for inputs with non-string fields.
    #[error("{0}")]
    Decoding(String),

    /// Structural field violations.
    #[error("invalid {entity} inputs: {}", join(.violations))]
    Validation {
        entity: EntityType,
        violations: Vec<Violation>,
    },

    /// A cross-entity reference is dangling or inconsistent.
    #[error("{0}")]
    Reference(String),

    /// The key is already registered, or an association is already set.
    #[error("{0}")]
    Conflict(String),

    /// A lookup key is malformed.
    #[error("incorrect key: {0}")]
    BadKey(String),

    #[error("{0}")]
    NotFound(String),

    /// A secondary index entry could not be built.
    #[error("index write failed: {0}")]
    IndexWrite(String),

    /// The host could not supply the caller's identity.
    #[error("cannot identify caller: {0}")]
    Identity(String),

    /// The dispatcher received a function name it does not route.
    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    /// Store I/O failure, propagated as is.
    #[error("storage error: {0}")]
    Storage(StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Stable name of the failure reason, for callers that branch on it.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArgumentCount(_) => "ArgumentCountError",
            Self::Decoding(_) => "DecodingError",
            Self::Validation { .. } => "ValidationError",
            Self::Reference(_) => "ReferenceError",
            Self::Conflict(_) => "ConflictError",
            Self::BadKey(_) => "BadKeyError",
            Self::NotFound(_) => "NotFoundError",
            Self::IndexWrite(_) => "IndexWriteError",
            Self::Identity(_) => "IdentityError",
            Self::UnknownFunction(_) => "UnknownFunctionError",
            Self::Storage(_) => "StorageError",
            Self::Serialization(_) => "SerializationError",
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<StorageError> for RegistryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Index(message) => Self::IndexWrite(message),
            StorageError::Serialization(e) => Self::Serialization(e),
            other => Self::Storage(other),
        }
    }
}

impl From<ModelError> for RegistryError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ArgumentCount { .. } => Self::ArgumentCount(err.to_string()),
            ModelError::Decoding { .. } => Self::Decoding(err.to_string()),
            ModelError::Validation { entity, violations } => {
                Self::Validation { entity, violations }
            }
            ModelError::WrongType { .. } => Self::NotFound(err.to_string()),
            ModelError::Serialization(e) => Self::Serialization(e),
            ModelError::Types(e) => e.into(),
        }
    }
}

impl From<assay_types::Error> for RegistryError {
    fn from(err: assay_types::Error) -> Self {
        match err {
            assay_types::Error::InvalidKey { .. } => Self::BadKey(err.to_string()),
            other => Self::Decoding(other.to_string()),
        }
    }
}
