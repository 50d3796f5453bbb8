//! Core type definitions for Assay.
//!
//! This crate defines the value types shared by every layer of the registry:
//! - [`Key`]: the 64-character hex primary key every entity is addressed by
//! - [`EntityType`]: the closed set of registrable entity kinds
//! - [`HashDress`], [`HashDressName`]: content hashes paired with off-ledger locations
//! - [`DatasetRef`]: a data manager plus the samples drawn from it
//!
//! Nothing here touches storage; parsing failures surface as [`Error`].

mod entity_type;
mod key;
mod refs;

pub use entity_type::EntityType;
pub use key::{KEY_LEN, Key};
pub use refs::{DatasetRef, HashDress, HashDressName};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("invalid dataset reference {input:?}: {reason}")]
    InvalidDataset { input: String, reason: String },

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),
}
