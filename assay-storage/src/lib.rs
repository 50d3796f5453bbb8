//! Storage layer for Assay.
//!
//! The registry only ever needs point reads and writes, so the backing store
//! is a plain key-value map behind the [`KvStore`] trait.
//!
//! # Architecture
//!
//! - [`MemoryStore`] and [`SqliteStore`] implement [`KvStore`]
//! - [`Transaction`] buffers writes so every read of a unit of work happens
//!   before any write reaches the store, then applies them in one batch
//! - [`index`] layers composite secondary indexes on top of point lookups

mod error;
pub mod index;
mod memory;
mod sqlite;
mod store;
mod transaction;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::KvStore;
pub use transaction::Transaction;
