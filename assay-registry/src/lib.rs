//! Entity registry for Assay.
//!
//! [`Registry`] registers data managers, data samples, objectives,
//! challenges, algos and models over any [`assay_storage::KvStore`], and
//! answers point lookups, listings and reverse lookups over them.
//!
//! Every registration follows the same protocol:
//! 1. decode the positional arguments
//! 2. validate the fields
//! 3. resolve cross-entity references
//! 4. derive the content key and reject duplicates
//! 5. record the caller as owner
//! 6. write the record, its index entries and any association as one batch
//!
//! Hosts that dispatch by function name use [`Registry::invoke`].

mod algo;
mod challenge;
mod config;
mod data_manager;
mod data_sample;
mod error;
mod identity;
mod invoke;
mod model;
mod objective;
mod query;
mod registry;

pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use identity::{IdentityProvider, StaticIdentity};
pub use invoke::{Response, STATUS_ERROR, STATUS_OK};
pub use query::EntityOutput;
pub use registry::Registry;
