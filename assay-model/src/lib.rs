//! Entity model for Assay.
//!
//! Defines everything the registry knows about its entity types without
//! touching storage:
//! - [`InputRecord`]: positional string inputs and how they decode
//! - stored records ([`DataManager`], [`DataSample`], [`Objective`], [`Challenge`],
//!   [`Algo`], [`Model`]) and the [`Entity`] trait tying each to its projection
//! - output projections, the shape query callers consume
//! - [`validation`]: declarative `(field, check, message)` rules
//! - [`document`]: the JSON envelope records are persisted in

pub mod document;
mod error;
mod input;
mod output;
mod record;
pub mod validation;

pub use error::{ModelError, ModelResult};
pub use input::{
    AlgoInput, ChallengeInput, DataManagerInput, DataSampleInput, InputRecord, ModelInput,
    ObjectiveInput,
};
pub use output::{
    AlgoOutput, AlgoStorage, ChallengeOutput, DataManagerOutput, DataSampleOutput, DatasetOutput,
    ModelOutput, ObjectiveOutput,
};
pub use record::{Algo, Challenge, DataManager, DataSample, Entity, Model, Objective};
pub use validation::{Check, Rule, ValidationLimits, Violation};
