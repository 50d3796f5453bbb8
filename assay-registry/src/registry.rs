//! The registry and the steps every registration shares.
//!
//! A registration runs against a [`Transaction`]: decode, validate, resolve
//! references, derive the key, check uniqueness, identify the caller, then
//! stage the record, its indexes and any association write. Everything is
//! read before anything is written, and the staged writes reach the store in
//! a single batch on commit. A registration that fails at any step drops its
//! transaction and leaves the store untouched.

use crate::{IdentityProvider, RegistryConfig, RegistryError, RegistryResult};
use assay_model::validation::validate;
use assay_model::{
    document, DataManager, DataSample, Entity, InputRecord, ModelError, ValidationLimits,
};
use assay_storage::{index, KvStore, Transaction};
use assay_types::{DatasetRef, EntityType, Key};
use std::fmt;
use tracing::info;

pub(crate) const DATA_SAMPLE_BY_MANAGER: &str = "dataSample~dataManager~key";
pub(crate) const CHALLENGE_BY_OBJECTIVE: &str = "challenge~objective~key";
pub(crate) const ALGO_BY_CHALLENGE: &str = "algo~challenge~key";
pub(crate) const MODEL_BY_ALGO: &str = "model~algo~key";

/// Typed entity store over a pluggable [`KvStore`].
pub struct Registry<S: KvStore> {
    pub(crate) store: S,
    config: RegistryConfig,
    limits: ValidationLimits,
}

/// The tag every sample of a dataset reference must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SampleTag {
    TestOnly,
    Train,
}

impl SampleTag {
    fn matches(self, sample: &DataSample) -> bool {
        match self {
            Self::TestOnly => sample.test_only,
            Self::Train => !sample.test_only,
        }
    }
}

impl fmt::Display for SampleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestOnly => f.write_str("test-only"),
            Self::Train => f.write_str("train"),
        }
    }
}

impl<S: KvStore> Registry<S> {
    /// Creates a registry with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    pub fn with_config(store: S, config: RegistryConfig) -> Self {
        let limits = config.limits();
        Self {
            store,
            config,
            limits,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ── Protocol steps ───────────────────────────────────────────

    /// Decodes positional arguments into `I`.
    pub(crate) fn decode<I: InputRecord>(&self, args: &[String]) -> RegistryResult<I> {
        Ok(I::from_args(args)?)
    }

    pub(crate) fn validate<I: InputRecord>(&self, input: &I) -> RegistryResult<()> {
        Ok(validate(input, &self.limits)?)
    }

    /// Fetches the `E` referenced by `key`.
    ///
    /// A missing key, or a key holding another entity type, is a reference error.
    pub(crate) fn resolve<E: Entity>(tx: &Transaction<'_, S>, key: &str) -> RegistryResult<E> {
        let Some(bytes) = tx.get(key)? else {
            return Err(RegistryError::Reference(format!(
                "{} {key} does not exist",
                E::TYPE
            )));
        };
        match document::decode::<E>(&bytes) {
            Ok(record) => Ok(record),
            Err(ModelError::WrongType { found, .. }) => Err(RegistryError::Reference(format!(
                "{key} references a {found}, not a {}",
                E::TYPE
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks every sample of `dataset` belongs to its data manager and
    /// carries `tag`. Returns the data manager.
    pub(crate) fn resolve_dataset(
        tx: &Transaction<'_, S>,
        dataset: &DatasetRef,
        tag: SampleTag,
    ) -> RegistryResult<DataManager> {
        let manager = Self::resolve::<DataManager>(tx, &dataset.data_manager_key)?;
        for sample_key in &dataset.data_sample_keys {
            let sample = Self::resolve::<DataSample>(tx, sample_key)?;
            if !sample.belongs_to(&dataset.data_manager_key) {
                return Err(RegistryError::Reference(format!(
                    "data sample {sample_key} is not in the same data manager {}",
                    dataset.data_manager_key
                )));
            }
            if !tag.matches(&sample) {
                return Err(RegistryError::Reference(format!(
                    "data sample {sample_key} is not tagged as {tag}"
                )));
            }
        }
        Ok(manager)
    }

    /// Rejects a key that is already registered, whatever its entity type.
    pub(crate) fn ensure_absent(
        tx: &Transaction<'_, S>,
        key: &Key,
        entity: EntityType,
    ) -> RegistryResult<()> {
        if let Some(bytes) = tx.get(key.as_str())? {
            let existing = document::doc_type(&bytes)
                .map(|t| t.to_string())
                .unwrap_or_else(|_| "record".to_string());
            return Err(RegistryError::Conflict(format!(
                "{entity} with key {key} already exists (as {existing})"
            )));
        }
        Ok(())
    }

    pub(crate) fn owner(caller: &dyn IdentityProvider) -> RegistryResult<String> {
        caller.current_caller()
    }

    /// Stages `record` under `key` together with its owner index entry.
    pub(crate) fn stage<E: Entity>(
        tx: &mut Transaction<'_, S>,
        key: &Key,
        record: &E,
    ) -> RegistryResult<()> {
        tx.put(key.as_str(), document::encode(record)?);
        index::add_index(
            tx,
            E::TYPE.owner_index(),
            &[E::TYPE.as_str(), record.owner(), key.as_str()],
        )?;
        Ok(())
    }

    /// Stages a secondary index entry `[entity, parent, key]`.
    pub(crate) fn stage_index(
        tx: &mut Transaction<'_, S>,
        index_name: &str,
        entity: EntityType,
        parent: &str,
        key: &Key,
    ) -> RegistryResult<()> {
        index::add_index(tx, index_name, &[entity.as_str(), parent, key.as_str()])?;
        Ok(())
    }

    /// Applies the staged writes as one batch.
    pub(crate) fn commit(
        tx: Transaction<'_, S>,
        entity: EntityType,
        key: &Key,
    ) -> RegistryResult<()> {
        let written = tx.commit()?;
        info!(%entity, %key, written, "registered");
        Ok(())
    }
}
