//! Read side of the registry: point lookups, listings and reverse lookups.

use crate::registry::{
    Registry, ALGO_BY_CHALLENGE, CHALLENGE_BY_OBJECTIVE, DATA_SAMPLE_BY_MANAGER, MODEL_BY_ALGO,
};
use crate::{RegistryError, RegistryResult};
use assay_model::{
    document, Algo, AlgoOutput, Challenge, ChallengeOutput, DataManager, DataManagerOutput,
    DataSample, DataSampleOutput, DatasetOutput, Entity, Model, ModelError, ModelOutput,
    Objective, ObjectiveOutput,
};
use assay_storage::{index, KvStore};
use assay_types::{EntityType, Key};
use serde::Serialize;
use tracing::debug;

/// Projection of a record whose type is only known once it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityOutput {
    DataManager(DataManagerOutput),
    DataSample(DataSampleOutput),
    Objective(ObjectiveOutput),
    Challenge(ChallengeOutput),
    Algo(AlgoOutput),
    Model(ModelOutput),
}

impl EntityOutput {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::DataManager(_) => EntityType::DataManager,
            Self::DataSample(_) => EntityType::DataSample,
            Self::Objective(_) => EntityType::Objective,
            Self::Challenge(_) => EntityType::Challenge,
            Self::Algo(_) => EntityType::Algo,
            Self::Model(_) => EntityType::Model,
        }
    }
}

impl<S: KvStore> Registry<S> {
    /// Fetches and projects the `E` stored at `key`.
    pub fn get<E: Entity>(&self, key: &str) -> RegistryResult<E::Output> {
        let key = Key::parse(key)?;
        let record = self.fetch::<E>(&key)?;
        Ok(record.project(&key))
    }

    /// Fetches whatever entity is stored at `key`.
    pub fn get_any(&self, key: &str) -> RegistryResult<EntityOutput> {
        let key = Key::parse(key)?;
        let bytes = self.read(&key)?;
        let output = match document::doc_type(&bytes)? {
            EntityType::DataManager => {
                EntityOutput::DataManager(document::decode::<DataManager>(&bytes)?.project(&key))
            }
            EntityType::DataSample => {
                EntityOutput::DataSample(document::decode::<DataSample>(&bytes)?.project(&key))
            }
            EntityType::Objective => {
                EntityOutput::Objective(document::decode::<Objective>(&bytes)?.project(&key))
            }
            EntityType::Challenge => {
                EntityOutput::Challenge(document::decode::<Challenge>(&bytes)?.project(&key))
            }
            EntityType::Algo => EntityOutput::Algo(document::decode::<Algo>(&bytes)?.project(&key)),
            EntityType::Model => {
                EntityOutput::Model(document::decode::<Model>(&bytes)?.project(&key))
            }
        };
        Ok(output)
    }

    /// Every registered `E`, in key order.
    ///
    /// A record that cannot be read aborts the whole listing.
    pub fn list_all<E: Entity>(&self) -> RegistryResult<Vec<E::Output>> {
        let keys = index::list_keys(&self.store, E::TYPE.owner_index(), &[E::TYPE.as_str()])?;
        debug!(entity = %E::TYPE, count = keys.len(), "listing");
        self.project_all::<E>(keys)
    }

    /// Every `E` registered by `owner`, in key order.
    pub fn list_by_owner<E: Entity>(&self, owner: &str) -> RegistryResult<Vec<E::Output>> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        let keys = index::list_keys(
            &self.store,
            E::TYPE.owner_index(),
            &[E::TYPE.as_str(), owner],
        )?;
        self.project_all::<E>(keys)
    }

    /// A data manager with its sample keys split into train and test sets.
    pub fn get_dataset(&self, data_manager_key: &str) -> RegistryResult<DatasetOutput> {
        let data_manager = self.get::<DataManager>(data_manager_key)?;
        let mut train_data_sample_keys = Vec::new();
        let mut test_data_sample_keys = Vec::new();
        for key in self.children(DATA_SAMPLE_BY_MANAGER, EntityType::DataSample, &data_manager.key)? {
            let sample = self.fetch::<DataSample>(&Key::parse(&key)?)?;
            if sample.test_only {
                test_data_sample_keys.push(key);
            } else {
                train_data_sample_keys.push(key);
            }
        }
        Ok(DatasetOutput {
            data_manager,
            train_data_sample_keys,
            test_data_sample_keys,
        })
    }

    /// Algos submitted to a challenge.
    pub fn list_challenge_algos(&self, challenge_key: &str) -> RegistryResult<Vec<AlgoOutput>> {
        let challenge = self.get::<Challenge>(challenge_key)?;
        let keys = self.children(ALGO_BY_CHALLENGE, EntityType::Algo, &challenge.key)?;
        self.project_all::<Algo>(keys)
    }

    /// Models trained with an algo.
    pub fn list_algo_models(&self, algo_key: &str) -> RegistryResult<Vec<ModelOutput>> {
        let algo = self.get::<Algo>(algo_key)?;
        let keys = self.children(MODEL_BY_ALGO, EntityType::Model, &algo.key)?;
        self.project_all::<Model>(keys)
    }

    /// Challenges opened on an objective.
    pub fn list_objective_challenges(
        &self,
        objective_key: &str,
    ) -> RegistryResult<Vec<ChallengeOutput>> {
        let objective = self.get::<Objective>(objective_key)?;
        let keys = self.children(CHALLENGE_BY_OBJECTIVE, EntityType::Challenge, &objective.key)?;
        self.project_all::<Challenge>(keys)
    }

    // ── Helpers ──────────────────────────────────────────────────

    fn read(&self, key: &Key) -> RegistryResult<Vec<u8>> {
        self.store
            .get(key.as_str())?
            .ok_or_else(|| RegistryError::NotFound(format!("no record with key {key}")))
    }

    fn fetch<E: Entity>(&self, key: &Key) -> RegistryResult<E> {
        let bytes = self.read(key)?;
        match document::decode::<E>(&bytes) {
            Ok(record) => Ok(record),
            Err(ModelError::WrongType { .. }) => Err(RegistryError::NotFound(format!(
                "no {} with key {key}",
                E::TYPE
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn children(
        &self,
        index_name: &str,
        entity: EntityType,
        parent: &str,
    ) -> RegistryResult<Vec<String>> {
        Ok(index::list_keys(&self.store, index_name, &[entity.as_str(), parent])?)
    }

    fn project_all<E: Entity>(&self, keys: Vec<String>) -> RegistryResult<Vec<E::Output>> {
        keys.iter()
            .map(|key| -> RegistryResult<E::Output> {
                let key = Key::parse(key)?;
                Ok(self.fetch::<E>(&key)?.project(&key))
            })
            .collect()
    }
}
