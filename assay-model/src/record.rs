use crate::output::{
    AlgoOutput, AlgoStorage, ChallengeOutput, DataManagerOutput, DataSampleOutput, ModelOutput,
    ObjectiveOutput,
};
use assay_types::{DatasetRef, EntityType, HashDress, HashDressName, Key};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A record the registry persists under its content key.
///
/// The key itself is not stored inside the record; projections receive it
/// from the caller.
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug {
    const TYPE: EntityType;

    /// Public shape returned by queries.
    type Output: Serialize + DeserializeOwned + Clone + Debug + PartialEq;

    /// Identity of the registering caller.
    fn owner(&self) -> &str;

    fn project(&self, key: &Key) -> Self::Output;
}

/// Data opener plus description; samples and objectives hang off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataManager {
    /// Single-use association, set by the objective whose test data lives here.
    pub objective_key: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub data_type: String,
    pub description: HashDress,
    pub opener_storage_address: String,
    pub owner: String,
    pub permissions: String,
}

impl DataManager {
    pub fn is_associated(&self) -> bool {
        !self.objective_key.is_empty()
    }
}

impl Entity for DataManager {
    const TYPE: EntityType = EntityType::DataManager;
    type Output = DataManagerOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> DataManagerOutput {
        DataManagerOutput {
            objective_key: self.objective_key.clone(),
            key: key.to_string(),
            name: self.name.clone(),
            data_type: self.data_type.clone(),
            description: self.description.clone(),
            opener: HashDress::new(key.as_str(), self.opener_storage_address.clone()),
            owner: self.owner.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSample {
    pub data_manager_keys: Vec<String>,
    pub owner: String,
    pub test_only: bool,
}

impl DataSample {
    pub fn belongs_to(&self, data_manager_key: &str) -> bool {
        self.data_manager_keys.iter().any(|k| k == data_manager_key)
    }
}

impl Entity for DataSample {
    const TYPE: EntityType = EntityType::DataSample;
    type Output = DataSampleOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> DataSampleOutput {
        DataSampleOutput {
            key: key.to_string(),
            data_manager_keys: self.data_manager_keys.clone(),
            owner: self.owner.clone(),
            test_only: self.test_only,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Objective {
    pub name: String,
    pub description_storage_address: String,
    pub metrics: HashDressName,
    pub test_dataset: DatasetRef,
    pub owner: String,
    pub permissions: String,
}

impl Entity for Objective {
    const TYPE: EntityType = EntityType::Objective;
    type Output = ObjectiveOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> ObjectiveOutput {
        ObjectiveOutput {
            key: key.to_string(),
            name: self.name.clone(),
            description: HashDress::new(key.as_str(), self.description_storage_address.clone()),
            metrics: self.metrics.clone(),
            owner: self.owner.clone(),
            test_dataset: self.test_dataset.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Challenge {
    pub name: String,
    pub description_storage_address: String,
    pub objective_key: String,
    pub owner: String,
    pub permissions: String,
}

impl Entity for Challenge {
    const TYPE: EntityType = EntityType::Challenge;
    type Output = ChallengeOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> ChallengeOutput {
        ChallengeOutput {
            key: key.to_string(),
            name: self.name.clone(),
            description: HashDress::new(key.as_str(), self.description_storage_address.clone()),
            objective_key: self.objective_key.clone(),
            owner: self.owner.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Algo {
    pub name: String,
    pub storage_address: String,
    pub description: HashDress,
    pub owner: String,
    pub challenge_key: String,
    pub permissions: String,
}

impl Entity for Algo {
    const TYPE: EntityType = EntityType::Algo;
    type Output = AlgoOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> AlgoOutput {
        AlgoOutput {
            key: key.to_string(),
            name: self.name.clone(),
            storage: AlgoStorage {
                hash: key.to_string(),
                address: self.storage_address.clone(),
            },
            description: self.description.clone(),
            owner: self.owner.clone(),
            challenge_key: self.challenge_key.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    pub algo_key: String,
    pub in_model_key: String,
    pub storage_address: String,
    pub train_dataset: DatasetRef,
    pub owner: String,
    pub permissions: String,
}

impl Entity for Model {
    const TYPE: EntityType = EntityType::Model;
    type Output = ModelOutput;

    fn owner(&self) -> &str {
        &self.owner
    }

    fn project(&self, key: &Key) -> ModelOutput {
        ModelOutput {
            key: key.to_string(),
            algo_key: self.algo_key.clone(),
            in_model_key: self.in_model_key.clone(),
            storage: AlgoStorage {
                hash: key.to_string(),
                address: self.storage_address.clone(),
            },
            train_dataset: self.train_dataset.clone(),
            owner: self.owner.clone(),
            permissions: self.permissions.clone(),
        }
    }
}
