//! Query projections.
//!
//! Field names and nesting are part of the public contract: consumers decode
//! these shapes directly, so every nested object is spelled out in full.

use assay_types::{DatasetRef, HashDress, HashDressName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataManagerOutput {
    pub objective_key: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub data_type: String,
    pub description: HashDress,
    pub opener: HashDress,
    pub owner: String,
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSampleOutput {
    pub key: String,
    pub data_manager_keys: Vec<String>,
    pub owner: String,
    pub test_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectiveOutput {
    pub key: String,
    pub name: String,
    pub description: HashDress,
    pub metrics: HashDressName,
    pub owner: String,
    pub test_dataset: DatasetRef,
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChallengeOutput {
    pub key: String,
    pub name: String,
    pub description: HashDress,
    pub objective_key: String,
    pub owner: String,
    pub permissions: String,
}

/// `{Hash, Address}` of an uploaded archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlgoStorage {
    pub hash: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlgoOutput {
    pub key: String,
    pub name: String,
    pub storage: AlgoStorage,
    pub description: HashDress,
    pub owner: String,
    pub challenge_key: String,
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelOutput {
    pub key: String,
    pub algo_key: String,
    pub in_model_key: String,
    pub storage: AlgoStorage,
    pub train_dataset: DatasetRef,
    pub owner: String,
    pub permissions: String,
}

/// A data manager together with the samples registered against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetOutput {
    pub data_manager: DataManagerOutput,
    pub train_data_sample_keys: Vec<String>,
    pub test_data_sample_keys: Vec<String>,
}
