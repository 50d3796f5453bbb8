//! Registration inputs.
//!
//! Callers submit an ordered list of strings; [`InputRecord::FIELDS`] names
//! the position of every field. All fields stay strings until validation has
//! passed, so a malformed hash is a validation failure, not a decoding one.

use crate::validation::{split_list, Check, Rule, ValidationLimits};
use crate::{ModelError, ModelResult};
use assay_types::{DatasetRef, EntityType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed registration input decoded from positional string arguments.
pub trait InputRecord: Serialize + DeserializeOwned {
    /// Entity type this input registers.
    const ENTITY: EntityType;
    /// Field names in positional order.
    const FIELDS: &'static [&'static str];

    /// The declarative rules [`crate::validation::validate`] evaluates.
    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>>;

    /// Maps positional arguments onto the record's fields.
    ///
    /// Every input field is a string, so once the arity matches the mapping
    /// only fails with [`ModelError::Decoding`] if an implementor adds a
    /// field serde cannot build from a JSON string.
    fn from_args(args: &[String]) -> ModelResult<Self> {
        if args.len() != Self::FIELDS.len() {
            return Err(ModelError::ArgumentCount {
                fields: Self::FIELDS,
                got: args.len(),
            });
        }
        let object: serde_json::Map<String, Value> = Self::FIELDS
            .iter()
            .zip(args)
            .map(|(field, arg)| ((*field).to_string(), Value::String(arg.clone())))
            .collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| ModelError::Decoding {
            entity: Self::ENTITY,
            reason: e.to_string(),
        })
    }

    /// Inverse of [`InputRecord::from_args`].
    fn to_args(&self) -> ModelResult<Vec<String>> {
        let value = serde_json::to_value(self)?;
        Self::FIELDS
            .iter()
            .map(|field| match value.get(field) {
                Some(Value::String(arg)) => Ok(arg.clone()),
                _ => Err(ModelError::Decoding {
                    entity: Self::ENTITY,
                    reason: format!("field {field} does not serialize to a string"),
                }),
            })
            .collect()
    }
}

fn name_check(limits: &ValidationLimits) -> Check {
    Check::Length {
        min: 1,
        max: limits.max_name_length,
    }
}

fn permissions_check(limits: &ValidationLimits) -> Check {
    Check::OneOf(limits.allowed_permissions.clone())
}

// ── DataManager ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataManagerInput {
    pub name: String,
    pub opener_hash: String,
    pub opener_storage_address: String,
    #[serde(rename = "Type")]
    pub data_type: String,
    pub description_hash: String,
    pub description_storage_address: String,
    pub objective_key: String,
    pub permissions: String,
}

impl InputRecord for DataManagerInput {
    const ENTITY: EntityType = EntityType::DataManager;
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "OpenerHash",
        "OpenerStorageAddress",
        "Type",
        "DescriptionHash",
        "DescriptionStorageAddress",
        "ObjectiveKey",
        "Permissions",
    ];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new("Name", |i: &Self| i.name.as_str(), name_check(limits)),
            Rule::new("OpenerHash", |i: &Self| i.opener_hash.as_str(), Check::Hex64),
            Rule::new(
                "OpenerStorageAddress",
                |i: &Self| i.opener_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new(
                "Type",
                |i: &Self| i.data_type.as_str(),
                Check::Length { min: 1, max: 30 },
            ),
            Rule::new(
                "DescriptionHash",
                |i: &Self| i.description_hash.as_str(),
                Check::Hex64,
            ),
            Rule::new(
                "DescriptionStorageAddress",
                |i: &Self| i.description_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new("ObjectiveKey", |i: &Self| i.objective_key.as_str(), Check::Empty)
                .with_message("must be empty; it is set when an objective is registered"),
            Rule::new(
                "Permissions",
                |i: &Self| i.permissions.as_str(),
                permissions_check(limits),
            ),
        ]
    }
}

// ── DataSample ───────────────────────────────────────────────────

/// Registers one or more samples sharing data managers and test-only flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSampleInput {
    /// Comma-separated sample hashes.
    pub hashes: String,
    /// Comma-separated data manager keys.
    pub data_manager_keys: String,
    pub test_only: String,
}

impl DataSampleInput {
    pub fn hashes(&self) -> Vec<String> {
        split_list(&self.hashes)
    }

    pub fn data_manager_keys(&self) -> Vec<String> {
        split_list(&self.data_manager_keys)
    }

    pub fn is_test_only(&self) -> bool {
        self.test_only == "true"
    }
}

impl InputRecord for DataSampleInput {
    const ENTITY: EntityType = EntityType::DataSample;
    const FIELDS: &'static [&'static str] = &["Hashes", "DataManagerKeys", "TestOnly"];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new(
                "Hashes",
                |i: &Self| i.hashes.as_str(),
                Check::Hex64List {
                    max: limits.max_batch_size,
                },
            ),
            Rule::new(
                "DataManagerKeys",
                |i: &Self| i.data_manager_keys.as_str(),
                Check::Hex64List {
                    max: limits.max_batch_size,
                },
            ),
            Rule::new("TestOnly", |i: &Self| i.test_only.as_str(), Check::Boolean),
        ]
    }
}

// ── Objective ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectiveInput {
    pub name: String,
    pub description_hash: String,
    pub description_storage_address: String,
    pub metrics_name: String,
    pub metrics_hash: String,
    pub metrics_storage_address: String,
    /// `"<dataManagerKey>:<sampleKey>,..."`
    pub test_dataset: String,
    pub permissions: String,
}

impl ObjectiveInput {
    pub fn test_dataset(&self) -> ModelResult<DatasetRef> {
        Ok(DatasetRef::parse(&self.test_dataset)?)
    }
}

impl InputRecord for ObjectiveInput {
    const ENTITY: EntityType = EntityType::Objective;
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "DescriptionHash",
        "DescriptionStorageAddress",
        "MetricsName",
        "MetricsHash",
        "MetricsStorageAddress",
        "TestDataset",
        "Permissions",
    ];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new("Name", |i: &Self| i.name.as_str(), name_check(limits)),
            Rule::new(
                "DescriptionHash",
                |i: &Self| i.description_hash.as_str(),
                Check::Hex64,
            ),
            Rule::new(
                "DescriptionStorageAddress",
                |i: &Self| i.description_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new(
                "MetricsName",
                |i: &Self| i.metrics_name.as_str(),
                name_check(limits),
            ),
            Rule::new("MetricsHash", |i: &Self| i.metrics_hash.as_str(), Check::Hex64),
            Rule::new(
                "MetricsStorageAddress",
                |i: &Self| i.metrics_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new("TestDataset", |i: &Self| i.test_dataset.as_str(), Check::Dataset),
            Rule::new(
                "Permissions",
                |i: &Self| i.permissions.as_str(),
                permissions_check(limits),
            ),
        ]
    }
}

// ── Challenge ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChallengeInput {
    pub name: String,
    pub description_hash: String,
    pub description_storage_address: String,
    pub objective_key: String,
    pub permissions: String,
}

impl InputRecord for ChallengeInput {
    const ENTITY: EntityType = EntityType::Challenge;
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "DescriptionHash",
        "DescriptionStorageAddress",
        "ObjectiveKey",
        "Permissions",
    ];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new("Name", |i: &Self| i.name.as_str(), name_check(limits)),
            Rule::new(
                "DescriptionHash",
                |i: &Self| i.description_hash.as_str(),
                Check::Hex64,
            ),
            Rule::new(
                "DescriptionStorageAddress",
                |i: &Self| i.description_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new("ObjectiveKey", |i: &Self| i.objective_key.as_str(), Check::Hex64),
            Rule::new(
                "Permissions",
                |i: &Self| i.permissions.as_str(),
                permissions_check(limits),
            ),
        ]
    }
}

// ── Algo ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlgoInput {
    pub name: String,
    /// Hash of the algorithm archive; becomes the key.
    pub hash: String,
    pub storage_address: String,
    pub description_hash: String,
    pub description_storage_address: String,
    /// Empty when the algo is not submitted to a challenge.
    pub challenge_key: String,
    pub permissions: String,
}

impl InputRecord for AlgoInput {
    const ENTITY: EntityType = EntityType::Algo;
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "Hash",
        "StorageAddress",
        "DescriptionHash",
        "DescriptionStorageAddress",
        "ChallengeKey",
        "Permissions",
    ];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new("Name", |i: &Self| i.name.as_str(), name_check(limits)),
            Rule::new("Hash", |i: &Self| i.hash.as_str(), Check::Hex64),
            Rule::new(
                "StorageAddress",
                |i: &Self| i.storage_address.as_str(),
                Check::Url,
            ),
            Rule::new(
                "DescriptionHash",
                |i: &Self| i.description_hash.as_str(),
                Check::Hex64,
            ),
            Rule::new(
                "DescriptionStorageAddress",
                |i: &Self| i.description_storage_address.as_str(),
                Check::Url,
            ),
            Rule::new(
                "ChallengeKey",
                |i: &Self| i.challenge_key.as_str(),
                Check::OptionalHex64,
            ),
            Rule::new(
                "Permissions",
                |i: &Self| i.permissions.as_str(),
                permissions_check(limits),
            ),
        ]
    }
}

// ── Model ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelInput {
    pub algo_key: String,
    /// Hash of the trained model file; becomes the key.
    pub hash: String,
    pub storage_address: String,
    /// `"<dataManagerKey>:<sampleKey>,..."`
    pub train_dataset: String,
    /// Model this one was fine-tuned from, if any.
    pub in_model_key: String,
    pub permissions: String,
}

impl ModelInput {
    pub fn train_dataset(&self) -> ModelResult<DatasetRef> {
        Ok(DatasetRef::parse(&self.train_dataset)?)
    }
}

impl InputRecord for ModelInput {
    const ENTITY: EntityType = EntityType::Model;
    const FIELDS: &'static [&'static str] = &[
        "AlgoKey",
        "Hash",
        "StorageAddress",
        "TrainDataset",
        "InModelKey",
        "Permissions",
    ];

    fn rules(limits: &ValidationLimits) -> Vec<Rule<Self>> {
        vec![
            Rule::new("AlgoKey", |i: &Self| i.algo_key.as_str(), Check::Hex64),
            Rule::new("Hash", |i: &Self| i.hash.as_str(), Check::Hex64),
            Rule::new(
                "StorageAddress",
                |i: &Self| i.storage_address.as_str(),
                Check::Url,
            ),
            Rule::new(
                "TrainDataset",
                |i: &Self| i.train_dataset.as_str(),
                Check::Dataset,
            ),
            Rule::new(
                "InModelKey",
                |i: &Self| i.in_model_key.as_str(),
                Check::OptionalHex64,
            ),
            Rule::new(
                "Permissions",
                |i: &Self| i.permissions.as_str(),
                permissions_check(limits),
            ),
        ]
    }
}
