//! Reference types embedded in entity records.

use crate::{Error, Key, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A content hash plus the off-ledger address its content can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HashDress {
    pub hash: String,
    pub storage_address: String,
}

impl HashDress {
    pub fn new(hash: impl Into<String>, storage_address: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            storage_address: storage_address.into(),
        }
    }
}

/// A named [`HashDress`], used for objective metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HashDressName {
    pub name: String,
    pub hash: String,
    pub storage_address: String,
}

/// A data manager and the samples drawn from it.
///
/// Submitted as the composite string `"<dataManagerKey>:<sampleKey>,<sampleKey>"`.
/// Spaces in the sample list are ignored; sample order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetRef {
    pub data_manager_key: String,
    pub data_sample_keys: Vec<String>,
}

impl DatasetRef {
    /// Parses the composite `"key:sample1,sample2"` form.
    ///
    /// Sample keys must be distinct.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDataset {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (manager, samples) = input
            .split_once(':')
            .ok_or_else(|| invalid("expected '<dataManagerKey>:<sampleKey>,...'"))?;
        let manager = manager.trim();
        if !Key::is_valid(manager) {
            return Err(invalid("data manager key is not a 64-character hex string"));
        }

        let stripped = samples.replace(' ', "");
        let data_sample_keys: Vec<String> = stripped.split(',').map(str::to_string).collect();
        if let Some(bad) = data_sample_keys.iter().find(|k| !Key::is_valid(k)) {
            return Err(invalid(&format!(
                "sample key {bad:?} is not a 64-character hex string"
            )));
        }
        let mut seen = BTreeSet::new();
        if let Some(repeated) = data_sample_keys.iter().find(|k| !seen.insert(k.as_str())) {
            return Err(invalid(&format!("sample key {repeated} is listed more than once")));
        }

        Ok(Self {
            data_manager_key: manager.to_string(),
            data_sample_keys,
        })
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.data_manager_key,
            self.data_sample_keys.join(",")
        )
    }
}
