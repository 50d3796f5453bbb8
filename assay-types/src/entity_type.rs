use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of entity the registry stores.
///
/// The serialized name doubles as the first attribute of every secondary
/// index entry, so it must stay stable once records exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    DataManager,
    DataSample,
    Objective,
    Challenge,
    Algo,
    Model,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::DataManager,
        EntityType::DataSample,
        EntityType::Objective,
        EntityType::Challenge,
        EntityType::Algo,
        EntityType::Model,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DataManager => "dataManager",
            Self::DataSample => "dataSample",
            Self::Objective => "objective",
            Self::Challenge => "challenge",
            Self::Algo => "algo",
            Self::Model => "model",
        }
    }

    /// Name of the `<type>~owner~key` index every entity type maintains.
    #[must_use]
    pub const fn owner_index(&self) -> &'static str {
        match self {
            Self::DataManager => "dataManager~owner~key",
            Self::DataSample => "dataSample~owner~key",
            Self::Objective => "objective~owner~key",
            Self::Challenge => "challenge~owner~key",
            Self::Algo => "algo~owner~key",
            Self::Model => "model~owner~key",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownEntityType(s.to_string()))
    }
}
