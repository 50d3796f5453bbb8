//! Registry configuration, read from a `registry.toml` file.
//!
//! ```toml
//! [registry]
//! allowed_permissions = ["all"]
//! max_name_length = 100
//! max_batch_size = 500
//! ```

use assay_model::ValidationLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Tunables applied to every registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Values accepted in `Permissions` fields.
    pub allowed_permissions: Vec<String>,
    /// Upper bound on entity and metric names, in characters.
    pub max_name_length: usize,
    /// Upper bound on samples per data sample registration.
    pub max_batch_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let limits = ValidationLimits::default();
        Self {
            allowed_permissions: limits.allowed_permissions,
            max_name_length: limits.max_name_length,
            max_batch_size: limits.max_batch_size,
        }
    }
}

/// Raw TOML structure matching the registry.toml format.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    registry: RegistryConfig,
}

impl RegistryConfig {
    /// Parses the `[registry]` table of a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        Ok(toml::from_str::<ConfigFile>(contents)?.registry)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning if the file is missing or unreadable.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No registry config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(config) => {
                    info!("Loaded registry config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse registry config {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read registry config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Validation limits derived from this configuration.
    pub fn limits(&self) -> ValidationLimits {
        ValidationLimits {
            max_name_length: self.max_name_length,
            max_batch_size: self.max_batch_size,
            allowed_permissions: self.allowed_permissions.clone(),
        }
    }
}
