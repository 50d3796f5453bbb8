//! Content-addressed primary keys.
//!
//! Every entity is addressed by the content hash its submitter declares.
//! The registry trusts the declared hash; [`Key::digest`] exists for callers
//! that need to compute one from bytes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a primary key in hex characters (a SHA-256 digest).
pub const KEY_LEN: usize = 64;

/// Primary key of a registered entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(String);

impl Key {
    /// Parses a key, requiring exactly [`KEY_LEN`] hex characters.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != KEY_LEN {
            return Err(Error::InvalidKey {
                key: s.to_string(),
                reason: "expected 64 hexadecimal characters",
            });
        }
        if hex::decode(s).is_err() {
            return Err(Error::InvalidKey {
                key: s.to_string(),
                reason: "not hexadecimal",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Derives the primary key of an entity from its declared content hash.
    ///
    /// The hash is kept verbatim so the returned key compares equal to what
    /// the submitter sent.
    pub fn derive(declared_hash: &str) -> Result<Self> {
        Self::parse(declared_hash)
    }

    /// Computes the SHA-256 digest of `content` as a key.
    #[must_use]
    pub fn digest(content: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(content)))
    }

    /// Returns true if `s` would parse as a key.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        s.len() == KEY_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.0
    }
}
