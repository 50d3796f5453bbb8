use crate::{KvStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory store. Batches are applied under a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, index entries included.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Copy of every entry, for inspection in tests and tooling.
    pub fn snapshot(&self) -> StorageResult<BTreeMap<String, Vec<u8>>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".into()))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> StorageResult<()> {
        let mut entries = self.lock()?;
        for (key, value) in writes {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
