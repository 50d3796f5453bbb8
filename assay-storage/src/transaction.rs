use crate::{KvStore, StorageResult};
use std::collections::BTreeMap;

/// A unit of work over a [`KvStore`].
///
/// Reads see the store plus this transaction's own staged writes. Nothing
/// reaches the store until [`Transaction::commit`], which hands every staged
/// write to [`KvStore::put_batch`] at once. Dropping an uncommitted
/// transaction discards its writes.
pub struct Transaction<'s, S: KvStore + ?Sized> {
    store: &'s S,
    staged: BTreeMap<String, Vec<u8>>,
}

impl<'s, S: KvStore + ?Sized> Transaction<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            staged: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        match self.staged.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.store.get(key),
        }
    }

    pub fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Stages a write; a later write to the same key replaces it.
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.staged.insert(key.into(), value);
    }

    pub fn is_staged(&self, key: &str) -> bool {
        self.staged.contains_key(key)
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Applies every staged write and returns how many keys were written.
    pub fn commit(self) -> StorageResult<usize> {
        let writes: Vec<(String, Vec<u8>)> = self.staged.into_iter().collect();
        if !writes.is_empty() {
            self.store.put_batch(&writes)?;
        }
        Ok(writes.len())
    }
}
