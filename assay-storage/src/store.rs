use crate::StorageResult;
use std::sync::Arc;

/// Point-lookup key-value store.
///
/// No range scans and no transactions are exposed; implementations that can
/// apply a batch atomically should override [`KvStore::put_batch`].
pub trait KvStore: Send + Sync {
    /// Returns the value stored at `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Stores `value` at `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Applies several writes. The default applies them one by one.
    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> StorageResult<()> {
        for (key, value) in writes {
            self.put(key, value)?;
        }
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> StorageResult<()> {
        (**self).put_batch(writes)
    }
}
