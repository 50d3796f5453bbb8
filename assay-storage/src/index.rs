//! Composite secondary indexes over a point-lookup store.
//!
//! An index is named `<entityType>~<dimension>~key` and every entry carries
//! one attribute per name segment, e.g. `["algo", owner, algoKey]`.
//!
//! Two kinds of record are written per entry:
//!
//! - the composite key itself (`\0<index>\0<attr>\0…\0`), marking the entry;
//! - a posting list for every proper prefix of the attributes, holding the
//!   sorted set of entity keys below that prefix. Listing "all algos" reads
//!   the `["algo"]` posting list; listing "algos of owner X" reads
//!   `["algo", X]`.
//!
//! Keys produced here start with U+0000, which never begins a primary key.
//!
//! Posting lists are stored whole. Adding an entry reads and rewrites the
//! list of every prefix, so registering under a type holding N keys writes
//! O(N) bytes, and every registration of that type touches the same
//! `[type]` key. A host that detects write conflicts per key will serialize
//! registrations of one type on it. Sharding the top-level list, or
//! replacing posting lists with per-entry keys and a range scan, would lift
//! both costs.

use crate::{KvStore, StorageError, StorageResult, Transaction};
use std::collections::BTreeSet;
use tracing::debug;

const SEPARATOR: char = '\u{0}';
const POSTINGS_NAMESPACE: &str = "~postings";

/// Number of attributes an index name declares.
pub fn arity(index: &str) -> usize {
    index.split('~').count()
}

/// Encodes the composite key of a full index entry.
pub fn composite_key(index: &str, attributes: &[&str]) -> StorageResult<String> {
    check_name(index)?;
    check_attributes(attributes)?;
    if attributes.len() != arity(index) {
        return Err(StorageError::Index(format!(
            "index {index} expects {} attributes, got {}",
            arity(index),
            attributes.len()
        )));
    }
    Ok(encode(&[index], attributes))
}

fn posting_key(index: &str, prefix: &[&str]) -> String {
    encode(&[POSTINGS_NAMESPACE, index], prefix)
}

fn encode(head: &[&str], attributes: &[&str]) -> String {
    let mut key = String::new();
    for part in head.iter().chain(attributes) {
        key.push(SEPARATOR);
        key.push_str(part);
    }
    key.push(SEPARATOR);
    key
}

fn check_name(index: &str) -> StorageResult<()> {
    if index.is_empty() || index.contains(SEPARATOR) || index.split('~').any(str::is_empty) {
        return Err(StorageError::Index(format!("malformed index name {index:?}")));
    }
    Ok(())
}

fn check_attributes(attributes: &[&str]) -> StorageResult<()> {
    if let Some(bad) = attributes.iter().find(|a| a.is_empty() || a.contains(SEPARATOR)) {
        return Err(StorageError::Index(format!(
            "index attribute {bad:?} is empty or contains U+0000"
        )));
    }
    Ok(())
}

fn decode_postings(bytes: Option<Vec<u8>>) -> StorageResult<BTreeSet<String>> {
    match bytes {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Ok(BTreeSet::new()),
    }
}

/// Stages an index entry in `tx`.
///
/// The last attribute is the entity key added to every prefix's posting list.
/// Adding an entry that already exists is a no-op.
pub fn add_index<S: KvStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    index: &str,
    attributes: &[&str],
) -> StorageResult<()> {
    let entry = composite_key(index, attributes)?;
    let Some((entity_key, _)) = attributes.split_last() else {
        return Err(StorageError::Index(format!("index {index} entry has no attributes")));
    };

    for depth in 1..attributes.len() {
        let key = posting_key(index, &attributes[..depth]);
        let mut postings = decode_postings(tx.get(&key)?)?;
        if postings.insert((*entity_key).to_string()) {
            tx.put(key, serde_json::to_vec(&postings)?);
        }
    }
    tx.put(entry, vec![0]);
    debug!(index, key = *entity_key, "staged index entry");
    Ok(())
}

/// Returns the entity keys under `prefix`, in lexicographic order.
///
/// `prefix` holds between one and `arity - 1` leading attributes.
pub fn list_keys<S: KvStore + ?Sized>(
    store: &S,
    index: &str,
    prefix: &[&str],
) -> StorageResult<Vec<String>> {
    check_name(index)?;
    check_attributes(prefix)?;
    if prefix.is_empty() || prefix.len() >= arity(index) {
        return Err(StorageError::Index(format!(
            "index {index} lists by 1 to {} leading attributes, got {}",
            arity(index) - 1,
            prefix.len()
        )));
    }
    let postings = decode_postings(store.get(&posting_key(index, prefix))?)?;
    Ok(postings.into_iter().collect())
}

/// Returns true if the full entry exists.
pub fn contains<S: KvStore + ?Sized>(
    store: &S,
    index: &str,
    attributes: &[&str],
) -> StorageResult<bool> {
    Ok(store.get(&composite_key(index, attributes)?)?.is_some())
}
