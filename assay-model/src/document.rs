//! Persisted document envelope.
//!
//! Every record is stored as its JSON fields plus a `DocType` tag, so any
//! key in the shared key space can be resolved to its entity type.

use crate::{Entity, ModelError, ModelResult};
use assay_types::EntityType;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Envelope<'a, T> {
    #[serde(rename = "DocType")]
    doc_type: EntityType,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Deserialize)]
struct OwnedEnvelope<T> {
    #[serde(rename = "DocType")]
    doc_type: EntityType,
    #[serde(flatten)]
    body: T,
}

#[derive(Deserialize)]
struct Header {
    #[serde(rename = "DocType")]
    doc_type: EntityType,
}

/// Serializes `record` with its type tag.
pub fn encode<E: Entity>(record: &E) -> ModelResult<Vec<u8>> {
    let envelope = Envelope {
        doc_type: E::TYPE,
        body: record,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Reads only the type tag of a stored document.
pub fn doc_type(bytes: &[u8]) -> ModelResult<EntityType> {
    let header: Header = serde_json::from_slice(bytes)?;
    Ok(header.doc_type)
}

/// Decodes a stored document as `E`, rejecting documents of another type.
pub fn decode<E: Entity>(bytes: &[u8]) -> ModelResult<E> {
    let found = doc_type(bytes)?;
    if found != E::TYPE {
        return Err(ModelError::WrongType {
            expected: E::TYPE,
            found,
        });
    }
    let envelope: OwnedEnvelope<E> = serde_json::from_slice(bytes)?;
    debug_assert_eq!(envelope.doc_type, E::TYPE);
    Ok(envelope.body)
}
