//! Plain string values, edited as raw bytes.
//!
//! A scalar that already holds a JSON object or array is treated as
//! structured data: its edit must still parse as JSON. Any other scalar is
//! written back verbatim.

use super::ValueCodec;
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::{Store, StoreError};

pub struct ScalarCodec;

impl ValueCodec for ScalarCodec {
    type Value = Vec<u8>;
    const KIND: ValueKind = ValueKind::Scalar;

    fn encode(value: &Vec<u8>) -> Result<Vec<u8>, EditError> {
        Ok(value.clone())
    }

    fn decode(text: &[u8]) -> Result<Vec<u8>, EditError> {
        Ok(text.to_vec())
    }
}

/// Missing keys read as empty, the starting point for a new key.
pub fn fetch(store: &mut dyn Store, key: &str) -> Result<Vec<u8>, StoreError> {
    Ok(store.get_scalar(key)?.unwrap_or_default())
}

pub fn holds_structured_json(bytes: &[u8]) -> bool {
    matches!(
        serde_json::from_slice::<serde_json::Value>(bytes),
        Ok(serde_json::Value::Object(_) | serde_json::Value::Array(_))
    )
}

pub fn validate(original: &[u8], edited: &[u8]) -> Result<Vec<u8>, EditError> {
    if holds_structured_json(original) {
        serde_json::from_slice::<serde_json::Value>(edited).map_err(|source| {
            EditError::MalformedEdit {
                kind: ValueKind::Scalar,
                source,
            }
        })?;
    }
    ScalarCodec::decode(edited)
}
