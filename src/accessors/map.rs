//! Hashes, edited as a JSON object of string fields.

use super::{ValueCodec, decode_json, encode_json};
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::{Store, StoreError, WriteOp};
use std::collections::BTreeMap;

pub const DESCRIPTION: &str =
    "This is a JSON representation of the data type HASH.\nEdit, but don't change its type!";

/// Fields are emitted in sorted order so the text is stable across fetches.
pub struct MapCodec;

impl ValueCodec for MapCodec {
    type Value = BTreeMap<String, String>;
    const KIND: ValueKind = ValueKind::Map;

    fn encode(value: &BTreeMap<String, String>) -> Result<Vec<u8>, EditError> {
        encode_json(Self::KIND, value)
    }

    fn decode(text: &[u8]) -> Result<BTreeMap<String, String>, EditError> {
        decode_json(Self::KIND, text)
    }
}

pub fn fetch(store: &mut dyn Store, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
    Ok(store.get_map(key)?.into_iter().collect())
}

pub fn replace_ops(fields: BTreeMap<String, String>) -> Vec<WriteOp> {
    vec![
        WriteOp::Delete,
        WriteOp::SetMapFields(fields.into_iter().collect()),
    ]
}
