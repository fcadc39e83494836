//! Sorted sets, edited as a JSON object mapping member to score.
//!
//! Members appear in the store's score order. Scores must be finite: JSON
//! has no spelling for `inf`, so such values cannot be edited.

use super::{ValueCodec, decode_json, encode_json};
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::{Store, StoreError, WriteOp};
use indexmap::IndexMap;

pub const DESCRIPTION: &str =
    "This is a JSON representation of the data type ZSET.\nEdit, but don't change its type!";

pub struct ScoredSetCodec;

impl ValueCodec for ScoredSetCodec {
    type Value = IndexMap<String, f64>;
    const KIND: ValueKind = ValueKind::ScoredSet;

    fn encode(value: &IndexMap<String, f64>) -> Result<Vec<u8>, EditError> {
        if let Some((member, score)) = value.iter().find(|(_, score)| !score.is_finite()) {
            return Err(EditError::EncodeError {
                kind: Self::KIND,
                reason: format!("member {:?} has score {}", member, score),
            });
        }
        encode_json(Self::KIND, value)
    }

    fn decode(text: &[u8]) -> Result<IndexMap<String, f64>, EditError> {
        decode_json(Self::KIND, text)
    }
}

pub fn fetch(store: &mut dyn Store, key: &str) -> Result<IndexMap<String, f64>, StoreError> {
    Ok(store.get_scored_set(key)?.into_iter().collect())
}

pub fn replace_ops(members: IndexMap<String, f64>) -> Vec<WriteOp> {
    vec![
        WriteOp::Delete,
        WriteOp::AddScoredMembers(members.into_iter().collect()),
    ]
}
