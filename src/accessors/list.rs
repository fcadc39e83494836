//! Ordered lists, edited as a JSON array of strings.

use super::{ValueCodec, decode_json, encode_json};
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::{Store, StoreError, WriteOp};

pub const DESCRIPTION: &str =
    "This is a JSON representation of the data type LIST.\nEdit, but don't change its type!";

pub struct ListCodec;

impl ValueCodec for ListCodec {
    type Value = Vec<String>;
    const KIND: ValueKind = ValueKind::List;

    fn encode(value: &Vec<String>) -> Result<Vec<u8>, EditError> {
        encode_json(Self::KIND, value)
    }

    fn decode(text: &[u8]) -> Result<Vec<String>, EditError> {
        decode_json(Self::KIND, text)
    }
}

pub fn fetch(store: &mut dyn Store, key: &str) -> Result<Vec<String>, StoreError> {
    store.get_list(key)
}

/// Delete, then push to the tail so the edited order is kept.
pub fn replace_ops(items: Vec<String>) -> Vec<WriteOp> {
    vec![WriteOp::Delete, WriteOp::PushList(items)]
}
