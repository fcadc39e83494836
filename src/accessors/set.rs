//! Unordered sets, edited as a JSON array of strings.
//!
//! The array follows whatever order the store returned; it is not stable
//! across fetches. Duplicate entries in an edit collapse on write.

use super::{ValueCodec, decode_json, encode_json};
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::{Store, StoreError, WriteOp};

pub const DESCRIPTION: &str =
    "This is a JSON representation of the data type SET.\nEdit, but don't change its type!";

pub struct SetCodec;

impl ValueCodec for SetCodec {
    type Value = Vec<String>;
    const KIND: ValueKind = ValueKind::Set;

    fn encode(value: &Vec<String>) -> Result<Vec<u8>, EditError> {
        encode_json(Self::KIND, value)
    }

    fn decode(text: &[u8]) -> Result<Vec<String>, EditError> {
        decode_json(Self::KIND, text)
    }
}

pub fn fetch(store: &mut dyn Store, key: &str) -> Result<Vec<String>, StoreError> {
    store.get_set(key)
}

pub fn replace_ops(members: Vec<String>) -> Vec<WriteOp> {
    vec![WriteOp::Delete, WriteOp::AddSetMembers(members)]
}
