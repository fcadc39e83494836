//! Per-kind fetch, validate and write.
//!
//! Each value kind has a module with a [`ValueCodec`] that turns the native
//! value into editable bytes and back, plus the store primitives used to read
//! and replace it. [`Accessor`] ties them together behind one exhaustive
//! `match` over [`ValueKind`].
//!
//! Decoding happens once. `fetch` returns the decoded value alongside its
//! text, `validate` returns the decoded edit as a [`StagedValue`], and
//! `write` consumes that value, so only well-typed data ever reaches the
//! store.

pub mod list;
pub mod map;
pub mod scalar;
pub mod scored_set;
pub mod set;

use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::store::Store;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

/// Serialize a native value to editable bytes and parse it back.
pub trait ValueCodec {
    type Value;
    const KIND: ValueKind;

    fn encode(value: &Self::Value) -> Result<Vec<u8>, EditError>;
    fn decode(text: &[u8]) -> Result<Self::Value, EditError>;
}

/// Pretty-printed JSON with two-space indentation and a trailing newline,
/// so editors that append a final newline on save do not register a change.
pub(crate) fn encode_json<T: Serialize>(
    kind: ValueKind,
    value: &T,
) -> Result<Vec<u8>, EditError> {
    let mut out = serde_json::to_vec_pretty(value).map_err(|e| EditError::EncodeError {
        kind,
        reason: e.to_string(),
    })?;
    out.push(b'\n');
    Ok(out)
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    kind: ValueKind,
    text: &[u8],
) -> Result<T, EditError> {
    serde_json::from_slice(text).map_err(|source| EditError::MalformedEdit { kind, source })
}

/// Decoded native value, produced by `fetch` or `validate` and consumed by
/// `write`.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedValue {
    Scalar(Vec<u8>),
    List(Vec<String>),
    Set(Vec<String>),
    Map(BTreeMap<String, String>),
    ScoredSet(IndexMap<String, f64>),
}

impl StagedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StagedValue::Scalar(_) => ValueKind::Scalar,
            StagedValue::List(_) => ValueKind::List,
            StagedValue::Set(_) => ValueKind::Set,
            StagedValue::Map(_) => ValueKind::Map,
            StagedValue::ScoredSet(_) => ValueKind::ScoredSet,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EditError> {
        match self {
            StagedValue::Scalar(bytes) => scalar::ScalarCodec::encode(bytes),
            StagedValue::List(items) => list::ListCodec::encode(items),
            StagedValue::Set(members) => set::SetCodec::encode(members),
            StagedValue::Map(fields) => map::MapCodec::encode(fields),
            StagedValue::ScoredSet(members) => scored_set::ScoredSetCodec::encode(members),
        }
    }
}

/// What `fetch` produced: the editable text and the value it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub text: Vec<u8>,
    pub value: StagedValue,
}

/// Fetch, validate and write bound to one [`ValueKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    kind: ValueKind,
    description: Option<&'static str>,
}

impl Accessor {
    pub const fn new(kind: ValueKind, description: Option<&'static str>) -> Self {
        Self { kind, description }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Instructions rendered as a comment header above the editable text.
    pub fn description(&self) -> Option<&'static str> {
        self.description.filter(|d| !d.is_empty())
    }

    /// Read the key. A missing key yields the kind's empty value.
    pub fn fetch(&self, store: &mut dyn Store, key: &str) -> Result<Fetched, EditError> {
        let value = match self.kind {
            ValueKind::Scalar => scalar::fetch(store, key).map(StagedValue::Scalar),
            ValueKind::List => list::fetch(store, key).map(StagedValue::List),
            ValueKind::Set => set::fetch(store, key).map(StagedValue::Set),
            ValueKind::Map => map::fetch(store, key).map(StagedValue::Map),
            ValueKind::ScoredSet => scored_set::fetch(store, key).map(StagedValue::ScoredSet),
        }
        .map_err(EditError::StoreReadError)?;
        let text = value.encode()?;
        debug!(key, kind = %self.kind, bytes = text.len(), "fetched");
        Ok(Fetched { text, value })
    }

    /// Parse the edited text into a value ready for [`Accessor::write`].
    ///
    /// `fetched` is the pre-edit state; scalars use it to decide whether the
    /// edit has to be valid JSON.
    pub fn validate(&self, fetched: &Fetched, edited: &[u8]) -> Result<StagedValue, EditError> {
        match self.kind {
            ValueKind::Scalar => scalar::validate(&fetched.text, edited).map(StagedValue::Scalar),
            ValueKind::List => list::ListCodec::decode(edited).map(StagedValue::List),
            ValueKind::Set => set::SetCodec::decode(edited).map(StagedValue::Set),
            ValueKind::Map => map::MapCodec::decode(edited).map(StagedValue::Map),
            ValueKind::ScoredSet => {
                scored_set::ScoredSetCodec::decode(edited).map(StagedValue::ScoredSet)
            }
        }
    }

    /// Store `value` under `key`. Composite kinds are replaced wholesale in a
    /// single atomic batch.
    pub fn write(
        &self,
        store: &mut dyn Store,
        key: &str,
        value: StagedValue,
    ) -> Result<(), EditError> {
        debug_assert_eq!(value.kind(), self.kind, "staged value from another accessor");
        match value {
            StagedValue::Scalar(bytes) => store.set_scalar(key, &bytes),
            StagedValue::List(items) => store.apply_batch(key, &list::replace_ops(items)),
            StagedValue::Set(members) => store.apply_batch(key, &set::replace_ops(members)),
            StagedValue::Map(fields) => store.apply_batch(key, &map::replace_ops(fields)),
            StagedValue::ScoredSet(members) => {
                store.apply_batch(key, &scored_set::replace_ops(members))
            }
        }
        .map_err(EditError::StoreWriteError)
    }
}
