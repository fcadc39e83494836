//! In-process [`Store`] with the same semantics as the Redis primitives the
//! editor relies on. Every committed mutation is recorded so callers can
//! assert exactly what was (or was not) sent to the store.

use crate::core::store::{Store, StoreError, WriteOp};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryValue {
    Scalar(Vec<u8>),
    List(Vec<String>),
    Set(BTreeSet<String>),
    Map(BTreeMap<String, String>),
    /// Kept sorted by `(score, member)`.
    ScoredSet(Vec<(String, f64)>),
    /// A value of a type the editor does not support, e.g. `stream`.
    Opaque(String),
}

impl MemoryValue {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryValue::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryValue::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn scored_set<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        for (member, score) in members {
            zadd(&mut entries, member.into(), score);
        }
        MemoryValue::ScoredSet(entries)
    }

    fn type_name(&self) -> &str {
        match self {
            MemoryValue::Scalar(_) => "string",
            MemoryValue::List(_) => "list",
            MemoryValue::Set(_) => "set",
            MemoryValue::Map(_) => "hash",
            MemoryValue::ScoredSet(_) => "zset",
            MemoryValue::Opaque(name) => name,
        }
    }
}

/// A committed write, as seen by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetScalar { key: String },
    Batch { key: String, ops: Vec<WriteOp> },
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, MemoryValue>,
    mutations: Vec<Mutation>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: MemoryValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<&MemoryValue> {
        self.values.get(key)
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Make every read primitive fail as if the connection dropped.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every write primitive fail without committing anything.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection reset by peer".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("connection reset by peer".into()));
        }
        Ok(())
    }
}

fn zadd(entries: &mut Vec<(String, f64)>, member: String, score: f64) {
    entries.retain(|(m, _)| *m != member);
    entries.push((member, score));
    entries.sort_by(|(ma, sa), (mb, sb)| sa.total_cmp(sb).then_with(|| ma.cmp(mb)));
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType(key.to_string())
}

fn apply_op(
    values: &mut HashMap<String, MemoryValue>,
    key: &str,
    op: &WriteOp,
) -> Result<(), StoreError> {
    if op.is_empty_recreate() {
        return Ok(());
    }
    match op {
        WriteOp::Delete => {
            values.remove(key);
        }
        WriteOp::PushList(items) => {
            match values
                .entry(key.to_string())
                .or_insert_with(|| MemoryValue::List(Vec::new()))
            {
                MemoryValue::List(list) => list.extend(items.iter().cloned()),
                _ => return Err(wrong_type(key)),
            }
        }
        WriteOp::AddSetMembers(members) => {
            match values
                .entry(key.to_string())
                .or_insert_with(|| MemoryValue::Set(BTreeSet::new()))
            {
                MemoryValue::Set(set) => set.extend(members.iter().cloned()),
                _ => return Err(wrong_type(key)),
            }
        }
        WriteOp::SetMapFields(fields) => {
            match values
                .entry(key.to_string())
                .or_insert_with(|| MemoryValue::Map(BTreeMap::new()))
            {
                MemoryValue::Map(map) => map.extend(fields.iter().cloned()),
                _ => return Err(wrong_type(key)),
            }
        }
        WriteOp::AddScoredMembers(members) => {
            match values
                .entry(key.to_string())
                .or_insert_with(|| MemoryValue::ScoredSet(Vec::new()))
            {
                MemoryValue::ScoredSet(entries) => {
                    for (member, score) in members {
                        zadd(entries, member.clone(), *score);
                    }
                }
                _ => return Err(wrong_type(key)),
            }
        }
    }
    Ok(())
}

impl Store for MemoryStore {
    fn kind_of(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        Ok(self.values.get(key).map(|v| v.type_name().to_string()))
    }

    fn get_scalar(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_read()?;
        match self.values.get(key) {
            None => Ok(None),
            Some(MemoryValue::Scalar(bytes)) => Ok(Some(bytes.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn get_list(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        self.check_read()?;
        match self.values.get(key) {
            None => Ok(Vec::new()),
            Some(MemoryValue::List(items)) => Ok(items.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn get_set(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        self.check_read()?;
        match self.values.get(key) {
            None => Ok(Vec::new()),
            Some(MemoryValue::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn get_map(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        self.check_read()?;
        match self.values.get(key) {
            None => Ok(Vec::new()),
            Some(MemoryValue::Map(fields)) => Ok(fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn get_scored_set(&mut self, key: &str) -> Result<Vec<(String, f64)>, StoreError> {
        self.check_read()?;
        match self.values.get(key) {
            None => Ok(Vec::new()),
            Some(MemoryValue::ScoredSet(entries)) => Ok(entries.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn set_scalar(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check_write()?;
        self.values
            .insert(key.to_string(), MemoryValue::Scalar(value.to_vec()));
        self.mutations.push(Mutation::SetScalar {
            key: key.to_string(),
        });
        Ok(())
    }

    fn apply_batch(&mut self, key: &str, ops: &[WriteOp]) -> Result<(), StoreError> {
        self.check_write()?;
        // Work on a copy so a failing op leaves nothing behind.
        let mut staged = self.values.clone();
        for op in ops {
            apply_op(&mut staged, key, op)?;
        }
        self.values = staged;
        self.mutations.push(Mutation::Batch {
            key: key.to_string(),
            ops: ops.to_vec(),
        });
        Ok(())
    }
}
