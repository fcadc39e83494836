//! Accessor registration: maps the type name the store reports to the
//! [`Accessor`] that handles it.
//!
//! Adding a kind: add a [`ValueKind`] variant, an accessor module, and one
//! entry to `ACCESSORS`.

use crate::accessors::{Accessor, list, map, scored_set, set};
use crate::core::error::EditError;
use crate::core::kind::ValueKind;

static ACCESSORS: [Accessor; 5] = [
    Accessor::new(ValueKind::Scalar, None),
    Accessor::new(ValueKind::List, Some(list::DESCRIPTION)),
    Accessor::new(ValueKind::Set, Some(set::DESCRIPTION)),
    Accessor::new(ValueKind::Map, Some(map::DESCRIPTION)),
    Accessor::new(ValueKind::ScoredSet, Some(scored_set::DESCRIPTION)),
];

/// Immutable lookup table built once at startup.
#[derive(Debug, Clone, Copy)]
pub struct AccessorRegistry {
    accessors: &'static [Accessor],
}

impl Default for AccessorRegistry {
    fn default() -> Self {
        Self {
            accessors: &ACCESSORS,
        }
    }
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accessor for a reported type name, e.g. `"zset"`.
    pub fn lookup(&self, type_name: &str) -> Result<Accessor, EditError> {
        ValueKind::from_type_name(type_name)
            .and_then(|kind| self.accessors.iter().copied().find(|a| a.kind() == kind))
            .ok_or_else(|| EditError::UnsupportedKind(type_name.to_string()))
    }

    /// Like [`AccessorRegistry::lookup`], with an absent key treated as a
    /// scalar.
    pub fn resolve(&self, reported: Option<&str>) -> Result<Accessor, EditError> {
        self.lookup(reported.unwrap_or(ValueKind::Scalar.type_name()))
    }

    pub fn for_kind(&self, kind: ValueKind) -> Result<Accessor, EditError> {
        self.lookup(kind.type_name())
    }
}
