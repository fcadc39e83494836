//! The closed set of value shapes the editor understands.

use std::fmt;

/// Store-side value shape of a key.
///
/// A key that does not exist resolves to [`ValueKind::Scalar`], which is also
/// the kind a new key is created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Plain string value, edited verbatim.
    Scalar,
    /// Ordered list of strings.
    List,
    /// Unordered set of unique strings.
    Set,
    /// Field to string mapping.
    Map,
    /// Member to score mapping, ordered by score.
    ScoredSet,
}

impl ValueKind {
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Scalar,
        ValueKind::List,
        ValueKind::Set,
        ValueKind::Map,
        ValueKind::ScoredSet,
    ];

    /// Name the server reports from `TYPE` for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Scalar => "string",
            ValueKind::List => "list",
            ValueKind::Set => "set",
            ValueKind::Map => "hash",
            ValueKind::ScoredSet => "zset",
        }
    }

    pub fn from_type_name(name: &str) -> Option<ValueKind> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }

    pub fn is_composite(self) -> bool {
        self != ValueKind::Scalar
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
