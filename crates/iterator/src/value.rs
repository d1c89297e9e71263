use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque candidate value flowing through an iterator tree.
///
/// Iterators only ever compare values for equality; ordering and any richer
/// semantics belong to the value store behind the leaf iterators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Numeric node or quad id as handed out by a store.
    Id(u64),
    /// Literal or IRI string.
    Str(CompactString),
}

impl Value {
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Value::Id(id) => Some(*id),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            Value::Id(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Id(id) => write!(f, "{id}"),
            Value::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<u64> for Value {
    fn from(id: u64) -> Self {
        Value::Id(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(CompactString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(CompactString::from(s))
    }
}
