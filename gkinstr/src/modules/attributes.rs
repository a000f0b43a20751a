//! Function attribute sets.
//!
//! Attributes are named string properties attached to a function and
//! consumed by later code generation stages. Keys are unique within a set;
//! setting an already-present kind overwrites its value rather than adding
//! a second entry, which makes repeated annotation runs observationally
//! idempotent.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Well-known attribute kind: optimization is disabled for this function.
///
/// Pass managers skip non-required transformation passes over functions
/// carrying this attribute (frontends attach it to every function when
/// compiling without optimizations).
pub const ATTR_OPTNONE: &str = "optnone";

/// A collection of named attributes attached to a single function.
///
/// Iteration order is the lexicographic order of attribute kinds, which
/// keeps diagnostics and printing deterministic.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionAttributes {
    entries: BTreeMap<String, String>,
}

impl FunctionAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. If the kind is already present its value is
    /// replaced; the set never holds two entries with the same kind.
    ///
    /// Returns `true` if the set changed (new kind, or new value for an
    /// existing kind).
    pub fn set(&mut self, kind: impl Into<String>, value: impl Into<String>) -> bool {
        let kind = kind.into();
        let value = value.into();
        match self.entries.get(&kind) {
            Some(existing) if *existing == value => false,
            _ => {
                self.entries.insert(kind, value);
                true
            }
        }
    }

    /// Returns true if an attribute of the given kind is present.
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Get the value of an attribute kind, if present.
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(String::as_str)
    }

    /// Remove an attribute kind. Returns the previous value if any.
    pub fn remove(&mut self, kind: &str) -> Option<String> {
        self.entries.remove(kind)
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(kind, value)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
