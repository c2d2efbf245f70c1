//! The typed annotation store: a uniform side-table for heterogeneous
//! metadata attached to any semantic node, populated by the (external)
//! `#pragma db` parser and by the validator's derived facts.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::loc::SourceLoc;
use crate::qname::QName;

/// The primitive value kinds an annotation can carry: one map per node
/// from string key to a tagged-union value carrying the primitive types
/// actually used.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Location(SourceLoc),
    QName(QName),
    StringSet(Vec<String>),
    /// An index/reference into the semantic arena (a `ClassId`, `MemberId`,
    /// ...) stored as an opaque integer so this crate doesn't need to know
    /// about every node kind that wants to annotate with a back-reference.
    NodeRef(u32),
}

macro_rules! accessor {
    ($variant:ident, $ty:ty, $as_name:ident, $into_name:ident) => {
        impl AnnotationValue {
            pub fn $as_name(&self) -> Option<&$ty> {
                match self {
                    AnnotationValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            pub fn $into_name(self) -> Option<$ty> {
                match self {
                    AnnotationValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

accessor!(Bool, bool, as_bool, into_bool);
accessor!(Int, i64, as_int, into_int);
accessor!(Str, String, as_str_value, into_str);
accessor!(Location, SourceLoc, as_location, into_location);
accessor!(QName, QName, as_qname, into_qname);
accessor!(StringSet, Vec<String>, as_string_set, into_string_set);
accessor!(NodeRef, u32, as_node_ref, into_node_ref);

impl AnnotationValue {
    fn type_name(&self) -> &'static str {
        match self {
            AnnotationValue::Bool(_) => "bool",
            AnnotationValue::Int(_) => "int",
            AnnotationValue::Str(_) => "string",
            AnnotationValue::Location(_) => "location",
            AnnotationValue::QName(_) => "qname",
            AnnotationValue::StringSet(_) => "string-set",
            AnnotationValue::NodeRef(_) => "node-ref",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("annotation key `{0}` is not present")]
    KeyMissing(String),
    #[error("annotation key `{key}` holds a `{actual}` value, not `{expected}`")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// One entry in the store: the value plus the location of the directive
/// (or inference) that produced it, used to resolve conflicting
/// annotations by "last source location wins" (e.g. `null` vs `not-null`).
#[derive(Clone, Debug)]
struct Entry {
    value: AnnotationValue,
    loc: SourceLoc,
}

/// Per-node typed annotation side-table. Annotations are freely mutated
/// during validation and name derivation; callers are expected to stop
/// mutating once emission begins (enforced by phase discipline in the
/// driver, not by locking here).
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    entries: IndexMap<String, Entry>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&AnnotationValue, AnnotationError> {
        self.entries
            .get(key)
            .map(|e| &e.value)
            .ok_or_else(|| AnnotationError::KeyMissing(key.to_string()))
    }

    pub fn loc(&self, key: &str) -> Option<&SourceLoc> {
        self.entries.get(key).map(|e| &e.loc)
    }

    pub fn set(&mut self, key: impl Into<String>, value: AnnotationValue, loc: SourceLoc) {
        self.entries.insert(key.into(), Entry { value, loc });
    }

    /// Insert only if `key` wasn't already present; used for cached
    /// computations, which must be idempotent and safe to recompute.
    pub fn set_cached(&mut self, key: impl Into<String>, value: AnnotationValue) {
        let key = key.into();
        self.entries
            .entry(key)
            .or_insert_with(|| Entry {
                value,
                loc: SourceLoc::synthetic(),
            });
    }

    pub fn remove(&mut self, key: &str) -> Option<AnnotationValue> {
        self.entries.shift_remove(key).map(|e| e.value)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, AnnotationError> {
        self.typed(key, |v| v.as_bool().copied(), "bool")
    }

    pub fn get_str(&self, key: &str) -> Result<&str, AnnotationError> {
        self.typed(key, |v| v.as_str_value().map(String::as_str), "string")
    }

    pub fn get_qname(&self, key: &str) -> Result<&QName, AnnotationError> {
        self.typed(key, AnnotationValue::as_qname, "qname")
    }

    pub fn get_node_ref(&self, key: &str) -> Result<u32, AnnotationError> {
        self.typed(key, |v| v.as_node_ref().copied(), "node-ref")
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        project: impl Fn(&'a AnnotationValue) -> Option<T>,
        expected: &'static str,
    ) -> Result<T, AnnotationError> {
        let value = self.get(key)?;
        project(value).ok_or_else(|| AnnotationError::TypeMismatch {
            key: key.to_string(),
            expected,
            actual: value.type_name(),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// A convenience map from node id to its annotation store, used by
/// components that don't want to embed a store inline on every node type.
pub type AnnotationTable<Id> = HashMap<Id, AnnotationStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_reported() {
        let store = AnnotationStore::new();
        assert_eq!(
            store.get("id"),
            Err(AnnotationError::KeyMissing("id".into()))
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let mut store = AnnotationStore::new();
        store.set("id", AnnotationValue::Bool(true), SourceLoc::synthetic());
        assert_eq!(
            store.get_str("id"),
            Err(AnnotationError::TypeMismatch {
                key: "id".into(),
                expected: "string",
                actual: "bool",
            })
        );
    }

    #[test]
    fn later_location_overwrites_earlier_value() {
        let mut store = AnnotationStore::new();
        store.set(
            "null",
            AnnotationValue::Bool(true),
            SourceLoc::new("a.hxx", 1, 1),
        );
        store.set(
            "null",
            AnnotationValue::Bool(false),
            SourceLoc::new("a.hxx", 5, 1),
        );
        assert_eq!(store.get_bool("null"), Ok(false));
        assert_eq!(store.loc("null").unwrap().line, 5);
    }
}
