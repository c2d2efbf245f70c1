//! Ordered name-to-binding scopes, used by namespaces and classes to
//! resolve members by name while preserving declaration order.

use indexmap::IndexMap;

/// An ordered mapping from name to zero or more bindings. Insertion order
/// is preserved; a name may bind more than once (overload-like shadowing),
/// and views iterate in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Scope<Id> {
    bindings: IndexMap<String, Vec<Id>>,
}

impl<Id: Copy> Scope<Id> {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, id: Id) {
        self.bindings.entry(name.into()).or_default().push(id);
    }

    pub fn lookup(&self, name: &str) -> &[Id] {
        self.bindings.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first binding for `name`, if any (the common case: unambiguous
    /// declarations).
    pub fn lookup_one(&self, name: &str) -> Option<Id> {
        self.lookup(name).first().copied()
    }

    /// All bindings, in declaration order, as `(name, id)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Id)> {
        self.bindings
            .iter()
            .flat_map(|(name, ids)| ids.iter().map(move |id| (name.as_str(), *id)))
    }

    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
