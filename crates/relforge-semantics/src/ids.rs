//! Newtype arena indices for each semantic node kind: nodes live in a
//! single owning arena and cross-reference each other by index, never by
//! raw pointer.

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Reconstructs an id from a raw arena index, e.g. one stored
            /// in a `NodeRef` annotation. Callers must only pass indices
            /// obtained from this same node kind's `index()`.
            pub fn from_index(index: u32) -> Self {
                Self(index)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

id_type!(
    /// Index of a `Namespace` node in a `SemanticUnit`.
    NamespaceId
);
id_type!(
    /// Index of a `Class` node in a `SemanticUnit`.
    ClassId
);
id_type!(
    /// Index of a `Member` node in a `SemanticUnit`.
    MemberId
);
id_type!(
    /// Index of a `Type` node in a `SemanticUnit`.
    TypeId
);
id_type!(
    /// Index of an `Inheritance` edge in a `SemanticUnit`.
    InheritanceId
);
