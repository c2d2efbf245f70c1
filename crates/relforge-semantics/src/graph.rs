//! The semantic graph arena: namespaces, classes, members, types, and
//! inheritance edges, all owned by a single `SemanticUnit` per translation
//! unit and cross-referenced by index.

use crate::annotation::AnnotationStore;
use crate::ids::{ClassId, InheritanceId, MemberId, NamespaceId, TypeId};
use crate::loc::SourceLoc;
use crate::scope::Scope;

/// A binding a namespace's scope can hold: either a nested namespace or a
/// class declared directly in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeBinding {
    Namespace(NamespaceId),
    Class(ClassId),
}

pub struct Namespace {
    pub name: String,
    pub enclosing: Option<NamespaceId>,
    pub scope: Scope<ScopeBinding>,
    pub annotations: AnnotationStore,
    pub loc: SourceLoc,
}

/// The four classifications a class can carry, derived purely from its
/// annotations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Object,
    View,
    Composite,
    Other,
}

pub fn class_kind(annotations: &AnnotationStore) -> ClassKind {
    if annotations.has("object") {
        ClassKind::Object
    } else if annotations.has("view") {
        ClassKind::View
    } else if annotations.has("value") && !annotations.has("simple") && !annotations.has("container")
    {
        ClassKind::Composite
    } else {
        ClassKind::Other
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

pub struct Inheritance {
    pub derived: ClassId,
    pub base: ClassId,
    pub access: Access,
    pub is_virtual: bool,
}

pub struct Class {
    pub name: String,
    pub enclosing: NamespaceId,
    /// Members in declaration order; composite and simple members are
    /// interleaved as declared, transient members included (the traversal
    /// framework, not the graph, skips them).
    pub members: Vec<MemberId>,
    /// Base classes in declaration order (`inherits_begin/end`).
    pub bases: Vec<InheritanceId>,
    /// Whether the C++ declaration itself is polymorphic (has a virtual
    /// function), independent of the `polymorphic` annotation.
    pub is_cxx_polymorphic: bool,
    pub annotations: AnnotationStore,
    pub loc: SourceLoc,
}

impl Class {
    pub fn kind(&self) -> ClassKind {
        class_kind(&self.annotations)
    }
}

pub struct Member {
    pub name: String,
    pub owner: ClassId,
    pub ty: TypeId,
    pub annotations: AnnotationStore,
    pub loc: SourceLoc,
}

/// The type-expression graph: primitives, class types (object pointers /
/// composite embeddings), typedef chains, cv-qualifiers, and arrays.
pub enum Type {
    Primitive(String),
    Class(ClassId),
    /// A typedef name wrapping an underlying type.
    Typedef { name: String, underlying: TypeId },
    Qualifier { underlying: TypeId, is_const: bool },
    Array { element: TypeId, size: Option<u64> },
}

/// The owning arena for one translation unit's semantic graph.
#[derive(Default)]
pub struct SemanticUnit {
    namespaces: Vec<Namespace>,
    classes: Vec<Class>,
    members: Vec<Member>,
    types: Vec<Type>,
    inheritances: Vec<Inheritance>,
    pub global_namespace: Option<NamespaceId>,
}

impl SemanticUnit {
    pub fn new() -> Self {
        let mut unit = Self::default();
        let global = unit.add_namespace(Namespace {
            name: String::new(),
            enclosing: None,
            scope: Scope::new(),
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.global_namespace = Some(global);
        unit
    }

    pub fn add_namespace(&mut self, ns: Namespace) -> NamespaceId {
        self.namespaces.push(ns);
        NamespaceId((self.namespaces.len() - 1) as u32)
    }

    pub fn add_class(&mut self, class: Class) -> ClassId {
        self.classes.push(class);
        ClassId((self.classes.len() - 1) as u32)
    }

    pub fn add_member(&mut self, member: Member) -> MemberId {
        self.members.push(member);
        MemberId((self.members.len() - 1) as u32)
    }

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId((self.types.len() - 1) as u32)
    }

    pub fn add_inheritance(&mut self, edge: Inheritance) -> InheritanceId {
        self.inheritances.push(edge);
        InheritanceId((self.inheritances.len() - 1) as u32)
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }
    pub fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        &mut self.namespaces[id.index()]
    }
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }
    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.index()]
    }
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.index()]
    }
    pub fn member_mut(&mut self, id: MemberId) -> &mut Member {
        &mut self.members[id.index()]
    }
    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }
    pub fn inheritance(&self, id: InheritanceId) -> &Inheritance {
        &self.inheritances[id.index()]
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len() as u32).map(ClassId)
    }

    pub fn namespace_ids(&self) -> impl Iterator<Item = NamespaceId> {
        (0..self.namespaces.len() as u32).map(NamespaceId)
    }

    /// Bases of `class` in declaration order (`inherits_begin/end`).
    pub fn bases(&self, class: ClassId) -> impl Iterator<Item = &Inheritance> {
        self.class(class)
            .bases
            .iter()
            .map(move |id| self.inheritance(*id))
    }

    /// Unwrap typedefs and cv-qualifiers down to the underlying primitive
    /// or class type.
    pub fn utype(&self, ty: TypeId) -> TypeId {
        match self.ty(ty) {
            Type::Typedef { underlying, .. } => self.utype(*underlying),
            Type::Qualifier { underlying, .. } => self.utype(*underlying),
            _ => ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationValue;

    #[test]
    fn class_kind_prefers_object_over_value() {
        let mut annotations = AnnotationStore::new();
        annotations.set("object", AnnotationValue::Bool(true), SourceLoc::synthetic());
        annotations.set("value", AnnotationValue::Bool(true), SourceLoc::synthetic());
        assert_eq!(class_kind(&annotations), ClassKind::Object);
    }

    #[test]
    fn composite_requires_value_without_simple_or_container() {
        let mut annotations = AnnotationStore::new();
        annotations.set("value", AnnotationValue::Bool(true), SourceLoc::synthetic());
        assert_eq!(class_kind(&annotations), ClassKind::Composite);

        annotations.set("simple", AnnotationValue::Bool(true), SourceLoc::synthetic());
        assert_eq!(class_kind(&annotations), ClassKind::Other);
    }

    #[test]
    fn utype_unwraps_typedefs_and_qualifiers() {
        let mut unit = SemanticUnit::new();
        let prim = unit.add_type(Type::Primitive("int".into()));
        let qual = unit.add_type(Type::Qualifier {
            underlying: prim,
            is_const: true,
        });
        let td = unit.add_type(Type::Typedef {
            name: "my_int".into(),
            underlying: qual,
        });
        assert!(matches!(unit.ty(unit.utype(td)), Type::Primitive(p) if p == "int"));
    }
}
