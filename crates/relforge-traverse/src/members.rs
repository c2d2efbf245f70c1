//! Member traversal: walks an object, view, or composite's bases and
//! members in declaration order, recursing into composite members and
//! skipping transient ones, while tracking the running table/column name
//! prefix a nested composite or container member accumulates.

use relforge_naming::{public_name, NamePrefix};
use relforge_semantics::{Class, ClassId, ClassKind, Member, MemberId, SemanticUnit, Type};

/// Callbacks a member-traversal driver invokes for each kind of member it
/// encounters. All methods default to a no-op so a visitor only needs to
/// override the kinds it cares about.
pub trait MemberVisitor {
    fn visit_simple(&mut self, _unit: &SemanticUnit, _member: MemberId, _prefix: &NamePrefix) {}

    fn visit_pointer(
        &mut self,
        _unit: &SemanticUnit,
        _member: MemberId,
        _target: ClassId,
        _prefix: &NamePrefix,
    ) {
    }

    /// Called before descending into a composite member's own members.
    /// Returning `false` skips the descent (the member is still recorded
    /// as visited, but none of its sub-members are traversed).
    fn enter_composite(
        &mut self,
        _unit: &SemanticUnit,
        _member: Option<MemberId>,
        _composite: ClassId,
        _prefix: &NamePrefix,
    ) -> bool {
        true
    }

    fn leave_composite(&mut self, _unit: &SemanticUnit, _composite: ClassId) {}

    fn visit_container(&mut self, _unit: &SemanticUnit, _member: MemberId, _prefix: &NamePrefix) {}
}

/// Drives a `MemberVisitor` over `class_id`'s members, including inherited
/// ones. `traverse_poly_base` mirrors the "don't descend into polymorphic
/// bases by default" behavior: the root class is always fully traversed,
/// but a class reached only as a polymorphic base of another object is
/// skipped unless explicitly requested.
pub struct MemberTraversal<'a> {
    unit: &'a SemanticUnit,
    traverse_poly_base: bool,
}

impl<'a> MemberTraversal<'a> {
    pub fn new(unit: &'a SemanticUnit) -> Self {
        Self {
            unit,
            traverse_poly_base: false,
        }
    }

    pub fn traverse_poly_base(mut self, yes: bool) -> Self {
        self.traverse_poly_base = yes;
        self
    }

    #[tracing::instrument(skip_all, fields(class = root.index()))]
    pub fn run(&self, root: ClassId, visitor: &mut impl MemberVisitor) {
        self.traverse_class(root, true, &NamePrefix::new(), visitor);
    }

    fn traverse_class(
        &self,
        class_id: ClassId,
        top_level: bool,
        prefix: &NamePrefix,
        visitor: &mut impl MemberVisitor,
    ) {
        let class: &Class = self.unit.class(class_id);
        let kind = class.kind();

        if kind == ClassKind::Other {
            return;
        }

        if !top_level && !self.traverse_poly_base && class.is_cxx_polymorphic {
            return;
        }

        if kind != ClassKind::View {
            for base in self.unit.bases(class_id) {
                self.traverse_class(base.base, false, prefix, visitor);
            }
        }

        for &member_id in &class.members {
            self.traverse_member(member_id, prefix, visitor);
        }
    }

    fn traverse_member(&self, member_id: MemberId, prefix: &NamePrefix, visitor: &mut impl MemberVisitor) {
        let member: &Member = self.unit.member(member_id);
        if member.annotations.has("transient") {
            return;
        }

        let utype = self.unit.utype(member.ty);

        if let Type::Class(class_id) = self.unit.ty(utype) {
            let class_id = *class_id;
            match self.unit.class(class_id).kind() {
                ClassKind::Object => {
                    visitor.visit_pointer(self.unit, member_id, class_id, prefix);
                }
                ClassKind::Composite => {
                    let child_prefix = prefix.push(&public_name(&member.name));
                    if visitor.enter_composite(self.unit, Some(member_id), class_id, &child_prefix) {
                        self.traverse_class(class_id, false, &child_prefix, visitor);
                    }
                    visitor.leave_composite(self.unit, class_id);
                }
                _ => visitor.visit_simple(self.unit, member_id, prefix),
            }
        } else if member.annotations.has("container") {
            visitor.visit_container(self.unit, member_id, prefix);
        } else {
            visitor.visit_simple(self.unit, member_id, prefix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_semantics::{Access, AnnotationStore, AnnotationValue, Inheritance, SourceLoc};

    fn mk_store(flags: &[&str]) -> AnnotationStore {
        let mut s = AnnotationStore::new();
        for f in flags {
            s.set(*f, AnnotationValue::Bool(true), SourceLoc::synthetic());
        }
        s
    }

    #[test]
    fn skips_transient_members() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let ty = unit.add_type(Type::Primitive("int".into()));
        let class = unit.add_class(Class {
            name: "Widget".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: mk_store(&["object"]),
            loc: SourceLoc::synthetic(),
        });
        let kept = unit.add_member(Member {
            name: "count".into(),
            owner: class,
            ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        let skipped = unit.add_member(Member {
            name: "cache".into(),
            owner: class,
            ty,
            annotations: mk_store(&["transient"]),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(class).members = vec![kept, skipped];

        struct Collect(Vec<MemberId>);
        impl MemberVisitor for Collect {
            fn visit_simple(&mut self, _u: &SemanticUnit, m: MemberId, _p: &NamePrefix) {
                self.0.push(m);
            }
        }

        let mut visitor = Collect(Vec::new());
        MemberTraversal::new(&unit).run(class, &mut visitor);
        assert_eq!(visitor.0, vec![kept]);
    }

    #[test]
    fn recurses_into_composite_members_with_growing_prefix() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let prim = unit.add_type(Type::Primitive("std::string".into()));

        let composite = unit.add_class(Class {
            name: "Address".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: mk_store(&["value"]),
            loc: SourceLoc::synthetic(),
        });
        let street = unit.add_member(Member {
            name: "street".into(),
            owner: composite,
            ty: prim,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(composite).members = vec![street];

        let composite_ty = unit.add_type(Type::Class(composite));
        let root = unit.add_class(Class {
            name: "Person".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: mk_store(&["object"]),
            loc: SourceLoc::synthetic(),
        });
        let address = unit.add_member(Member {
            name: "home".into(),
            owner: root,
            ty: composite_ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(root).members = vec![address];

        struct Collect(Vec<(MemberId, String)>);
        impl MemberVisitor for Collect {
            fn visit_simple(&mut self, _u: &SemanticUnit, m: MemberId, p: &NamePrefix) {
                self.0.push((m, p.column_prefix()));
            }
        }

        let mut visitor = Collect(Vec::new());
        MemberTraversal::new(&unit).run(root, &mut visitor);
        assert_eq!(visitor.0, vec![(street, "home_".to_string())]);
    }

    #[test]
    fn does_not_descend_into_polymorphic_base_by_default() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let ty = unit.add_type(Type::Primitive("int".into()));

        let base = unit.add_class(Class {
            name: "Base".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: true,
            annotations: mk_store(&["object", "polymorphic"]),
            loc: SourceLoc::synthetic(),
        });
        let base_member = unit.add_member(Member {
            name: "x".into(),
            owner: base,
            ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(base).members = vec![base_member];

        let derived = unit.add_class(Class {
            name: "Derived".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: true,
            annotations: mk_store(&["object"]),
            loc: SourceLoc::synthetic(),
        });
        let edge = unit.add_inheritance(Inheritance {
            derived,
            base,
            access: Access::Public,
            is_virtual: false,
        });
        unit.class_mut(derived).bases = vec![edge];

        struct Collect(Vec<MemberId>);
        impl MemberVisitor for Collect {
            fn visit_simple(&mut self, _u: &SemanticUnit, m: MemberId, _p: &NamePrefix) {
                self.0.push(m);
            }
        }

        let mut visitor = Collect(Vec::new());
        MemberTraversal::new(&unit).run(derived, &mut visitor);
        assert!(visitor.0.is_empty());

        let mut visitor_full = Collect(Vec::new());
        MemberTraversal::new(&unit)
            .traverse_poly_base(true)
            .run(derived, &mut visitor_full);
        assert_eq!(visitor_full.0, vec![base_member]);
    }
}
