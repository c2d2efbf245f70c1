//! Column traversal: flattens an object's (or composite's) members into
//! the column list a `SELECT`/`INSERT`/index definition needs, expanding
//! composite members into their nested columns and skipping inverse
//! object pointers, which never get their own storage on the owning side.

use relforge_naming::{public_name, NamePrefix, NamingContext};
use relforge_semantics::{Class, ClassId, ClassKind, Member, MemberId, SemanticUnit, Type};

/// A single flattened column produced by traversal: its owning member, the
/// derived column name, and whether it is the id column (always emitted
/// first by the relational model's column-ordering rule).
#[derive(Clone, Debug)]
pub struct ColumnRef {
    pub member: MemberId,
    pub name: String,
    pub is_id: bool,
}

pub trait ColumnVisitor {
    fn visit_column(&mut self, column: &ColumnRef) -> bool {
        let _ = column;
        true
    }

    /// Called once traversal of a composite/container member's columns
    /// completes, letting an emitter close out a `VALUES (...)` group or
    /// similar before moving to the next top-level member.
    fn flush(&mut self) {}
}

pub struct ColumnTraversal<'a> {
    unit: &'a SemanticUnit,
    naming: &'a NamingContext<'a>,
    id_member: Option<MemberId>,
    /// Object pointers that are inverse (the other side owns the foreign
    /// key) never appear in the flattened column list.
    ignore_inverse: bool,
}

impl<'a> ColumnTraversal<'a> {
    pub fn new(unit: &'a SemanticUnit, naming: &'a NamingContext<'a>) -> Self {
        Self {
            unit,
            naming,
            id_member: None,
            ignore_inverse: true,
        }
    }

    pub fn id_member(mut self, id: Option<MemberId>) -> Self {
        self.id_member = id;
        self
    }

    #[tracing::instrument(skip_all, fields(class = root.index()))]
    pub fn run(&self, root: ClassId, visitor: &mut impl ColumnVisitor) {
        self.traverse_class(root, &NamePrefix::new(), visitor);
        visitor.flush();
    }

    fn traverse_class(&self, class_id: ClassId, prefix: &NamePrefix, visitor: &mut impl ColumnVisitor) {
        let class: &Class = self.unit.class(class_id);
        if class.kind() == ClassKind::Other {
            return;
        }

        if class.kind() != ClassKind::View {
            for base in self.unit.bases(class_id) {
                self.traverse_class(base.base, prefix, visitor);
            }
        }

        for &member_id in &class.members {
            self.traverse_member(member_id, prefix, visitor);
        }
    }

    fn traverse_member(&self, member_id: MemberId, prefix: &NamePrefix, visitor: &mut impl ColumnVisitor) {
        let member: &Member = self.unit.member(member_id);
        if member.annotations.has("transient") {
            return;
        }

        if member.annotations.has("inverse") && self.ignore_inverse {
            return;
        }

        let utype = self.unit.utype(member.ty);

        if let Type::Class(class_id) = self.unit.ty(utype) {
            let class_id = *class_id;
            if self.unit.class(class_id).kind() == ClassKind::Composite {
                let child_prefix = prefix.push(&public_name(&member.name));
                self.traverse_class(class_id, &child_prefix, visitor);
                return;
            }
        }

        if member.annotations.has("container") {
            // Containers get their own table; they contribute no column
            // to the owning object's row.
            return;
        }

        let name = self.naming.column_name(member_id, prefix);
        let column = ColumnRef {
            member: member_id,
            name,
            is_id: self.id_member == Some(member_id),
        };
        visitor.visit_column(&column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_naming::{Database, Options};
    use relforge_semantics::{AnnotationStore, AnnotationValue, Class, Member, SourceLoc};

    fn mk_store(flags: &[&str]) -> AnnotationStore {
        let mut s = AnnotationStore::new();
        for f in flags {
            s.set(*f, AnnotationValue::Bool(true), SourceLoc::synthetic());
        }
        s
    }

    #[test]
    fn flattens_composite_members_and_skips_inverse_pointers() {
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
        let home = unit.add_member(Member {
            name: "home".into(),
            owner: root,
            ty: composite_ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        let friends = unit.add_member(Member {
            name: "friends".into(),
            owner: root,
            ty: prim,
            annotations: mk_store(&["inverse"]),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(root).members = vec![home, friends];

        let options = Options::default();
        let naming = NamingContext::new(&unit, &options, Database::Common);

        struct Collect(Vec<String>);
        impl ColumnVisitor for Collect {
            fn visit_column(&mut self, column: &ColumnRef) -> bool {
                self.0.push(column.name.clone());
                true
            }
        }

        let mut visitor = Collect(Vec::new());
        ColumnTraversal::new(&unit, &naming).run(root, &mut visitor);
        assert_eq!(visitor.0, vec!["home_street".to_string()]);
    }
}
