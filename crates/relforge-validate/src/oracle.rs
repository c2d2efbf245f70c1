//! The comparability check a C++ front end would normally answer by
//! instantiating `operator<` against the host type and seeing if it
//! compiles. This crate has no compiler to ask, so the check is an
//! injectable oracle: production callers get a conservative default,
//! tests can swap in a stub that says yes or no on command.

use relforge_semantics::{SemanticUnit, Type, TypeId};

/// Answers whether a type used as a session-mode object id supports
/// `operator<`. Primitives always do; class types need the front end (or
/// a test stub) to say so explicitly.
pub trait ComparabilityOracle {
    fn is_comparable(&self, unit: &SemanticUnit, ty: TypeId) -> bool;
}

/// The conservative default: fundamental types are comparable, class
/// types are only comparable if annotated `comparable` (the front end
/// would set this after a successful `operator<` instantiation), and
/// container/array types never are.
pub struct DefaultOracle;

impl ComparabilityOracle for DefaultOracle {
    fn is_comparable(&self, unit: &SemanticUnit, ty: TypeId) -> bool {
        match unit.ty(unit.utype(ty)) {
            Type::Primitive(_) => true,
            Type::Class(class_id) => unit.class(*class_id).annotations.has("comparable"),
            Type::Array { .. } => false,
            Type::Typedef { .. } | Type::Qualifier { .. } => unreachable!("utype unwraps these"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_semantics::{AnnotationStore, Class, SourceLoc};

    #[test]
    fn primitives_are_always_comparable() {
        let mut unit = SemanticUnit::new();
        let ty = unit.add_type(Type::Primitive("long".into()));
        assert!(DefaultOracle.is_comparable(&unit, ty));
    }

    #[test]
    fn class_types_need_the_comparable_annotation() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let class = unit.add_class(Class {
            name: "Oid".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        let ty = unit.add_type(Type::Class(class));
        assert!(!DefaultOracle.is_comparable(&unit, ty));

        unit.class_mut(class).annotations.set(
            "comparable",
            relforge_semantics::AnnotationValue::Bool(true),
            SourceLoc::synthetic(),
        );
        assert!(DefaultOracle.is_comparable(&unit, ty));
    }
}
