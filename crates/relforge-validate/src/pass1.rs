//! Pass 1: per-class structural validation — id and version member
//! resolution, polymorphic root/base consistency, and base-kind checks for
//! composites and views. Pass 1 must complete (and record its derived
//! facts as annotations) before pass 2 can check cross-cutting relational
//! consistency.

use relforge_semantics::{AnnotationValue, ClassId, ClassKind, MemberId, SemanticUnit, SourceLoc};

use crate::diagnostics::{DiagnosticSink, ErrorKind};
use crate::oracle::ComparabilityOracle;

pub fn run(unit: &mut SemanticUnit, sink: &mut DiagnosticSink, oracle: &dyn ComparabilityOracle) {
    let class_ids: Vec<ClassId> = unit.class_ids().collect();
    for class_id in class_ids {
        match unit.class(class_id).kind() {
            ClassKind::Object => validate_object(unit, class_id, sink, oracle),
            ClassKind::View => validate_view(unit, class_id, sink),
            ClassKind::Composite => validate_composite(unit, class_id, sink),
            ClassKind::Other => {}
        }
    }
}

/// Finds the id member and the version member among `class_id`'s direct
/// members, reporting "multiple object id members" / "multiple version
/// members" if more than one of either is found.
fn special_members(
    unit: &SemanticUnit,
    class_id: ClassId,
    sink: &mut DiagnosticSink,
) -> (Option<MemberId>, Option<MemberId>) {
    let mut id = None;
    let mut version = None;

    for &member_id in &unit.class(class_id).members {
        let member = unit.member(member_id);
        if member.annotations.has("id") {
            if id.is_some() {
                sink.error(ErrorKind::StructuralError, member.loc.clone(), "multiple object id members");
            } else {
                id = Some(member_id);
            }
        }
        if member.annotations.has("version") {
            if version.is_some() {
                sink.error(ErrorKind::StructuralError, member.loc.clone(), "multiple version members");
            } else {
                version = Some(member_id);
            }
        }
    }

    (id, version)
}

fn validate_object(
    unit: &mut SemanticUnit,
    class_id: ClassId,
    sink: &mut DiagnosticSink,
    oracle: &dyn ComparabilityOracle,
) {
    let class_loc = unit.class(class_id).loc.clone();

    if unit.class(class_id).members.is_empty() {
        sink.error(ErrorKind::StructuralError, class_loc.clone(), "no persistent data members in the class");
    }

    let (id, version) = special_members(unit, class_id, sink);

    let poly_root = resolve_polymorphic_root(unit, class_id, sink);
    let is_polymorphic_decl = unit.class(class_id).annotations.has("polymorphic");

    match id {
        None if poly_root.is_none() => {
            sink.error(ErrorKind::StructuralError, class_loc.clone(), "no data member designated as an object id");
        }
        Some(id_member) => {
            let m = unit.member(id_member);
            if m.annotations.has("readonly") {
                sink.error(ErrorKind::SemanticError, m.loc.clone(), "object id should not be declared readonly");
            }
            if m.annotations.get_bool("null").unwrap_or(false) {
                sink.error(ErrorKind::SemanticError, m.loc.clone(), "object id member cannot be null");
            }
            if m.annotations.has("inverse") {
                sink.error(ErrorKind::SemanticError, m.loc.clone(), "object id cannot be declared inverse");
            }
            if m.annotations.has("default") {
                sink.error(ErrorKind::SemanticError, m.loc.clone(), "object id cannot have a default value");
            }
            if m.annotations.has("section") {
                sink.error(ErrorKind::SemanticError, m.loc.clone(), "object id cannot belong to a section");
            }
            if unit.class(class_id).annotations.has("session") && !oracle.is_comparable(unit, m.ty) {
                sink.error(
                    ErrorKind::SemanticError,
                    m.loc.clone(),
                    "session mode requires an id type with operator< and none was found",
                );
            }
        }
        None => {}
    }

    if let Some(version_member) = version {
        let (owner_is_self, version_loc) = {
            let m = unit.member(version_member);
            (m.owner == class_id, m.loc.clone())
        };
        if owner_is_self && !unit.class(class_id).annotations.has("optimistic") {
            sink.error(
                ErrorKind::SemanticError,
                version_loc.clone(),
                "version data member in a class not declared optimistic",
            );
        }
        if unit.class(class_id).annotations.has("readonly") {
            sink.error(ErrorKind::SemanticError, class_loc.clone(), "optimistic class cannot be readonly");
        }
        if unit.member(version_member).annotations.has("section") {
            sink.error(ErrorKind::SemanticError, version_loc.clone(), "version member cannot belong to a section");
        }
        unit.class_mut(class_id)
            .annotations
            .set("optimistic-member", AnnotationValue::NodeRef(version_member.index() as u32), version_loc);
    } else if unit.class(class_id).annotations.has("optimistic") {
        sink.error(ErrorKind::StructuralError, class_loc.clone(), "optimistic class without a version member");
    }

    if is_polymorphic_decl && poly_root.is_none() {
        unit.class_mut(class_id).annotations.set(
            "polymorphic-root",
            AnnotationValue::NodeRef(class_id.index() as u32),
            class_loc.clone(),
        );
        if id.is_none() {
            sink.error(ErrorKind::StructuralError, class_loc.clone(), "polymorphic class without an object id");
        }
        if !unit.class(class_id).is_cxx_polymorphic {
            sink.error(
                ErrorKind::SemanticError,
                class_loc,
                "non-polymorphic class (class without virtual functions) cannot be declared polymorphic",
            );
        }
    } else if let Some(root) = poly_root {
        unit.class_mut(class_id).annotations.set(
            "polymorphic-root",
            AnnotationValue::NodeRef(root.index() as u32),
            class_loc,
        );
    }
}

/// Walks direct bases looking for a polymorphic one. More than one
/// distinct polymorphic base is an error (diamond inheritance through two
/// unrelated polymorphic hierarchies).
fn resolve_polymorphic_root(
    unit: &SemanticUnit,
    class_id: ClassId,
    sink: &mut DiagnosticSink,
) -> Option<ClassId> {
    let mut root: Option<ClassId> = None;
    let bases: Vec<ClassId> = unit.bases(class_id).map(|e| e.base).collect();
    for base in bases {
        if let Some(r) = base_polymorphic_root(unit, base) {
            match root {
                None => root = Some(r),
                Some(existing) if existing != r => {
                    sink.error(
                        ErrorKind::StructuralError,
                        unit.class(class_id).loc.clone(),
                        "persistent class derives from multiple polymorphic bases",
                    );
                }
                _ => {}
            }
        }
    }
    root
}

fn base_polymorphic_root(unit: &SemanticUnit, class_id: ClassId) -> Option<ClassId> {
    unit.class(class_id)
        .annotations
        .get_node_ref("polymorphic-root")
        .ok()
        .map(ClassId::from_index)
}

fn validate_view(unit: &SemanticUnit, class_id: ClassId, sink: &mut DiagnosticSink) {
    let class_loc = unit.class(class_id).loc.clone();
    if unit.class(class_id).members.is_empty() {
        sink.error(ErrorKind::StructuralError, class_loc, "no persistent data members in the class");
    }
    for &member_id in &unit.class(class_id).members {
        let m = unit.member(member_id);
        if m.annotations.has("id") {
            sink.error(
                ErrorKind::StructuralError,
                m.loc.clone(),
                "view type data member cannot be designated as an object id",
            );
        }
        if m.annotations.has("version") {
            sink.error(
                ErrorKind::StructuralError,
                m.loc.clone(),
                "view type data member cannot be designated as a version member",
            );
        }
    }
    for base in unit.bases(class_id) {
        let base_kind = unit.class(base.base).kind();
        if base_kind != ClassKind::Composite {
            sink.error(ErrorKind::StructuralError, class_loc_of(unit, class_id), "base class is a view or object type");
        }
    }
}

fn validate_composite(unit: &SemanticUnit, class_id: ClassId, sink: &mut DiagnosticSink) {
    let class_loc = unit.class(class_id).loc.clone();
    if unit.class(class_id).members.is_empty() {
        sink.error(ErrorKind::StructuralError, class_loc, "no persistent data members in the class");
    }
    for &member_id in &unit.class(class_id).members {
        let m = unit.member(member_id);
        if m.annotations.has("id") {
            sink.error(
                ErrorKind::StructuralError,
                m.loc.clone(),
                "value type data member cannot be designated as an object id",
            );
        }
        if m.annotations.has("version") {
            sink.error(
                ErrorKind::StructuralError,
                m.loc.clone(),
                "value type data member cannot be designated as a version member",
            );
        }
    }
    for base in unit.bases(class_id) {
        let base_kind = unit.class(base.base).kind();
        if base_kind != ClassKind::Composite {
            sink.error(ErrorKind::StructuralError, class_loc_of(unit, class_id), "base class is a view or object type");
        }
    }
}

fn class_loc_of(unit: &SemanticUnit, class_id: ClassId) -> SourceLoc {
    unit.class(class_id).loc.clone()
}
