//! The JSON handoff format this binary reads in place of a real C++ front
//! end: a flat list of classes and members carrying the same `#pragma db`
//! flags the front end would already have folded into annotations. Kept
//! local to the binary so the library crates stay front-end agnostic.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use relforge_semantics::{
    AnnotationStore, AnnotationValue, Class, Member, SemanticUnit, SourceLoc, Type,
};

#[derive(Deserialize)]
pub struct UnitInput {
    pub classes: Vec<ClassInput>,
}

#[derive(Deserialize)]
pub struct ClassInput {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub string_annotations: HashMap<String, String>,
    #[serde(default)]
    pub members: Vec<MemberInput>,
}

#[derive(Deserialize)]
pub struct MemberInput {
    pub name: String,
    /// Either a primitive type name (`"long"`, `"std::string"`, ...) or the
    /// name of another class in this unit, to be resolved as a pointer or
    /// composite member depending on that class's own kind.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub string_annotations: HashMap<String, String>,
}

/// Builds a `SemanticUnit` from the parsed fixture. Classes and their
/// members are registered in two passes so member types can reference
/// classes declared later in the input.
pub fn build_unit(input: UnitInput) -> Result<SemanticUnit> {
    let mut unit = SemanticUnit::new();
    let ns = unit.global_namespace.expect("global namespace always exists");

    let mut class_ids = HashMap::new();
    for class in &input.classes {
        let mut annotations = AnnotationStore::new();
        for flag in &class.flags {
            annotations.set(flag.clone(), AnnotationValue::Bool(true), SourceLoc::synthetic());
        }
        for (key, value) in &class.string_annotations {
            annotations.set(key.clone(), AnnotationValue::Str(value.clone()), SourceLoc::synthetic());
        }

        let id = unit.add_class(Class {
            name: class.name.clone(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations,
            loc: SourceLoc::synthetic(),
        });
        class_ids.insert(class.name.clone(), id);
    }

    for class in &input.classes {
        let class_id = class_ids[&class.name];
        for base_name in &class.bases {
            let base_id = *class_ids
                .get(base_name)
                .with_context(|| format!("class `{}` has unknown base `{}`", class.name, base_name))?;
            let edge = unit.add_inheritance(relforge_semantics::Inheritance {
                derived: class_id,
                base: base_id,
                access: relforge_semantics::Access::Public,
                is_virtual: false,
            });
            unit.class_mut(class_id).bases.push(edge);
        }

        let mut member_ids = Vec::new();
        for member in &class.members {
            let ty = resolve_type(&mut unit, &class_ids, &member.ty);

            let mut annotations = AnnotationStore::new();
            for flag in &member.flags {
                annotations.set(flag.clone(), AnnotationValue::Bool(true), SourceLoc::synthetic());
            }
            for (key, value) in &member.string_annotations {
                annotations.set(key.clone(), AnnotationValue::Str(value.clone()), SourceLoc::synthetic());
            }

            member_ids.push(unit.add_member(Member {
                name: member.name.clone(),
                owner: class_id,
                ty,
                annotations,
                loc: SourceLoc::synthetic(),
            }));
        }
        unit.class_mut(class_id).members = member_ids;
    }

    Ok(unit)
}

fn resolve_type(
    unit: &mut SemanticUnit,
    class_ids: &HashMap<String, relforge_semantics::ClassId>,
    name: &str,
) -> relforge_semantics::TypeId {
    if let Some(&class_id) = class_ids.get(name) {
        unit.add_type(Type::Class(class_id))
    } else {
        unit.add_type(Type::Primitive(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_member_types_across_forward_references() {
        let json = r#"{
            "classes": [
                { "name": "Employer", "flags": ["object"], "members": [
                    { "name": "id_", "type": "long", "flags": ["id", "auto"] }
                ]},
                { "name": "Person", "flags": ["object"], "members": [
                    { "name": "id_", "type": "long", "flags": ["id", "auto"] },
                    { "name": "employer_", "type": "Employer", "flags": [] }
                ]}
            ]
        }"#;
        let input: UnitInput = serde_json::from_str(json).unwrap();
        let unit = build_unit(input).unwrap();
        assert_eq!(unit.class_ids().count(), 2);
    }
}
