//! Semantic-graph fixtures standing in for a real C++ front end's output,
//! one builder per seed scenario so scenario tests read as a one-line
//! "arrange" instead of forty lines of arena plumbing.

use relforge_semantics::{
    Access, AnnotationStore, AnnotationValue, Class, ClassId, Inheritance, Member, MemberId,
    SemanticUnit, SourceLoc, Type, TypeId,
};

fn flags(names: &[&str]) -> AnnotationStore {
    let mut store = AnnotationStore::new();
    for name in names {
        store.set(*name, AnnotationValue::Bool(true), SourceLoc::synthetic());
    }
    store
}

fn add_class(unit: &mut SemanticUnit, name: &str, annotations: AnnotationStore) -> ClassId {
    let ns = unit.global_namespace.unwrap();
    unit.add_class(Class {
        name: name.to_string(),
        enclosing: ns,
        members: Vec::new(),
        bases: Vec::new(),
        is_cxx_polymorphic: false,
        annotations,
        loc: SourceLoc::synthetic(),
    })
}

fn add_member(
    unit: &mut SemanticUnit,
    owner: ClassId,
    name: &str,
    ty: TypeId,
    member_flags: &[&str],
) -> MemberId {
    unit.add_member(Member {
        name: name.to_string(),
        owner,
        ty,
        annotations: flags(member_flags),
        loc: SourceLoc::synthetic(),
    })
}

fn prim(unit: &mut SemanticUnit, name: &str) -> TypeId {
    unit.add_type(Type::Primitive(name.to_string()))
}

/// S1 — `person{ unsigned long id; std::string name; }`, auto id, no base.
pub fn person_auto_id() -> (SemanticUnit, ClassId, MemberId, MemberId) {
    let mut unit = SemanticUnit::new();
    let class = add_class(&mut unit, "person", flags(&["object"]));
    let ulong = prim(&mut unit, "unsigned long");
    let string = prim(&mut unit, "std::string");
    let id = add_member(&mut unit, class, "id", ulong, &["id", "auto"]);
    let name = add_member(&mut unit, class, "name", string, &[]);
    unit.class_mut(class).members = vec![id, name];
    (unit, class, id, name)
}

/// S2 — composite `addr{ street; city; }` embedded in `user{ home; }`.
pub fn user_with_composite_address() -> (SemanticUnit, ClassId, ClassId) {
    let mut unit = SemanticUnit::new();
    let addr = add_class(&mut unit, "addr", flags(&["value"]));
    let string = prim(&mut unit, "std::string");
    let street = add_member(&mut unit, addr, "street", string, &[]);
    let city = add_member(&mut unit, addr, "city", string, &[]);
    unit.class_mut(addr).members = vec![street, city];

    let user = add_class(&mut unit, "user", flags(&["object"]));
    let long = prim(&mut unit, "long");
    let id = add_member(&mut unit, user, "id", long, &["id", "auto"]);
    let addr_ty = unit.add_type(Type::Class(addr));
    let home = add_member(&mut unit, user, "home", addr_ty, &[]);
    unit.class_mut(user).members = vec![id, home];
    (unit, user, addr)
}

/// S3 — `doc{ id; ver; body; }` with `optimistic` and `version` on `ver`.
pub fn optimistic_doc() -> (SemanticUnit, ClassId) {
    let mut unit = SemanticUnit::new();
    let class = add_class(&mut unit, "doc", flags(&["object", "optimistic"]));
    let long = prim(&mut unit, "long");
    let string = prim(&mut unit, "std::string");
    let id = add_member(&mut unit, class, "id", long, &["id", "auto"]);
    let ver = add_member(&mut unit, class, "ver", long, &["version"]);
    let body = add_member(&mut unit, class, "body", string, &[]);
    unit.class_mut(class).members = vec![id, ver, body];
    (unit, class)
}

/// `doc` without its version member, used to exercise the rejection half
/// of S3.
pub fn optimistic_doc_missing_version() -> (SemanticUnit, ClassId) {
    let mut unit = SemanticUnit::new();
    let class = add_class(&mut unit, "doc", flags(&["object", "optimistic"]));
    let long = prim(&mut unit, "long");
    let id = add_member(&mut unit, class, "id", long, &["id", "auto"]);
    unit.class_mut(class).members = vec![id];
    (unit, class)
}

/// S4 — polymorphic `animal{ id; }` base, `dog: animal {}` derived.
pub fn polymorphic_animal_dog() -> (SemanticUnit, ClassId, ClassId) {
    let mut unit = SemanticUnit::new();
    let animal = add_class(&mut unit, "animal", flags(&["object", "polymorphic"]));
    let long = prim(&mut unit, "long");
    let id = add_member(&mut unit, animal, "id", long, &["id", "auto"]);
    unit.class_mut(animal).members = vec![id];
    unit.class_mut(animal).is_cxx_polymorphic = true;

    let dog = add_class(&mut unit, "dog", flags(&["object"]));
    let edge = unit.add_inheritance(Inheritance {
        derived: dog,
        base: animal,
        access: Access::Public,
        is_virtual: false,
    });
    unit.class_mut(dog).bases.push(edge);
    let string = prim(&mut unit, "std::string");
    let breed = add_member(&mut unit, dog, "breed", string, &[]);
    unit.class_mut(dog).members = vec![breed];
    (unit, animal, dog)
}

/// S5 — `a{ id; bs: vector<b*>; }`, `b{ id; }`, for the SQL Server
/// deferrable-foreign-key scenario.
pub fn deferrable_fk_container() -> (SemanticUnit, ClassId, ClassId) {
    let mut unit = SemanticUnit::new();
    let b = add_class(&mut unit, "b", flags(&["object"]));
    let long = prim(&mut unit, "long");
    let b_id = add_member(&mut unit, b, "id", long, &["id", "auto"]);
    unit.class_mut(b).members = vec![b_id];

    let a = add_class(&mut unit, "a", flags(&["object"]));
    let a_id = add_member(&mut unit, a, "id", long, &["id", "auto"]);
    let b_ptr = unit.add_type(Type::Class(b));
    let array_ty = unit.add_type(Type::Array {
        element: b_ptr,
        size: None,
    });
    let bs = add_member(&mut unit, a, "bs", array_ty, &["container"]);
    unit.class_mut(a).members = vec![a_id, bs];
    (unit, a, b)
}
