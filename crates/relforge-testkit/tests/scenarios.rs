//! End-to-end coverage for the generator's seed scenarios: one test per
//! scenario, each exercising validation, model building, and (where the
//! scenario is about schema evolution) the diff/migration pipeline
//! together rather than unit-testing any one crate in isolation.

use relforge_build::build_model;
use relforge_changelog::{diff, render};
use relforge_emit::registry_for;
use relforge_naming::{Database, NamingContext, Options};
use relforge_relational::{Column, Directive, Model, Table};
use relforge_testkit::fixtures;
use relforge_testkit::FixedOracle;
use relforge_validate::{validate_with_oracle, ErrorKind};

/// S1 — an auto-id object on PostgreSQL gets a `RETURNING` clause wired up
/// through the emitter registry, and its table has the id column first.
#[test]
fn s1_auto_id_object_on_pgsql() {
    let (mut unit, _class, _id, _name) = fixtures::person_auto_id();
    let options = Options::default();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(!sink.failed());

    let naming = NamingContext::new(&unit, &options, Database::Pgsql);
    let model = build_model(&unit, &naming, 1);

    let table = model.table("person").expect("person table");
    assert_eq!(table.columns[0].name, "id");
    assert!(table.primary_key.as_ref().unwrap().auto);

    let registry = registry_for(Database::Pgsql);
    assert_eq!(
        (registry.returning_clause)("id"),
        Some("RETURNING \"id\"".to_string())
    );
}

/// S2 — a composite member's columns carry the member name as a prefix, so
/// `home.street` becomes `home_street` rather than colliding with a
/// top-level `street` column.
#[test]
fn s2_composite_member_prefixes_its_columns() {
    let (mut unit, _user, _addr) = fixtures::user_with_composite_address();
    let options = Options::default();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(!sink.failed());

    let naming = NamingContext::new(&unit, &options, Database::Common);
    let model = build_model(&unit, &naming, 1);

    let table = model.table("user").expect("user table");
    assert!(table.column("home_street").is_some());
    assert!(table.column("home_city").is_some());
}

/// S3 — an optimistic object without a version member is rejected; the
/// same shape with a version member validates and derives the
/// `optimistic-member` annotation pass 1 is responsible for.
#[test]
fn s3_optimistic_object_requires_a_version_member() {
    let (mut unit, _class) = fixtures::optimistic_doc_missing_version();
    let options = Options::default();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(sink.diagnostics().iter().any(|d| {
        d.kind == ErrorKind::StructuralError && d.message.contains("optimistic class without a version member")
    }));

    let (mut unit, class) = fixtures::optimistic_doc();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(!sink.failed());
    assert!(unit.class(class).annotations.has("optimistic-member"));
}

/// S4 — a polymorphic hierarchy gets one table per concrete class rather
/// than a single shared table, and the derived class records the root's
/// `polymorphic-root` annotation.
#[test]
fn s4_polymorphic_hierarchy_gets_separate_tables() {
    let (mut unit, animal, dog) = fixtures::polymorphic_animal_dog();
    let options = Options::default();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(!sink.failed());
    assert!(unit.class(dog).annotations.has("polymorphic-root"));

    let naming = NamingContext::new(&unit, &options, Database::Common);
    let model = build_model(&unit, &naming, 1);

    assert!(model.table("animal").is_some());
    assert!(model.table("dog").is_some());
    let _ = animal;
}

/// S5 — a container of object pointers produces a foreign key, and on SQL
/// Server a deferrable one is omitted from the live constraint and left as
/// a comment instead, since the dialect can't express it.
#[test]
fn s5_deferrable_foreign_key_is_commented_on_mssql() {
    let (mut unit, a, _b) = fixtures::deferrable_fk_container();
    let options = Options::default();
    let sink = validate_with_oracle(&mut unit, &options, &FixedOracle(true));
    assert!(!sink.failed());

    let naming = NamingContext::new(&unit, &options, Database::Mssql);
    let model = build_model(&unit, &naming, 1);
    let a_table = model.table("a").unwrap();
    assert!(a_table.foreign_keys.is_empty(), "bs is a container, not a pointer member on a");

    let mut changeset = relforge_relational::Changeset::new(1);
    changeset.directives.push(Directive::AddForeignKey {
        table: "a".into(),
        name: "a_b_id_fk".into(),
        key: relforge_relational::ForeignKey {
            deferrable: relforge_relational::Deferrable::Deferred,
            referer: relforge_relational::Referer {
                columns: vec!["b_id".into()],
            },
            referenced: relforge_relational::Referenced {
                table: "b".into(),
                columns: vec!["id".into()],
            },
        },
    });
    let scripts = render(&changeset, &registry_for(Database::Mssql));
    assert!(scripts.post.contains("-- deferrable foreign key"));
    assert!(scripts.post.contains("[a_b_id_fk]"));

    let _ = a;
}

fn col(name: &str, ty: &str, null: bool) -> Column {
    Column {
        name: name.to_string(),
        ty: ty.to_string(),
        null,
    }
}

/// S6 — a changelog round-trip: `t(a, b)` evolves to `t(a, c)`, and the
/// resulting changeset is exactly a drop of `b` and an add of `c`, split
/// across pre/post the same way on every run (determinism, not just
/// correctness, is the point of this scenario).
#[test]
fn s6_changelog_round_trip_drops_and_adds_a_column() {
    let mut v1 = Model::new(1);
    let mut t1 = Table::new("t");
    t1.columns.push(col("a", "INTEGER", false));
    t1.columns.push(col("b", "TEXT", true));
    v1.tables.push(t1);

    let mut v2 = Model::new(2);
    let mut t2 = Table::new("t");
    t2.columns.push(col("a", "INTEGER", false));
    t2.columns.push(col("c", "BOOLEAN", false));
    v2.tables.push(t2);

    let changeset = diff(&v1, &v2, 2);
    assert_eq!(changeset.directives.len(), 2);
    assert!(changeset
        .directives
        .iter()
        .any(|d| matches!(d, Directive::DropColumn { column, .. } if column == "b")));
    assert!(changeset
        .directives
        .iter()
        .any(|d| matches!(d, Directive::AddColumn { column, .. } if column.name == "c")));

    let registry = registry_for(Database::Pgsql);
    let first = render(&changeset, &registry);
    let second = render(&changeset, &registry);
    assert!(relforge_testkit::matches_golden(&first.pre, &second.pre));
    assert!(relforge_testkit::matches_golden(&first.post, &second.post));
    assert!(first.pre.contains("ADD COLUMN"));
    assert!(first.post.contains("DROP COLUMN"));
    assert!(first.post.contains("SET NOT NULL"));
}
