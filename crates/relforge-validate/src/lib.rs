//! Semantic validation: two passes over the graph that turn `#pragma db`
//! annotations and their combinations into either derived facts (id,
//! version, polymorphic root) or diagnostics.

mod diagnostics;
mod oracle;
mod pass1;
mod pass2;

pub use diagnostics::{Diagnostic, DiagnosticSink, ErrorKind, Severity};
pub use oracle::{ComparabilityOracle, DefaultOracle};

use relforge_naming::Options;
use relforge_semantics::SemanticUnit;

/// Runs both validation passes with the default comparability oracle and
/// returns the accumulated sink. Callers check `sink.failed()` before
/// proceeding to build the relational model; pass 1's derived annotations
/// (`polymorphic-root`, `optimistic-member`) are written even when errors
/// were found, since later diagnostics in pass 2 may depend on them being
/// present.
pub fn validate(unit: &mut SemanticUnit, options: &Options) -> DiagnosticSink {
    validate_with_oracle(unit, options, &DefaultOracle)
}

/// Like [`validate`], but with the `operator<` comparability check for
/// session-mode object ids answered by `oracle` instead of the
/// conservative built-in default. Tests exercise session-mode validation
/// by injecting a stub here in place of a real C++ front end.
#[tracing::instrument(skip_all, fields(db = %options.database))]
pub fn validate_with_oracle(
    unit: &mut SemanticUnit,
    options: &Options,
    oracle: &dyn ComparabilityOracle,
) -> DiagnosticSink {
    let mut sink = DiagnosticSink::new();
    pass1::run(unit, &mut sink, oracle);
    pass2::run(unit, options, &mut sink);
    tracing::debug!(errors = sink.error_count(), "validation complete");
    sink
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_naming::Database;
    use relforge_semantics::{AnnotationStore, AnnotationValue, Class, Member, SourceLoc, Type};

    fn mk_store(flags: &[&str]) -> AnnotationStore {
        let mut s = AnnotationStore::new();
        for f in flags {
            s.set(*f, AnnotationValue::Bool(true), SourceLoc::synthetic());
        }
        s
    }

    #[test]
    fn object_without_id_is_an_error() {
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
        let member = unit.add_member(Member {
            name: "name".into(),
            owner: class,
            ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(class).members = vec![member];

        let mut options = Options::default();
        options.database = Database::Common;
        let sink = validate(&mut unit, &options);
        assert!(sink.failed());
        assert!(sink
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("no data member designated as an object id")));
    }

    #[test]
    fn object_with_id_validates_cleanly() {
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
        let id_member = unit.add_member(Member {
            name: "id_".into(),
            owner: class,
            ty,
            annotations: mk_store(&["id"]),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(class).members = vec![id_member];

        let options = Options::default();
        let sink = validate(&mut unit, &options);
        assert!(!sink.failed());
    }

    #[test]
    fn optimistic_without_version_member_is_an_error() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let ty = unit.add_type(Type::Primitive("int".into()));
        let class = unit.add_class(Class {
            name: "Widget".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: mk_store(&["object", "optimistic"]),
            loc: SourceLoc::synthetic(),
        });
        let id_member = unit.add_member(Member {
            name: "id_".into(),
            owner: class,
            ty,
            annotations: mk_store(&["id"]),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(class).members = vec![id_member];

        let options = Options::default();
        let sink = validate(&mut unit, &options);
        assert!(sink
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("optimistic class without a version member")));
    }
}
