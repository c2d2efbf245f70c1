//! Per-database SQL and C++ binding emission: a dispatch table per
//! database rather than a trait-object hierarchy, per-member image
//! binding codegen, and the PostgreSQL statement-type array helper.

mod binding;
mod common;
mod mssql;
mod mysql;
mod oracle;
mod pgsql;
mod registry;
mod sqlite;

pub use binding::{image_category, set_image_expr, ImageCategory};
pub use pgsql::oid_for as pgsql_oid_for;
pub use registry::{registry_for, CreateForeignKeyFn, EmitterRegistry, QuoteIdentFn, ReturningClauseFn};

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_naming::Database;
    use relforge_relational::{Deferrable, ForeignKey, Referenced, Referer};

    #[test]
    fn mssql_omits_deferrable_foreign_keys() {
        let registry = registry_for(Database::Mssql);
        let fk = ForeignKey {
            deferrable: Deferrable::Deferred,
            referer: Referer {
                columns: vec!["b_id".into()],
            },
            referenced: Referenced {
                table: "b".into(),
                columns: vec!["id".into()],
            },
        };
        assert!((registry.create_foreign_key)("a", &fk).is_none());
    }

    #[test]
    fn pgsql_supports_returning() {
        let registry = registry_for(Database::Pgsql);
        assert!((registry.returning_clause)("id").is_some());
    }
}
