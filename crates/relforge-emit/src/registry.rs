//! Per-database emitter dispatch. Rather than a trait-object hierarchy,
//! each database builds an explicit table of named entries — plain
//! function pointers — so the set of overridable behaviors is visible at
//! a glance and a test can swap one entry without mocking a trait.

use relforge_naming::Database;
use relforge_relational::{Deferrable, ForeignKey};

/// A foreign key rendered for a `CREATE TABLE`/`ALTER TABLE` statement, or
/// `None` when the database can't express it as a live constraint (it is
/// instead emitted as a SQL comment by the caller).
pub type CreateForeignKeyFn = fn(&str, &ForeignKey) -> Option<String>;
pub type ReturningClauseFn = fn(&str) -> Option<String>;
pub type QuoteIdentFn = fn(&str) -> String;

#[derive(Clone)]
pub struct EmitterRegistry {
    pub database: Database,
    pub supports_deferrable_fk: bool,
    pub create_foreign_key: CreateForeignKeyFn,
    /// `RETURNING <id>` (or equivalent) appended to an INSERT that needs
    /// the server-assigned auto id back; `None` where unsupported.
    pub returning_clause: ReturningClauseFn,
    pub quote_ident: QuoteIdentFn,
}

#[tracing::instrument(fields(db = %database))]
pub fn registry_for(database: Database) -> EmitterRegistry {
    tracing::debug!("resolved emitter registry");
    match database {
        Database::Mssql => crate::mssql::registry(),
        Database::Mysql => crate::mysql::registry(),
        Database::Oracle => crate::oracle::registry(),
        Database::Pgsql => crate::pgsql::registry(),
        Database::Sqlite => crate::sqlite::registry(),
        Database::Common => crate::common::registry(Database::Common),
    }
}

pub(crate) fn default_create_foreign_key(table: &str, fk: &ForeignKey) -> Option<String> {
    let _ = table;
    Some(format!(
        "FOREIGN KEY ({}) REFERENCES \"{}\" ({}){}",
        fk.referer.columns.join(", "),
        fk.referenced.table,
        fk.referenced.columns.join(", "),
        match fk.deferrable {
            Deferrable::Not => "",
            Deferrable::Deferred => " DEFERRABLE INITIALLY DEFERRED",
            Deferrable::Immediate => " DEFERRABLE INITIALLY IMMEDIATE",
        }
    ))
}

pub(crate) fn default_returning_clause(_id_column: &str) -> Option<String> {
    None
}

pub(crate) fn default_quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}
