//! SQL Server overrides: no deferrable foreign keys, and identifiers are
//! bracket-quoted rather than double-quoted.

use relforge_naming::Database;
use relforge_relational::{Deferrable, ForeignKey};

use crate::registry::{default_returning_clause, EmitterRegistry};

fn create_foreign_key(_table: &str, fk: &ForeignKey) -> Option<String> {
    if fk.deferrable != Deferrable::Not {
        // SQL Server cannot express deferrable constraints; the caller
        // wraps the directive in a comment instead of a live constraint.
        return None;
    }
    Some(format!(
        "FOREIGN KEY ({}) REFERENCES {} ({})",
        fk.referer.columns.join(", "),
        quote_ident(&fk.referenced.table),
        fk.referenced.columns.join(", ")
    ))
}

fn quote_ident(name: &str) -> String {
    format!("[{}]", name)
}

pub fn registry() -> EmitterRegistry {
    EmitterRegistry {
        database: Database::Mssql,
        supports_deferrable_fk: false,
        create_foreign_key,
        returning_clause: default_returning_clause,
        quote_ident,
    }
}
