//! MySQL overrides: no `RETURNING`, backtick-quoted identifiers, and
//! foreign keys are never deferrable (MySQL enforces them immediately).

use relforge_naming::Database;
use relforge_relational::ForeignKey;

use crate::registry::{default_returning_clause, EmitterRegistry};

fn quote_ident(name: &str) -> String {
    format!("`{}`", name)
}

fn create_foreign_key(_table: &str, fk: &ForeignKey) -> Option<String> {
    Some(format!(
        "FOREIGN KEY ({}) REFERENCES {} ({})",
        fk.referer.columns.join(", "),
        quote_ident(&fk.referenced.table),
        fk.referenced.columns.join(", ")
    ))
}

pub fn registry() -> EmitterRegistry {
    EmitterRegistry {
        database: Database::Mysql,
        supports_deferrable_fk: false,
        create_foreign_key,
        returning_clause: default_returning_clause,
        quote_ident,
    }
}
