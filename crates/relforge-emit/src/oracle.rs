//! Oracle overrides: identifiers are upper-cased and double-quoted by
//! convention, and auto ids come from a sequence rather than a
//! `RETURNING` clause on the insert itself.

use relforge_naming::Database;

use crate::registry::{default_create_foreign_key, default_returning_clause, EmitterRegistry};

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.to_uppercase())
}

pub fn registry() -> EmitterRegistry {
    EmitterRegistry {
        database: Database::Oracle,
        supports_deferrable_fk: true,
        create_foreign_key: default_create_foreign_key,
        returning_clause: default_returning_clause,
        quote_ident,
    }
}
