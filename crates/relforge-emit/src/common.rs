//! Common-database defaults: behavior shared by every concrete database
//! unless it overrides a specific entry.

use relforge_naming::Database;

use crate::registry::{default_create_foreign_key, default_quote_ident, default_returning_clause, EmitterRegistry};

pub fn registry(database: Database) -> EmitterRegistry {
    EmitterRegistry {
        database,
        supports_deferrable_fk: true,
        create_foreign_key: default_create_foreign_key,
        returning_clause: default_returning_clause,
        quote_ident: default_quote_ident,
    }
}
