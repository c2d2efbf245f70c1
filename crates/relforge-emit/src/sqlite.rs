//! SQLite overrides: foreign keys are non-deferrable by default and
//! `ALTER TABLE ... ADD CONSTRAINT` isn't supported, so new foreign keys
//! can only be declared at table-creation time (the driver rebuilds the
//! table instead of altering it in place; that rebuild lives in the
//! migration planner, not here).

use relforge_naming::Database;

use crate::registry::{default_create_foreign_key, default_quote_ident, default_returning_clause, EmitterRegistry};

pub fn registry() -> EmitterRegistry {
    EmitterRegistry {
        database: Database::Sqlite,
        supports_deferrable_fk: false,
        create_foreign_key: default_create_foreign_key,
        returning_clause: default_returning_clause,
        quote_ident: default_quote_ident,
    }
}
