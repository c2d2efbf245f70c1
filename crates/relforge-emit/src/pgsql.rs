//! PostgreSQL overrides: `RETURNING <id>` on auto-id inserts, and the OID
//! type codes used to build the parallel "statement types" arrays that
//! bind image columns to the wire protocol.

use relforge_naming::Database;

use crate::registry::{default_create_foreign_key, default_quote_ident, EmitterRegistry};

fn returning_clause(id_column: &str) -> Option<String> {
    Some(format!("RETURNING {}", default_quote_ident(id_column)))
}

pub fn registry() -> EmitterRegistry {
    EmitterRegistry {
        database: Database::Pgsql,
        supports_deferrable_fk: true,
        create_foreign_key: default_create_foreign_key,
        returning_clause,
        quote_ident: default_quote_ident,
    }
}

/// OID type codes for the SQL types this generator produces, used to
/// build the per-statement type arrays PostgreSQL's binary protocol needs.
pub fn oid_for(sql_type: &str) -> &'static str {
    match sql_type {
        "BOOLEAN" => "bool_oid",
        "SMALLINT" => "int2_oid",
        "INTEGER" => "int4_oid",
        "BIGINT" => "int8_oid",
        "REAL" => "float4_oid",
        "DOUBLE PRECISION" => "float8_oid",
        "TEXT" => "text_oid",
        _ => "text_oid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returning_clause_quotes_the_id_column() {
        let registry = registry();
        assert_eq!((registry.returning_clause)("id"), Some("RETURNING \"id\"".to_string()));
    }

    #[test]
    fn oid_for_maps_known_types() {
        assert_eq!(oid_for("BIGINT"), "int8_oid");
        assert_eq!(oid_for("TEXT"), "text_oid");
    }
}
