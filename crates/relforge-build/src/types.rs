//! Fallback primitive-to-SQL-type mapping, used when no `#pragma db type`
//! override (or per-database validator-set annotation) is present on a
//! member. The real per-database mapping tables live in `relforge-emit`;
//! this is only a conservative common-denominator default so the model
//! builder can produce a table even for members nobody customized.

use relforge_semantics::{MemberId, SemanticUnit, Type};

pub fn default_sql_type(unit: &SemanticUnit, member: MemberId) -> String {
    let ty = unit.utype(unit.member(member).ty);
    match unit.ty(ty) {
        Type::Primitive(name) => map_primitive(name),
        Type::Class(_) => "BIGINT".to_string(),
        Type::Array { .. } => "BLOB".to_string(),
        Type::Typedef { .. } | Type::Qualifier { .. } => unreachable!("utype unwraps these"),
    }
}

fn map_primitive(name: &str) -> String {
    match name {
        "bool" => "BOOLEAN",
        "char" | "signed char" | "unsigned char" => "SMALLINT",
        "short" | "unsigned short" => "SMALLINT",
        "int" | "unsigned int" => "INTEGER",
        "long" | "unsigned long" | "long long" | "unsigned long long" => "BIGINT",
        "float" => "REAL",
        "double" => "DOUBLE PRECISION",
        "std::string" | "std::wstring" => "TEXT",
        _ => "TEXT",
    }
    .to_string()
}
