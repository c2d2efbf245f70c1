//! Per-member image binding: the snippet of generated C++ that connects a
//! member's in-memory image slot to the database's bind API, dispatched
//! on the member's underlying primitive category.

use relforge_naming::Database;
use relforge_semantics::{MemberId, SemanticUnit, Type};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageCategory {
    Integer,
    Float,
    Numeric,
    Date,
    Time,
    String,
    Bit,
    VarBit,
    Uuid,
    Blob,
}

pub fn image_category(unit: &SemanticUnit, member: MemberId) -> ImageCategory {
    let utype = unit.utype(unit.member(member).ty);
    match unit.ty(utype) {
        Type::Primitive(name) => match name.as_str() {
            "bool" => ImageCategory::Bit,
            "char" | "signed char" | "unsigned char" | "short" | "unsigned short" | "int"
            | "unsigned int" | "long" | "unsigned long" | "long long" | "unsigned long long" => {
                ImageCategory::Integer
            }
            "float" | "double" => ImageCategory::Float,
            "std::string" | "std::wstring" => ImageCategory::String,
            "uuid" => ImageCategory::Uuid,
            "date" => ImageCategory::Date,
            "time" => ImageCategory::Time,
            _ => ImageCategory::String,
        },
        Type::Class(_) => ImageCategory::Integer,
        Type::Array { .. } => ImageCategory::Blob,
        Type::Typedef { .. } | Type::Qualifier { .. } => unreachable!("utype unwraps these"),
    }
}

/// The C++ expression that sets an image slot from a member value, e.g.
/// `i.name_value.assign(o.name_, i.name_size, i.name_null)`. The exact
/// traits type is per-database (`odb::pgsql::value_traits`, etc.).
pub fn set_image_expr(
    database: Database,
    image_member: &str,
    column: &str,
    category: ImageCategory,
) -> String {
    let traits_ns = traits_namespace(database);
    match category {
        ImageCategory::String | ImageCategory::Blob => format!(
            "{traits}::value_traits<std::string>::set_image(i.{column}_value, i.{column}_size, i.{column}_null, o.{member})",
            traits = traits_ns,
            column = column,
            member = image_member
        ),
        _ => format!(
            "{traits}::value_traits<decltype(o.{member})>::set_image(i.{column}_value, i.{column}_null, o.{member})",
            traits = traits_ns,
            column = column,
            member = image_member
        ),
    }
}

fn traits_namespace(database: Database) -> &'static str {
    match database {
        Database::Mssql => "odb::mssql",
        Database::Mysql => "odb::mysql",
        Database::Oracle => "odb::oracle",
        Database::Pgsql => "odb::pgsql",
        Database::Sqlite => "odb::sqlite",
        Database::Common => "odb::common",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_semantics::{AnnotationStore, Class, Member, SemanticUnit, SourceLoc};

    #[test]
    fn classifies_common_primitives() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let class = unit.add_class(Class {
            name: "X".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        let str_ty = unit.add_type(Type::Primitive("std::string".into()));
        let member = unit.add_member(Member {
            name: "name_".into(),
            owner: class,
            ty: str_ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        assert_eq!(image_category(&unit, member), ImageCategory::String);
    }
}
