//! Projects the validated semantic graph into a relational `Model`: one
//! table per concrete object, its id-first column ordering, foreign keys
//! for object-pointer members, and a companion table for every container
//! member.

use relforge_naming::{NamePrefix, NamingContext};
use relforge_relational::{Column, Deferrable, ForeignKey, Index, Model, PrimaryKey, Referenced, Referer, Table};
use relforge_semantics::{ClassId, ClassKind, MemberId, SemanticUnit, Type};
use relforge_traverse::{ColumnRef, ColumnTraversal, ColumnVisitor};

use crate::types::default_sql_type;

#[tracing::instrument(skip_all, fields(db = %naming.database(), version))]
pub fn build_model(unit: &SemanticUnit, naming: &NamingContext, version: u64) -> Model {
    let mut model = Model::new(version);

    for class_id in unit.class_ids() {
        if unit.class(class_id).kind() == ClassKind::Object {
            let id_member = find_id_member(unit, class_id);
            let table = build_table(unit, naming, class_id, id_member);
            tracing::debug!(table = %table.name, "built table");
            model.tables.push(table);

            for container_table in build_container_tables(unit, naming, class_id) {
                model.tables.push(container_table);
            }
        }
    }

    model
}

fn find_id_member(unit: &SemanticUnit, class_id: ClassId) -> Option<MemberId> {
    for base in unit.bases(class_id) {
        if let Some(id) = find_id_member(unit, base.base) {
            return Some(id);
        }
    }
    unit.class(class_id)
        .members
        .iter()
        .copied()
        .find(|&m| unit.member(m).annotations.has("id"))
}

struct CollectColumns<'a> {
    unit: &'a SemanticUnit,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
}

impl<'a> ColumnVisitor for CollectColumns<'a> {
    fn visit_column(&mut self, column: &ColumnRef) -> bool {
        let member = self.unit.member(column.member);
        let utype = self.unit.utype(member.ty);

        let is_pointer = matches!(
            self.unit.ty(utype),
            Type::Class(c) if self.unit.class(*c).kind() == ClassKind::Object
        );

        let null = if is_pointer {
            member.annotations.get_bool("null").unwrap_or(true)
        } else {
            member.annotations.get_bool("null").unwrap_or(false)
        };

        let ty = default_sql_type(self.unit, column.member);

        self.columns.push(Column {
            name: column.name.clone(),
            ty,
            null,
        });

        if is_pointer {
            if let Type::Class(target) = self.unit.ty(utype) {
                if find_id_member(self.unit, *target).is_some() {
                    let target_table = self.unit.class(*target).name.clone();
                    self.foreign_keys.push(ForeignKey {
                        deferrable: Deferrable::Not,
                        referer: Referer {
                            columns: vec![column.name.clone()],
                        },
                        referenced: Referenced {
                            table: target_table,
                            columns: vec!["id".to_string()],
                        },
                    });
                }
            }
        }

        true
    }
}

fn build_table(
    unit: &SemanticUnit,
    naming: &NamingContext,
    class_id: ClassId,
    id_member: Option<MemberId>,
) -> Table {
    let name = naming.table_name_for_class(class_id).to_string();
    let mut collector = CollectColumns {
        unit,
        columns: Vec::new(),
        foreign_keys: Vec::new(),
    };
    ColumnTraversal::new(unit, naming)
        .id_member(id_member)
        .run(class_id, &mut collector);

    let mut table = Table::new(name);

    // Id columns first, per the relational model's column-ordering rule.
    let id_column_name = id_member.map(|m| naming.column_name(m, &Default::default()));
    let (mut id_cols, mut rest): (Vec<Column>, Vec<Column>) = (Vec::new(), Vec::new());
    for col in collector.columns {
        if Some(&col.name) == id_column_name.as_ref() {
            id_cols.push(col);
        } else {
            rest.push(col);
        }
    }
    table.columns.append(&mut id_cols);
    table.columns.append(&mut rest);

    if let Some(id) = id_member {
        let id_member_ref = unit.member(id);
        table.primary_key = Some(PrimaryKey {
            auto: id_member_ref.annotations.has("auto"),
            columns: vec![naming.column_name(id, &Default::default())],
        });
    }

    table.foreign_keys = collector.foreign_keys;
    table
}

/// A container member (`vector<T>`, `set<T>`, ...) is stored in its own
/// table keyed by the owning object's id plus an element/key column.
fn build_container_tables(unit: &SemanticUnit, naming: &NamingContext, class_id: ClassId) -> Vec<Table> {
    let mut tables = Vec::new();
    for &member_id in &unit.class(class_id).members {
        let member = unit.member(member_id);
        if !member.annotations.has("container") {
            continue;
        }

        let qname = naming.table_name_for_container(class_id, member_id, &NamePrefix::new());
        let mut table = Table::new(qname.to_string());
        table.columns.push(Column {
            name: "object_id".to_string(),
            ty: "BIGINT".to_string(),
            null: false,
        });
        table.columns.push(Column {
            name: "value".to_string(),
            ty: default_sql_type(unit, member_id),
            null: false,
        });
        table.indexes.push(Index {
            name: format!("{}_object_id_i", table.name),
            columns: vec!["object_id".to_string()],
        });
        tables.push(table);
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_naming::{Database, Options};
    use relforge_semantics::{AnnotationStore, AnnotationValue, Class, Member, SourceLoc};

    fn mk_store(flags: &[&str]) -> AnnotationStore {
        let mut s = AnnotationStore::new();
        for f in flags {
            s.set(*f, AnnotationValue::Bool(true), SourceLoc::synthetic());
        }
        s
    }

    #[test]
    fn builds_a_table_with_id_column_first() {
        let mut unit = SemanticUnit::new();
        let ns = unit.global_namespace.unwrap();
        let long_ty = unit.add_type(Type::Primitive("long".into()));
        let str_ty = unit.add_type(Type::Primitive("std::string".into()));

        let class = unit.add_class(Class {
            name: "Person".into(),
            enclosing: ns,
            members: Vec::new(),
            bases: Vec::new(),
            is_cxx_polymorphic: false,
            annotations: mk_store(&["object"]),
            loc: SourceLoc::synthetic(),
        });
        let id_member = unit.add_member(Member {
            name: "id_".into(),
            owner: class,
            ty: long_ty,
            annotations: mk_store(&["id", "auto"]),
            loc: SourceLoc::synthetic(),
        });
        let name_member = unit.add_member(Member {
            name: "name_".into(),
            owner: class,
            ty: str_ty,
            annotations: AnnotationStore::new(),
            loc: SourceLoc::synthetic(),
        });
        unit.class_mut(class).members = vec![id_member, name_member];

        let options = Options::default();
        let naming = NamingContext::new(&unit, &options, Database::Common);
        let model = build_model(&unit, &naming, 1);

        assert_eq!(model.tables.len(), 1);
        let table = &model.tables[0];
        assert_eq!(table.columns[0].name, "id");
        assert!(table.primary_key.as_ref().unwrap().auto);
    }
}
