//! The model differ: given the previous and current relational models,
//! produces the changeset whose directives, applied to the previous model,
//! yield the current one.

use std::collections::HashSet;

use relforge_relational::{Changeset, Deferrable, Directive, ForeignKey, Model, Table};

#[tracing::instrument(skip_all, fields(version = new_version))]
pub fn diff(prev: &Model, curr: &Model, new_version: u64) -> Changeset {
    let mut changeset = Changeset::new(new_version);

    for table in &curr.tables {
        if prev.table(&table.name).is_none() {
            changeset.directives.push(Directive::AddTable(table.clone()));
        }
    }

    // Non-deferrable foreign keys pointing at a soon-to-be-dropped table must
    // go first, since the database would otherwise refuse the drop. Track
    // which ones were handled here so the per-table diff below doesn't
    // duplicate the same directive for a survivor losing that same key.
    let mut pre_dropped: HashSet<(String, String)> = HashSet::new();
    for table in &prev.tables {
        if curr.table(&table.name).is_none() {
            for survivor in &prev.tables {
                if survivor.name == table.name {
                    continue;
                }
                if curr.table(&survivor.name).is_none() {
                    continue;
                }
                for fk in &survivor.foreign_keys {
                    if fk.referenced.table == table.name && fk.deferrable == Deferrable::Not {
                        let name = foreign_key_name(&survivor.name, fk);
                        changeset.directives.push(Directive::DropForeignKey {
                            table: survivor.name.clone(),
                            name: name.clone(),
                        });
                        pre_dropped.insert((survivor.name.clone(), name));
                    }
                }
            }
            changeset.directives.push(Directive::DropTable {
                name: table.name.clone(),
            });
        }
    }

    for prev_table in &prev.tables {
        if let Some(curr_table) = curr.table(&prev_table.name) {
            diff_table(prev_table, curr_table, &mut changeset, &pre_dropped);
        }
    }

    tracing::debug!(directives = changeset.directives.len(), "model diff complete");
    changeset
}

fn diff_table(prev: &Table, curr: &Table, changeset: &mut Changeset, pre_dropped: &HashSet<(String, String)>) {
    for column in &curr.columns {
        match prev.column(&column.name) {
            None => changeset.directives.push(Directive::AddColumn {
                table: curr.name.clone(),
                column: column.clone(),
            }),
            Some(old) if old != column => changeset.directives.push(Directive::AlterColumn {
                table: curr.name.clone(),
                column: column.clone(),
            }),
            _ => {}
        }
    }
    for column in &prev.columns {
        if curr.column(&column.name).is_none() {
            changeset.directives.push(Directive::DropColumn {
                table: curr.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    for fk in &curr.foreign_keys {
        let name = foreign_key_name(&curr.name, fk);
        if !prev.foreign_keys.iter().any(|f| foreign_key_name(&prev.name, f) == name) {
            changeset.directives.push(Directive::AddForeignKey {
                table: curr.name.clone(),
                name,
                key: fk.clone(),
            });
        }
    }
    for fk in &prev.foreign_keys {
        let name = foreign_key_name(&prev.name, fk);
        if !curr.foreign_keys.iter().any(|f| foreign_key_name(&curr.name, f) == name)
            && !pre_dropped.contains(&(curr.name.clone(), name.clone()))
        {
            changeset.directives.push(Directive::DropForeignKey {
                table: curr.name.clone(),
                name,
            });
        }
    }

    for index in &curr.indexes {
        if !prev.indexes.iter().any(|i| i.name == index.name) {
            changeset.directives.push(Directive::AddIndex {
                table: curr.name.clone(),
                index: index.clone(),
            });
        }
    }
    for index in &prev.indexes {
        if !curr.indexes.iter().any(|i| i.name == index.name) {
            changeset.directives.push(Directive::DropIndex {
                table: curr.name.clone(),
                name: index.name.clone(),
            });
        }
    }
}

fn foreign_key_name(table: &str, fk: &ForeignKey) -> String {
    format!("{}_{}_fk", table, fk.referer.columns.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_relational::Column;

    fn col(name: &str, ty: &str, null: bool) -> Column {
        Column {
            name: name.to_string(),
            ty: ty.to_string(),
            null,
        }
    }

    #[test]
    fn diff_is_empty_for_identical_models() {
        let mut model = Model::new(1);
        let mut table = Table::new("t");
        table.columns.push(col("a", "INTEGER", false));
        model.tables.push(table);

        let changeset = diff(&model, &model, 2);
        assert!(changeset.is_empty());
    }

    #[test]
    fn detects_dropped_and_added_columns() {
        let mut prev = Model::new(1);
        let mut prev_table = Table::new("t");
        prev_table.columns.push(col("a", "INTEGER", false));
        prev_table.columns.push(col("b", "TEXT", true));
        prev.tables.push(prev_table);

        let mut curr = Model::new(2);
        let mut curr_table = Table::new("t");
        curr_table.columns.push(col("a", "INTEGER", false));
        curr_table.columns.push(col("c", "BOOLEAN", false));
        curr.tables.push(curr_table);

        let changeset = diff(&prev, &curr, 2);
        assert!(changeset
            .directives
            .iter()
            .any(|d| matches!(d, Directive::DropColumn { column, .. } if column == "b")));
        assert!(changeset
            .directives
            .iter()
            .any(|d| matches!(d, Directive::AddColumn { column, .. } if column.name == "c")));
    }
}
