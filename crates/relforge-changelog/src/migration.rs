//! Migration SQL: splits a changeset's directives into a pre-migration
//! and post-migration script. Column removals and tightened constraints
//! move to post so existing rows survive the window where both old and
//! new shapes of a table must be readable.

use relforge_emit::EmitterRegistry;
use relforge_relational::{Changeset, Directive};

pub struct MigrationScripts {
    pub pre: String,
    pub post: String,
}

/// Renders `changeset` into pre/post migration scripts, quoting identifiers
/// and shaping foreign-key DDL through `registry` so the output matches the
/// target database's dialect rather than a single hardcoded one.
#[tracing::instrument(skip_all, fields(db = %registry.database, version = changeset.version))]
pub fn render(changeset: &Changeset, registry: &EmitterRegistry) -> MigrationScripts {
    let quote = registry.quote_ident;
    let mut pre = String::new();
    let mut post = String::new();

    for directive in &changeset.directives {
        match directive {
            Directive::AddTable(table) => {
                pre.push_str(&format!("-- add-table {}\n", quote(&table.name)));
            }
            Directive::DropTable { name } => {
                post.push_str(&format!("DROP TABLE {};\n", quote(name)));
            }
            Directive::AddColumn { table, column } => {
                // Relax NULL in pre so the column can be backfilled, then
                // tighten in post once every row has a value.
                pre.push_str(&format!(
                    "ALTER TABLE {} ADD COLUMN {} {} NULL;\n",
                    quote(table),
                    quote(&column.name),
                    column.ty
                ));
                if !column.null {
                    post.push_str(&format!(
                        "ALTER TABLE {} ALTER COLUMN {} SET NOT NULL;\n",
                        quote(table),
                        quote(&column.name)
                    ));
                }
            }
            Directive::DropColumn { table, column } => {
                post.push_str(&format!(
                    "ALTER TABLE {} DROP COLUMN {};\n",
                    quote(table),
                    quote(column)
                ));
            }
            Directive::AlterColumn { table, column } => {
                pre.push_str(&format!(
                    "ALTER TABLE {} ALTER COLUMN {} TYPE {};\n",
                    quote(table),
                    quote(&column.name),
                    column.ty
                ));
                if !column.null {
                    post.push_str(&format!(
                        "ALTER TABLE {} ALTER COLUMN {} SET NOT NULL;\n",
                        quote(table),
                        quote(&column.name)
                    ));
                }
            }
            Directive::AddForeignKey { table, name, key } => {
                match (registry.create_foreign_key)(table, key) {
                    Some(clause) => {
                        post.push_str(&format!(
                            "ALTER TABLE {} ADD CONSTRAINT {} {};\n",
                            quote(table),
                            quote(name),
                            clause
                        ));
                    }
                    None => {
                        post.push_str(&format!(
                            "-- deferrable foreign key {} on {} omitted\n",
                            quote(name),
                            quote(table)
                        ));
                    }
                }
            }
            Directive::DropForeignKey { table, name } => {
                pre.push_str(&format!(
                    "ALTER TABLE {} DROP CONSTRAINT {};\n",
                    quote(table),
                    quote(name)
                ));
            }
            Directive::AddIndex { table, index } => {
                post.push_str(&format!(
                    "CREATE INDEX {} ON {} ({});\n",
                    quote(&index.name),
                    quote(table),
                    index.columns.join(", ")
                ));
            }
            Directive::DropIndex { table: _, name } => {
                pre.push_str(&format!("DROP INDEX {};\n", quote(name)));
            }
        }
    }

    MigrationScripts { pre, post }
}

/// File names for a changeset's migration scripts: `<base>[-db]-NNN-pre.sql`
/// and the `-post.sql` counterpart, version zero-padded to three digits.
pub fn file_stem(base: &str, database_suffix: Option<&str>, version: u64) -> String {
    match database_suffix {
        Some(db) => format!("{}-{}-{:03}", base, db, version),
        None => format!("{}-{:03}", base, version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_emit::registry_for;
    use relforge_naming::Database;
    use relforge_relational::{Column, Directive};

    #[test]
    fn drop_column_goes_to_post() {
        let mut changeset = Changeset::new(2);
        changeset.directives.push(Directive::DropColumn {
            table: "t".into(),
            column: "b".into(),
        });
        let scripts = render(&changeset, &registry_for(Database::Pgsql));
        assert!(scripts.post.contains("DROP COLUMN"));
        assert!(scripts.pre.is_empty());
    }

    #[test]
    fn add_not_null_column_relaxes_then_tightens() {
        let mut changeset = Changeset::new(2);
        changeset.directives.push(Directive::AddColumn {
            table: "t".into(),
            column: Column {
                name: "c".into(),
                ty: "BOOLEAN".into(),
                null: false,
            },
        });
        let scripts = render(&changeset, &registry_for(Database::Pgsql));
        assert!(scripts.pre.contains("NULL"));
        assert!(scripts.post.contains("SET NOT NULL"));
    }

    #[test]
    fn mssql_deferrable_foreign_key_is_commented_out() {
        let mut changeset = Changeset::new(2);
        changeset.directives.push(Directive::AddForeignKey {
            table: "a".into(),
            name: "a_b_fk".into(),
            key: relforge_relational::ForeignKey {
                deferrable: relforge_relational::Deferrable::Deferred,
                referer: relforge_relational::Referer {
                    columns: vec!["b_id".into()],
                },
                referenced: relforge_relational::Referenced {
                    table: "b".into(),
                    columns: vec!["id".into()],
                },
            },
        });
        let scripts = render(&changeset, &registry_for(Database::Mssql));
        assert!(scripts.post.contains("-- deferrable foreign key"));
        assert!(scripts.post.contains("[a_b_fk]"));
    }

    #[test]
    fn file_stem_zero_pads_version() {
        assert_eq!(file_stem("schema", None, 7), "schema-007");
        assert_eq!(file_stem("schema", Some("pgsql"), 7), "schema-pgsql-007");
    }
}
