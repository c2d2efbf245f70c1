//! Changelog XML (de)serialization, plus the header-mismatch errors the
//! driver needs before it trusts an on-disk changelog.

use crate::changeset::Changelog;

#[derive(thiserror::Error, Debug)]
pub enum ChangelogError {
    #[error("changelog is for database `{expected}`, invocation is for `{actual}`")]
    DatabaseMismatch { expected: String, actual: String },
    #[error("changelog schema is `{expected}`, invocation schema is `{actual}`")]
    SchemaMismatch { expected: String, actual: String },
    #[error("failed to parse changelog XML: {0}")]
    Parse(String),
    #[error("failed to serialize changelog XML: {0}")]
    Serialize(String),
}

pub fn serialize(changelog: &Changelog) -> Result<String, ChangelogError> {
    quick_xml::se::to_string(changelog).map_err(|e| ChangelogError::Serialize(e.to_string()))
}

pub fn deserialize(xml: &str) -> Result<Changelog, ChangelogError> {
    quick_xml::de::from_str(xml).map_err(|e| ChangelogError::Parse(e.to_string()))
}

/// Verifies the header of a freshly-deserialized changelog against the
/// current invocation's database and schema before any diffing happens.
pub fn check_header(changelog: &Changelog, database: &str, schema: &str) -> Result<(), ChangelogError> {
    if changelog.database != database {
        return Err(ChangelogError::DatabaseMismatch {
            expected: changelog.database.clone(),
            actual: database.to_string(),
        });
    }
    if changelog.schema_name != schema {
        return Err(ChangelogError::SchemaMismatch {
            expected: changelog.schema_name.clone(),
            actual: schema.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Model, Table};

    #[test]
    fn round_trips_a_simple_model() {
        let mut model = Model::new(1);
        let mut table = Table::new("person");
        table.columns.push(Column {
            name: "id".into(),
            ty: "BIGINT".into(),
            null: false,
        });
        model.tables.push(table);
        let changelog = Changelog::new("pgsql", "", model);

        let xml = serialize(&changelog).unwrap();
        let back = deserialize(&xml).unwrap();
        assert_eq!(changelog, back);
    }

    #[test]
    fn header_mismatch_is_reported() {
        let changelog = Changelog::new("pgsql", "shop", Model::new(1));
        assert!(check_header(&changelog, "mysql", "shop").is_err());
        assert!(check_header(&changelog, "pgsql", "other").is_err());
        assert!(check_header(&changelog, "pgsql", "shop").is_ok());
    }
}
