//! The relational graph: tables, columns, and keys, built once per target
//! database from the validated semantic graph and serialized into the
//! changelog's `<model>` element.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "@version")]
    pub version: u64,
    #[serde(rename = "table", default)]
    pub tables: Vec<Table>,
}

impl Model {
    pub fn new(version: u64) -> Self {
        Self {
            version,
            tables: Vec::new(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "column", default)]
    pub columns: Vec<Column>,
    #[serde(rename = "primary-key", skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    #[serde(rename = "foreign-key", default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(rename = "index", default)]
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub ty: String,
    #[serde(rename = "@null")]
    pub null: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    #[serde(rename = "@auto")]
    pub auto: bool,
    #[serde(rename = "column", default)]
    pub columns: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deferrable {
    Not,
    Deferred,
    Immediate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    #[serde(rename = "@deferrable")]
    pub deferrable: Deferrable,
    pub referer: Referer,
    pub referenced: Referenced,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Referer {
    #[serde(rename = "column", default)]
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Referenced {
    #[serde(rename = "@table")]
    pub table: String,
    #[serde(rename = "column", default)]
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "column", default)]
    pub columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookup_by_name() {
        let mut model = Model::new(1);
        model.tables.push(Table::new("person"));
        assert!(model.table("person").is_some());
        assert!(model.table("missing").is_none());
    }
}
