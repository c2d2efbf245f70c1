//! Changesets: the directives that turn one model version into the next,
//! and the changelog file format that threads them together with the base
//! model snapshot.

use serde::{Deserialize, Serialize};

use crate::model::{Column, ForeignKey, Index, Model, Table};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    #[serde(rename = "add-table")]
    AddTable(Table),
    #[serde(rename = "drop-table")]
    DropTable { name: String },
    #[serde(rename = "add-column")]
    AddColumn { table: String, column: Column },
    #[serde(rename = "drop-column")]
    DropColumn { table: String, column: String },
    #[serde(rename = "alter-column")]
    AlterColumn { table: String, column: Column },
    #[serde(rename = "add-foreign-key")]
    AddForeignKey {
        table: String,
        name: String,
        key: ForeignKey,
    },
    #[serde(rename = "drop-foreign-key")]
    DropForeignKey { table: String, name: String },
    #[serde(rename = "add-index")]
    AddIndex { table: String, index: Index },
    #[serde(rename = "drop-index")]
    DropIndex { table: String, name: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Changeset {
    #[serde(rename = "@version")]
    pub version: u64,
    #[serde(rename = "$value", default)]
    pub directives: Vec<Directive>,
}

impl Changeset {
    pub fn new(version: u64) -> Self {
        Self {
            version,
            directives: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename = "changelog")]
pub struct Changelog {
    #[serde(rename = "@database")]
    pub database: String,
    #[serde(rename = "@schema-name")]
    pub schema_name: String,
    pub model: Model,
    #[serde(rename = "changeset", default)]
    pub changesets: Vec<Changeset>,
}

impl Changelog {
    pub fn new(database: impl Into<String>, schema_name: impl Into<String>, model: Model) -> Self {
        Self {
            database: database.into(),
            schema_name: schema_name.into(),
            model,
            changesets: Vec::new(),
        }
    }

    /// The model that results from applying every changeset's directives
    /// on top of the base model, in ascending version order.
    pub fn latest_version(&self) -> u64 {
        self.changesets
            .iter()
            .map(|c| c.version)
            .max()
            .unwrap_or(self.model.version)
    }
}
