//! The generator's option set, parsed by `relforge-driver`'s CLI layer and
//! consumed from here on as a plain value: no component reaches for a
//! global, everything takes `&Options` or `&GenerationContext`.

use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Common,
    Mssql,
    Mysql,
    Oracle,
    Pgsql,
    Sqlite,
}

impl Database {
    pub fn all_concrete() -> [Database; 5] {
        [
            Database::Mssql,
            Database::Mysql,
            Database::Oracle,
            Database::Pgsql,
            Database::Sqlite,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Common => "common",
            Database::Mssql => "mssql",
            Database::Mysql => "mysql",
            Database::Oracle => "oracle",
            Database::Pgsql => "pgsql",
            Database::Sqlite => "sqlite",
        }
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiDatabase {
    Disabled,
    Static,
    Dynamic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    Embedded,
    Separate,
    Sql,
}

/// A single include/accessor/modifier rewrite rule: `pattern` is tried in
/// declaration order and the first match wins.
#[derive(Clone, Debug)]
pub struct RewriteRule {
    pub pattern: regex::Regex,
    pub replacement: String,
}

#[derive(Clone, Debug, Default)]
pub struct RewriteRules {
    pub rules: Vec<RewriteRule>,
    /// When set, each attempted rule and its result is traced.
    pub trace: bool,
}

impl RewriteRules {
    pub fn apply(&self, input: &str) -> String {
        for rule in &self.rules {
            if rule.pattern.is_match(input) {
                let result = rule.pattern.replace(input, rule.replacement.as_str()).into_owned();
                if self.trace {
                    tracing::debug!(
                        pattern = %rule.pattern,
                        %input,
                        %result,
                        "rewrite rule matched"
                    );
                }
                return result;
            } else if self.trace {
                tracing::trace!(pattern = %rule.pattern, %input, "rewrite rule did not match");
            }
        }
        input.to_string()
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    pub database: Database,
    pub multi_database: MultiDatabase,
    pub generate_schema: bool,
    pub schema_format: BTreeMap<Database, Vec<SchemaFormat>>,
    pub generate_query: bool,
    pub schema: BTreeMap<Database, String>,
    pub table_prefix: BTreeMap<Database, String>,
    pub changelog_in: Option<String>,
    pub changelog_out: Option<String>,
    pub changelog_dir: Option<String>,
    pub init_changelog: bool,
    pub suppress_migration: bool,
    pub include_regex: RewriteRules,
    pub accessor_regex: RewriteRules,
    pub modifier_regex: RewriteRules,
    pub export_symbol: BTreeMap<Database, String>,
    pub extern_symbol: BTreeMap<Database, String>,
    pub guard_prefix: Option<String>,
    pub sloc_limit: Option<u64>,
    pub show_sloc: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            database: Database::Common,
            multi_database: MultiDatabase::Disabled,
            generate_schema: false,
            schema_format: BTreeMap::new(),
            generate_query: false,
            schema: BTreeMap::new(),
            table_prefix: BTreeMap::new(),
            changelog_in: None,
            changelog_out: None,
            changelog_dir: None,
            init_changelog: false,
            suppress_migration: false,
            include_regex: RewriteRules::default(),
            accessor_regex: RewriteRules::default(),
            modifier_regex: RewriteRules::default(),
            export_symbol: BTreeMap::new(),
            extern_symbol: BTreeMap::new(),
            guard_prefix: None,
            sloc_limit: None,
            show_sloc: false,
        }
    }
}

impl Options {
    /// Cross-option consistency checks that don't need the semantic graph,
    /// run by the validator before the pipeline proceeds.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.changelog_in.is_some() && self.changelog_out.is_none() {
            return Err("changelog-in requires changelog-out".to_string());
        }
        let wants_schema_only = self
            .schema_format
            .values()
            .any(|fs| fs.iter().all(|f| matches!(f, SchemaFormat::Sql)));
        if wants_schema_only && self.database == Database::Common {
            return Err(
                "schema-only (sql) format is incompatible with the common database".to_string(),
            );
        }
        Ok(())
    }
}
