//! Maps the command-line option set onto `relforge_naming::Options`. This
//! layer only checks syntax (types, enums, multiplicity); cross-option
//! semantic checks are the validator's job once the full `Options` value
//! exists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use relforge_naming::{Database, MultiDatabase, Options, RewriteRule, RewriteRules, SchemaFormat};

use crate::logging::LogArgs;

/// Parses a delimiter-based rewrite rule, e.g. `/^m_(.+)/$1/` (the
/// delimiter is the rule's first character, so it never needs escaping
/// inside the pattern or replacement).
fn parse_rewrite_rule(s: &str) -> std::result::Result<RewriteRule, String> {
    let mut chars = s.chars();
    let delim = chars.next().ok_or_else(|| "empty regex rule".to_string())?;
    let rest = chars.as_str();
    let mut parts = rest.splitn(2, delim);
    let pattern = parts.next().ok_or_else(|| format!("rule '{s}' is missing a pattern"))?;
    let replacement = parts
        .next()
        .ok_or_else(|| format!("rule '{s}' is missing a closing '{delim}' before the replacement"))?
        .trim_end_matches(delim);

    let pattern = regex::Regex::new(pattern).map_err(|e| format!("invalid regex in rule '{s}': {e}"))?;
    Ok(RewriteRule {
        pattern,
        replacement: replacement.to_string(),
    })
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DatabaseArg {
    Mssql,
    Mysql,
    Oracle,
    Pgsql,
    Sqlite,
}

impl From<DatabaseArg> for Database {
    fn from(value: DatabaseArg) -> Self {
        match value {
            DatabaseArg::Mssql => Database::Mssql,
            DatabaseArg::Mysql => Database::Mysql,
            DatabaseArg::Oracle => Database::Oracle,
            DatabaseArg::Pgsql => Database::Pgsql,
            DatabaseArg::Sqlite => Database::Sqlite,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MultiDatabaseArg {
    Disabled,
    Static,
    Dynamic,
}

impl From<MultiDatabaseArg> for MultiDatabase {
    fn from(value: MultiDatabaseArg) -> Self {
        match value {
            MultiDatabaseArg::Disabled => MultiDatabase::Disabled,
            MultiDatabaseArg::Static => MultiDatabase::Static,
            MultiDatabaseArg::Dynamic => MultiDatabase::Dynamic,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormatArg {
    Embedded,
    Separate,
    Sql,
}

impl From<SchemaFormatArg> for SchemaFormat {
    fn from(value: SchemaFormatArg) -> Self {
        match value {
            SchemaFormatArg::Embedded => SchemaFormat::Embedded,
            SchemaFormatArg::Separate => SchemaFormat::Separate,
            SchemaFormatArg::Sql => SchemaFormat::Sql,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Generates a relational model, changelog, and migration scripts from a semantic graph fixture.")]
pub struct Cli {
    /// Path to the JSON semantic-graph fixture produced by the front end.
    pub input: PathBuf,

    /// Target database.
    #[arg(long, value_enum)]
    pub database: DatabaseArg,

    #[arg(long, value_enum, default_value = "disabled")]
    pub multi_database: MultiDatabaseArg,

    #[arg(long)]
    pub generate_schema: bool,

    #[arg(long, value_enum, num_args = 1..)]
    pub schema_format: Vec<SchemaFormatArg>,

    #[arg(long)]
    pub generate_query: bool,

    #[arg(long)]
    pub schema: Option<String>,

    #[arg(long)]
    pub table_prefix: Option<String>,

    /// Previous changelog to diff against (omit to initialize one).
    #[arg(long)]
    pub changelog_in: Option<PathBuf>,

    /// Where to write the changelog.
    #[arg(long)]
    pub changelog_out: PathBuf,

    /// Directory migration scripts are written to.
    #[arg(long, default_value = ".")]
    pub changelog_dir: PathBuf,

    #[arg(long)]
    pub init_changelog: bool,

    #[arg(long)]
    pub suppress_migration: bool,

    #[arg(long)]
    pub guard_prefix: Option<String>,

    /// Rewrites a class/member name before it becomes a query or accessor
    /// name anywhere it's matched; repeat for multiple rules, e.g.
    /// `--include-regex '/^m_(.+)/$1/'`. Tried in declaration order.
    #[arg(long, value_parser = parse_rewrite_rule)]
    pub include_regex: Vec<RewriteRule>,

    #[arg(long, value_parser = parse_rewrite_rule)]
    pub accessor_regex: Vec<RewriteRule>,

    #[arg(long, value_parser = parse_rewrite_rule)]
    pub modifier_regex: Vec<RewriteRule>,

    #[arg(long)]
    pub export_symbol: Option<String>,

    #[arg(long)]
    pub extern_symbol: Option<String>,

    #[arg(long)]
    pub sloc_limit: Option<u64>,

    #[arg(long)]
    pub show_sloc: bool,

    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cli {
    pub fn to_options(&self) -> Result<Options> {
        let mut options = Options::default();
        let database: Database = self.database.into();
        options.database = database;
        options.multi_database = self.multi_database.into();
        options.generate_schema = self.generate_schema;
        options.generate_query = self.generate_query;
        options.init_changelog = self.init_changelog;
        options.suppress_migration = self.suppress_migration;
        options.guard_prefix = self.guard_prefix.clone();
        options.sloc_limit = self.sloc_limit;
        options.show_sloc = self.show_sloc;

        if !self.schema_format.is_empty() {
            let formats = self.schema_format.iter().copied().map(SchemaFormat::from).collect();
            options.schema_format.insert(database, formats);
        }
        if let Some(schema) = &self.schema {
            options.schema.insert(database, schema.clone());
        }
        if let Some(prefix) = &self.table_prefix {
            options.table_prefix.insert(database, prefix.clone());
        }
        if !self.include_regex.is_empty() {
            options.include_regex = RewriteRules {
                rules: self.include_regex.clone(),
                trace: false,
            };
        }
        if !self.accessor_regex.is_empty() {
            options.accessor_regex = RewriteRules {
                rules: self.accessor_regex.clone(),
                trace: false,
            };
        }
        if !self.modifier_regex.is_empty() {
            options.modifier_regex = RewriteRules {
                rules: self.modifier_regex.clone(),
                trace: false,
            };
        }
        if let Some(symbol) = &self.export_symbol {
            options.export_symbol.insert(database, symbol.clone());
        }
        if let Some(symbol) = &self.extern_symbol {
            options.extern_symbol.insert(database, symbol.clone());
        }

        options.changelog_in = self.changelog_in.as_ref().map(|p| p.display().to_string());
        options.changelog_out = Some(self.changelog_out.display().to_string());
        options.changelog_dir = Some(self.changelog_dir.display().to_string());

        options
            .check_consistency()
            .map_err(|e| anyhow::anyhow!("inconsistent command-line options: {e}"))
            .context("validating option set")?;

        Ok(options)
    }
}
