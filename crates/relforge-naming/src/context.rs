//! Name derivation: turning semantic-graph nodes into the table, column,
//! and schema names the relational model and the emitters use.

use std::cell::RefCell;
use std::collections::HashMap;

use relforge_semantics::{Class, ClassId, Member, MemberId, Namespace, QName, SemanticUnit};

use crate::convention::public_name;
use crate::keywords::escape;
use crate::options::{Database, Options};

/// The table- and column-name prefix accumulated while traversing into
/// composite and container members: tables get the dotted path turned into
/// an underscored prefix, columns get the same path turned into a dotted
/// or underscored prefix depending on the per-database convention.
#[derive(Clone, Debug, Default)]
pub struct NamePrefix {
    components: Vec<String>,
}

impl NamePrefix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, component: &str) -> Self {
        let mut components = self.components.clone();
        components.push(component.to_string());
        Self { components }
    }

    pub fn table_prefix(&self) -> String {
        if self.components.is_empty() {
            String::new()
        } else {
            format!("{}_", self.components.join("_"))
        }
    }

    pub fn column_prefix(&self) -> String {
        if self.components.is_empty() {
            String::new()
        } else {
            format!("{}_", self.components.join("_"))
        }
    }
}

/// Name derivation context for one database. Holds the option set and
/// short-lived caches for values that are expensive to recompute but never
/// change once derived for a given node (schema name, table-name prefix).
pub struct NamingContext<'a> {
    unit: &'a SemanticUnit,
    options: &'a Options,
    db: Database,
    table_name_cache: RefCell<HashMap<ClassId, QName>>,
}

impl<'a> NamingContext<'a> {
    pub fn new(unit: &'a SemanticUnit, options: &'a Options, db: Database) -> Self {
        Self {
            unit,
            options,
            db,
            table_name_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn database(&self) -> Database {
        self.db
    }

    /// The schema this database maps to, or the empty string if none was
    /// configured (`--schema` / per-database schema option).
    pub fn schema(&self) -> &str {
        self.options
            .schema
            .get(&self.db)
            .or_else(|| self.options.schema.get(&Database::Common))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn table_name_prefix(&self) -> &str {
        self.options
            .table_prefix
            .get(&self.db)
            .or_else(|| self.options.table_prefix.get(&Database::Common))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The table-name prefix for a node enclosed in `class`'s namespace
    /// chain: the `--table-prefix` default, followed by the unqualified
    /// `table` annotation of each enclosing namespace from outermost to
    /// innermost.
    fn table_name_prefix_for_class(&self, class: ClassId) -> String {
        let mut chain = Vec::new();
        let mut ns = Some(self.unit.class(class).enclosing);
        while let Some(id) = ns {
            chain.push(id);
            ns = self.unit.namespace(id).enclosing;
        }
        chain.reverse();

        let mut prefix = self.table_name_prefix().to_string();
        for id in chain {
            if let Some(contribution) = unqualified_table_annotation(self.unit.namespace(id)) {
                prefix.push_str(&contribution);
            }
        }
        prefix
    }

    /// The schema for a node enclosed in `class`'s namespace chain: walks
    /// enclosing namespaces outward, stopping at the first one contributing
    /// a `schema` annotation or a qualified `table` annotation, falling
    /// back to the `--schema` default when no namespace contributes one.
    fn schema_for_class(&self, class: ClassId) -> String {
        let mut ns = Some(self.unit.class(class).enclosing);
        while let Some(id) = ns {
            let namespace = self.unit.namespace(id);
            if let Some(contribution) = namespace_schema_contribution(namespace) {
                return contribution;
            }
            ns = namespace.enclosing;
        }
        self.schema().to_string()
    }

    /// The object table name for `class`: the `#pragma db table` override
    /// if present, otherwise the escaped class name, always carrying the
    /// configured table-name prefix and schema, including any contributed
    /// by enclosing namespaces.
    pub fn table_name_for_class(&self, class: ClassId) -> QName {
        if let Some(cached) = self.table_name_cache.borrow().get(&class) {
            return cached.clone();
        }

        let c: &Class = self.unit.class(class);
        let base = c
            .annotations
            .get_str("table")
            .map(|s| s.to_string())
            .unwrap_or_else(|_| escape(&c.name));

        let mut name = QName::unqualified(format!("{}{}", self.table_name_prefix_for_class(class), base));
        self.qualify_with_schema(&mut name, class);

        self.table_name_cache
            .borrow_mut()
            .insert(class, name.clone());
        name
    }

    /// The table name for a container member's own table, derived from the
    /// owning class's table name plus the member's column-derived segment,
    /// unless `#pragma db table` overrides it directly on the member.
    pub fn table_name_for_container(
        &self,
        owner: ClassId,
        member: MemberId,
        prefix: &NamePrefix,
    ) -> QName {
        let m: &Member = self.unit.member(member);
        if let Ok(explicit) = m.annotations.get_str("table") {
            let mut name = QName::unqualified(explicit.to_string());
            self.qualify_with_schema(&mut name, owner);
            return name;
        }

        let owner_table = self.table_name_for_class(owner);
        let member_segment = escape(&m.name);
        let joined = format!(
            "{}{}{}",
            owner_table.uname(),
            "_",
            format!("{}{}", prefix.table_prefix(), member_segment)
        );
        let mut name = QName::unqualified(joined);
        self.qualify_with_schema(&mut name, owner);
        name
    }

    fn qualify_with_schema(&self, name: &mut QName, class: ClassId) {
        let schema = self.schema_for_class(class);
        if !schema.is_empty() {
            name.prepend(&QName::unqualified(schema));
        }
    }

    /// The column name for `member`: the `#pragma db column` override if
    /// present, otherwise the member name run through the `m_`/trailing-
    /// underscore public-name convention and then escaped, with any
    /// accessor/prefix rewriting already applied by the caller (traversal
    /// passes the plain member name; this function only derives, escapes,
    /// and prefixes).
    pub fn column_name(&self, member: MemberId, prefix: &NamePrefix) -> String {
        let m: &Member = self.unit.member(member);
        let base = m
            .annotations
            .get_str("column")
            .map(|s| s.to_string())
            .unwrap_or_else(|_| escape(&public_name(&m.name)));
        format!("{}{}", prefix.column_prefix(), base)
    }

    /// Resolves the nullability of a member: the last `#pragma db null` or
    /// `not_null` annotation set on the member wins, with not-null implied
    /// by default for fundamental types and pointer-to-object ids.
    pub fn is_null(&self, member: MemberId, default_not_null: bool) -> bool {
        let m: &Member = self.unit.member(member);
        if let Ok(v) = m.annotations.get_bool("null") {
            return v;
        }
        if let Ok(v) = m.annotations.get_bool("not_null") {
            return !v;
        }
        !default_not_null
    }

    /// The database column type for `member`, read from the annotation the
    /// validator sets while resolving `#pragma db type` overrides (kept in
    /// the annotation store rather than computed here so this crate never
    /// has to special-case the five databases' mapping tables).
    pub fn column_type(&self, member: MemberId) -> Option<String> {
        let key = format!("type-{}", self.db.as_str());
        let m: &Member = self.unit.member(member);
        m.annotations
            .get_str(&key)
            .or_else(|_| m.annotations.get_str("type"))
            .ok()
            .map(str::to_string)
    }

    /// Column options (`#pragma db options`) accumulated across the
    /// per-database and common-database pragmas. An empty `options()`
    /// pragma resets the accumulator for that database, matching the
    /// override semantics of repeated `#pragma db member(...) options()`
    /// directives closer to the declaration.
    pub fn column_options(&self, member: MemberId) -> Vec<String> {
        let m: &Member = self.unit.member(member);
        let common = m
            .annotations
            .get("options")
            .ok()
            .and_then(|v| v.as_string_set())
            .cloned()
            .unwrap_or_default();

        let key = format!("options-{}", self.db.as_str());
        match m.annotations.get(&key) {
            Ok(v) => v.as_string_set().cloned().unwrap_or_default(),
            Err(_) => common,
        }
    }
}

/// A namespace's contribution to the table-name prefix: the unqualified
/// part of its `table` annotation (the part after the last `.`, or the
/// whole value when it carries no schema qualifier). Namespaces with
/// neither a `table` nor a `schema` annotation contribute nothing.
fn unqualified_table_annotation(namespace: &Namespace) -> Option<String> {
    let table = namespace.annotations.get_str("table").ok()?;
    match table.rsplit_once('.') {
        Some((_, unqualified)) => Some(unqualified.to_string()),
        None => Some(table.to_string()),
    }
}

/// A namespace's contribution to the schema: its `schema` annotation if
/// present, otherwise the qualifier of its `table` annotation. When both
/// are set on the same namespace, the one declared later in source wins.
fn namespace_schema_contribution(namespace: &Namespace) -> Option<String> {
    let schema = namespace.annotations.get_str("schema").ok();
    let table_qualifier = namespace
        .annotations
        .get_str("table")
        .ok()
        .and_then(|t| t.rsplit_once('.').map(|(qualifier, _)| qualifier.to_string()));

    match (schema, table_qualifier) {
        (Some(schema), Some(qualifier)) => {
            let schema_loc = namespace.annotations.loc("schema");
            let table_loc = namespace.annotations.loc("table");
            if table_loc > schema_loc {
                Some(qualifier)
            } else {
                Some(schema.to_string())
            }
        }
        (Some(schema), None) => Some(schema.to_string()),
        (None, Some(qualifier)) => Some(qualifier),
        (None, None) => None,
    }
}
