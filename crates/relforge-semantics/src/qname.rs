//! Qualified names: the `schema.table` / `ns::ns::Class` style identifiers
//! threaded through naming derivation (relforge-naming) and the relational
//! model (relforge-relational).

use std::fmt;

/// A possibly-qualified name: zero or more qualifying components followed
/// by an unqualified tail (`uname`). `rooted` marks a name that is
/// considered fully resolved (anchored at the global/database scope) and
/// therefore should stop further qualification, guaranteeing schema
/// resolution terminates.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct QName {
    components: Vec<String>,
    rooted: bool,
}

impl QName {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            components: vec![name.into()],
            rooted: false,
        }
    }

    pub fn rooted(components: Vec<String>) -> Self {
        Self {
            components,
            rooted: true,
        }
    }

    /// True if this name has at least one qualifying component.
    pub fn qualified(&self) -> bool {
        self.components.len() > 1
    }

    /// True if this name is anchored and needs no further qualification.
    pub fn fully_qualified(&self) -> bool {
        self.rooted
    }

    /// The unqualified tail component, e.g. `table` of `schema.table`.
    pub fn uname(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }

    pub fn set_uname(&mut self, name: impl Into<String>) {
        if self.components.is_empty() {
            self.components.push(name.into());
        } else {
            *self.components.last_mut().unwrap() = name.into();
        }
    }

    /// Everything but the unqualified tail, as its own `QName`.
    pub fn qualifier(&self) -> QName {
        if self.components.len() <= 1 {
            QName {
                components: Vec::new(),
                rooted: self.rooted,
            }
        } else {
            QName {
                components: self.components[..self.components.len() - 1].to_vec(),
                rooted: self.rooted,
            }
        }
    }

    /// Prepend `prefix`'s components ahead of this name's, adopting
    /// `prefix`'s rooted-ness if it is more specific than ours.
    pub fn prepend(&mut self, prefix: &QName) {
        if prefix.components.is_empty() {
            return;
        }
        let mut joined = prefix.components.clone();
        joined.extend(self.components.drain(..));
        self.components = joined;
        if prefix.rooted {
            self.rooted = true;
        }
    }

    /// Append `suffix`'s tail component(s) after this name's.
    pub fn append(&mut self, suffix: &QName) {
        self.components.extend(suffix.components.iter().cloned());
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        QName::unqualified(s)
    }
}

impl From<String> for QName {
    fn from(s: String) -> Self {
        QName::unqualified(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_joins_components_in_order() {
        let mut name = QName::unqualified("widgets");
        name.prepend(&QName::unqualified("shop"));
        assert_eq!(name.to_string(), "shop.widgets");
        assert_eq!(name.uname(), "widgets");
        assert!(name.qualified());
    }

    #[test]
    fn rooted_name_is_fully_qualified() {
        let name = QName::rooted(vec!["db".into(), "shop".into(), "widgets".into()]);
        assert!(name.fully_qualified());
        assert_eq!(name.qualifier().to_string(), "db.shop");
    }

    #[test]
    fn empty_qualifier_for_unqualified_name() {
        let name = QName::unqualified("widgets");
        assert!(!name.qualified());
        assert_eq!(name.qualifier(), QName::empty());
    }
}
