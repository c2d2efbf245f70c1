//! The default member-name-to-public-name rewrite applied before a data
//! member's name becomes a column name: C++ codebases overwhelmingly name
//! data members `m_foo` or `foo_`, and a generated schema reading `m_foo`
//! or `foo_` as a column name would be surprising to anyone who didn't
//! also read the C++ source.

/// Strips a leading `m_` prefix, then any remaining leading or trailing
/// underscores. If that leaves nothing (e.g. the member is literally
/// named `m_`), the original name is returned unchanged rather than an
/// empty string.
pub fn public_name(name: &str) -> String {
    let stripped = name.strip_prefix("m_").unwrap_or(name);
    let trimmed = stripped.trim_matches('_');
    if trimmed.is_empty() {
        name.to_string()
    } else {
        trimmed.to_string()
    }
}
