//! The C++ reserved-word set and the escaping algorithm that keeps derived
//! identifiers (accessor/modifier names, generated member names) from
//! colliding with it.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for kw in [
            "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool",
            "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class",
            "compl", "concept", "const", "consteval", "constexpr", "constinit", "const_cast",
            "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete",
            "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
            "false", "float", "for", "friend", "goto", "if", "inline", "int", "long", "mutable",
            "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or",
            "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
            "requires", "return", "short", "signed", "sizeof", "static", "static_assert",
            "static_cast", "struct", "switch", "template", "this", "thread_local", "throw",
            "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
            "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
            // Not keywords, but reserved or otherwise problematic in generated contexts.
            "NULL",
        ] {
            set.insert(kw);
        }
        set
    };
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// Rewrites `name` into something safe to emit as a C++ identifier:
///
/// - any character outside `[A-Za-z0-9_]` becomes `_`
/// - if the result would not start with a letter or underscore, it is
///   prefixed with `cxx` (or `cxx_` if the first substituted character is
///   itself `_`, to avoid a double underscore)
/// - an empty result becomes `cxx`
/// - a result that collides with a reserved word gets a trailing `_`
pub fn escape(name: &str) -> String {
    if name.is_empty() {
        return "cxx".to_string();
    }

    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }

    let starts_ok = out
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);

    if !starts_ok {
        if out.starts_with('_') {
            out.insert_str(0, "cxx");
        } else {
            out.insert_str(0, "cxx_");
        }
    }

    if out.is_empty() {
        out = "cxx".to_string();
    }

    if is_keyword(&out) {
        out.push('_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_clean_identifiers_alone() {
        assert_eq!(escape("widget_count"), "widget_count");
    }

    #[test]
    fn replaces_invalid_characters() {
        assert_eq!(escape("first name"), "first_name");
        assert_eq!(escape("a-b.c"), "a_b_c");
    }

    #[test]
    fn prefixes_names_starting_with_a_digit() {
        assert_eq!(escape("123abc"), "cxx_123abc");
    }

    #[test]
    fn empty_name_becomes_cxx() {
        assert_eq!(escape(""), "cxx");
    }

    #[test]
    fn keyword_collision_gets_a_trailing_underscore() {
        assert_eq!(escape("class"), "class_");
        assert_eq!(escape("int"), "int_");
    }

    #[test]
    fn non_keyword_is_unaffected() {
        assert!(!is_keyword("widget"));
        assert_eq!(escape("widget"), "widget");
    }
}
