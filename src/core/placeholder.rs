//! Placeholder token lexical rules.
//!
//! A placeholder is `__inner__` where `inner` is `[A-Za-z0-9_-]+`. Its casing
//! and separators say which rendering of the value belongs at that site:
//!
//! | token            | variant |
//! |------------------|---------|
//! | `__name__`       | flat    |
//! | `__NAME__`       | upper   |
//! | `__Name__`       | pascal  |
//! | `__myName__`     | camel   |
//! | `__my_name__`    | snake   |
//! | `__my-name__`    | kebab   |
//!
//! A trailing `case` marker (`__NameCase__`, `__NAME_CASE__`) is optional
//! metadata and never part of the variable identity.

use regex::Regex;
use std::sync::LazyLock;

use crate::case::Variant;

pub const MARKER: &str = "__";
pub const INCLUDE_TOKEN: &str = "__INCLUDE__";

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Za-z0-9_-]+)__").unwrap());

static INCLUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__INCLUDE__\((.+)\)$").unwrap());

/// Every placeholder token in `text`, include tokens excluded.
pub fn find_tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !token.starts_with(INCLUDE_TOKEN))
}

/// The reference of an include directive entry name, if `name` is one.
pub fn include_reference(name: &str) -> Option<&str> {
    INCLUDE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Strip the `__` markers from a token.
pub fn inner(token: &str) -> &str {
    let trimmed = token.strip_prefix(MARKER).unwrap_or(token);
    trimmed.strip_suffix(MARKER).unwrap_or(trimmed)
}

/// Remove a trailing case marker from inner text.
///
/// The marker is only recognised at a word boundary: after `_` or `-`
/// (`name_case`, `NAME-CASE`) or as `Case` right after a lowercase letter or
/// digit (`nameCase`). `namecase` and `showcase` are left alone, as is a bare
/// `case`.
pub fn strip_case_marker(inner: &str) -> &str {
    let len = inner.len();
    if len <= 4 || !inner.is_char_boundary(len - 4) {
        return inner;
    }

    let (head, tail) = inner.split_at(len - 4);
    if !tail.eq_ignore_ascii_case("case") {
        return inner;
    }

    if let Some(stem) = head.strip_suffix(['_', '-']) {
        if !stem.is_empty() {
            return stem;
        }
        return inner;
    }

    let camel_marker = tail == "Case"
        && head
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if camel_marker {
        head
    } else {
        inner
    }
}

/// Canonical logical-variable key for a token.
///
/// `__name__`, `__Name__`, `__NAME_CASE__` and `__na-me__` all map to `name`.
pub fn normalize_key(token: &str) -> String {
    strip_case_marker(inner(token))
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Which rendering a placeholder's inner text asks for.
///
/// Rules, first match wins:
/// 1. contains `-` → kebab
/// 2. contains `_` → snake
/// 3. only uppercase letters and digits → upper
/// 4. only lowercase letters and digits → flat
/// 5. starts uppercase → pascal, starts lowercase → camel
/// 6. anything else → pascal
pub fn detect_variant(inner: &str) -> Variant {
    let text = strip_case_marker(inner);

    if text.contains('-') {
        return Variant::Kebab;
    }
    if text.contains('_') {
        return Variant::Snake;
    }
    if text.is_empty() {
        return Variant::Pascal;
    }
    if text
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Variant::Upper;
    }
    if text
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Variant::Flat;
    }

    match text.chars().next() {
        Some(c) if c.is_ascii_lowercase() => Variant::Camel,
        _ => Variant::Pascal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::VariantSet;

    #[test]
    fn finds_tokens_in_text() {
        let found: Vec<&str> = find_tokens("class __NameCase__ extends __base__ {}").collect();
        assert_eq!(found, vec!["__NameCase__", "__base__"]);
    }

    #[test]
    fn skips_include_tokens() {
        let found: Vec<&str> = find_tokens("__INCLUDE__(shared/__name__)").collect();
        assert_eq!(found, vec!["__name__"]);
    }

    #[test]
    fn ignores_single_underscores() {
        assert_eq!(find_tokens("_name_ and __ alone").count(), 0);
    }

    #[test]
    fn include_reference_parses() {
        assert_eq!(include_reference("__INCLUDE__(common)"), Some("common"));
        assert_eq!(
            include_reference("__INCLUDE__(parts/__name__)"),
            Some("parts/__name__")
        );
        assert_eq!(include_reference("__INCLUDE__"), None);
        assert_eq!(include_reference("x__INCLUDE__(common)"), None);
        assert_eq!(include_reference("__name__"), None);
    }

    #[test]
    fn inner_strips_markers() {
        assert_eq!(inner("__my_name__"), "my_name");
        assert_eq!(inner("plain"), "plain");
    }

    #[test]
    fn case_marker_stripped_at_boundaries() {
        assert_eq!(strip_case_marker("NameCase"), "Name");
        assert_eq!(strip_case_marker("nameCase"), "name");
        assert_eq!(strip_case_marker("NAME_CASE"), "NAME");
        assert_eq!(strip_case_marker("name_case"), "name");
        assert_eq!(strip_case_marker("my-name-case"), "my-name");
        assert_eq!(strip_case_marker("item2Case"), "item2");
    }

    #[test]
    fn case_marker_kept_without_boundary() {
        assert_eq!(strip_case_marker("namecase"), "namecase");
        assert_eq!(strip_case_marker("showcase"), "showcase");
        assert_eq!(strip_case_marker("NAMECASE"), "NAMECASE");
        assert_eq!(strip_case_marker("Case"), "Case");
        assert_eq!(strip_case_marker("_case"), "_case");
        assert_eq!(strip_case_marker("NameCASE"), "NameCASE");
    }

    #[test]
    fn normalizes_token_family_to_one_key() {
        for token in ["__name__", "__Name__", "__NAME__", "__NAME_CASE__", "__na_me__", "__NameCase__"] {
            assert_eq!(normalize_key(token), "name", "{}", token);
        }
        assert_eq!(normalize_key("__my-thing__"), "mything");
        assert_eq!(normalize_key("__showcase__"), "showcase");
    }

    #[test]
    fn detects_by_priority() {
        assert_eq!(detect_variant("my-name"), Variant::Kebab);
        assert_eq!(detect_variant("My_Name-x"), Variant::Kebab);
        assert_eq!(detect_variant("my_name"), Variant::Snake);
        assert_eq!(detect_variant("NAME"), Variant::Upper);
        assert_eq!(detect_variant("NAME2"), Variant::Upper);
        assert_eq!(detect_variant("123"), Variant::Upper);
        assert_eq!(detect_variant("name"), Variant::Flat);
        assert_eq!(detect_variant("name2"), Variant::Flat);
        assert_eq!(detect_variant("Name"), Variant::Pascal);
        assert_eq!(detect_variant("myName"), Variant::Camel);
        assert_eq!(detect_variant("naMe"), Variant::Camel);
        assert_eq!(detect_variant("2dShape"), Variant::Pascal);
    }

    #[test]
    fn detection_ignores_case_marker() {
        assert_eq!(detect_variant("NameCase"), Variant::Pascal);
        assert_eq!(detect_variant("NAME_CASE"), Variant::Upper);
        assert_eq!(detect_variant("nameCase"), Variant::Flat);
        assert_eq!(detect_variant("myNameCase"), Variant::Camel);
        assert_eq!(detect_variant("my_name_case"), Variant::Snake);
    }

    #[test]
    fn detection_recovers_rendered_style() {
        let set = VariantSet::from_value("order line item");
        for variant in Variant::ALL {
            assert_eq!(detect_variant(set.get(variant)), variant, "{}", variant);
        }
    }
}
