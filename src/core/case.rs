//! Case-variant engine: split a raw value into words and render it in the six
//! naming styles a template can ask for.
//!
//! ```text
//! "my thing"   -> flat "mything", upper "MYTHING", pascal "MyThing",
//!                 camel "myThing", snake "my_thing", kebab "my-thing"
//! "HTTPServer" -> words ["http", "server"]
//! ```

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s._-]+").unwrap());

// lowercase-or-digit followed by uppercase: fooBar, v2Api
static LOWER_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

// acronym followed by a capitalized word: HTTPServer
static ACRONYM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

/// One of the six renderings of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// All words lowercased and concatenated: `mything`.
    Flat,
    /// Flat, uppercased: `MYTHING`.
    Upper,
    Pascal,
    Camel,
    Snake,
    Kebab,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Flat,
        Variant::Upper,
        Variant::Pascal,
        Variant::Camel,
        Variant::Snake,
        Variant::Kebab,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Flat => "flat",
            Variant::Upper => "upper",
            Variant::Pascal => "pascal",
            Variant::Camel => "camel",
            Variant::Snake => "snake",
            Variant::Kebab => "kebab",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six renderings derived from one raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSet {
    pub flat: String,
    pub upper: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
}

impl VariantSet {
    pub fn from_value(raw: &str) -> Self {
        Self::from_words(&split_words(raw))
    }

    pub fn from_words(words: &[String]) -> Self {
        let flat = words.concat();
        let upper = flat.to_uppercase();
        let pascal: String = words.iter().map(|w| capitalize(w)).collect();
        let camel = match words.split_first() {
            Some((first, rest)) => {
                let mut out = first.clone();
                out.extend(rest.iter().map(|w| capitalize(w)));
                out
            }
            None => String::new(),
        };

        VariantSet {
            flat,
            upper,
            pascal,
            camel,
            snake: words.join("_"),
            kebab: words.join("-"),
        }
    }

    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Flat => &self.flat,
            Variant::Upper => &self.upper,
            Variant::Pascal => &self.pascal,
            Variant::Camel => &self.camel,
            Variant::Snake => &self.snake,
            Variant::Kebab => &self.kebab,
        }
    }
}

/// Split a raw value into lowercase words.
///
/// Separator runs (whitespace, `.`, `_`, `-`) become word breaks, as do
/// lower→upper transitions and the end of an acronym that precedes a
/// capitalized word.
pub fn split_words(raw: &str) -> Vec<String> {
    let spaced = SEPARATOR_RUN.replace_all(raw, " ");
    let spaced = LOWER_UPPER.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_WORD.replace_all(&spaced, "$1 $2");

    spaced
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Uppercase the first character, leave the rest untouched.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}
