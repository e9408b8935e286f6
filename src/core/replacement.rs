//! Token → replacement mapping applied to names and file contents.

use serde::Serialize;
use std::collections::HashMap;

use crate::case::{Variant, VariantSet};
use crate::grouping::VariableGroups;
use crate::placeholder;

/// One resolved placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub token: String,
    pub variable: String,
    pub variant: Variant,
    pub value: String,
}

/// The final token → value mapping for one scaffolding run.
///
/// Entries are kept longest-token-first (ties in lexical order) so a token
/// that textually contains a shorter one is replaced before the shorter one
/// can clobber part of it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplacementMap {
    entries: Vec<Replacement>,
}

impl ReplacementMap {
    /// Build the map from grouped tokens and one raw value per variable.
    ///
    /// Every token of every group gets an entry. A variable with no supplied
    /// value renders from the empty string.
    pub fn build(groups: &VariableGroups, values: &HashMap<String, String>) -> Self {
        let mut entries = Vec::new();

        for (variable, tokens) in groups.iter() {
            let raw = values.get(variable).map(String::as_str).unwrap_or("");
            let variants = VariantSet::from_value(raw);

            for token in tokens {
                let variant = placeholder::detect_variant(placeholder::inner(token));
                entries.push(Replacement {
                    token: token.clone(),
                    variable: variable.clone(),
                    variant,
                    value: variants.get(variant).to_string(),
                });
            }
        }

        Self::from_entries(entries)
    }

    /// Literal token → value pairs, bypassing variant detection.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(token, value)| {
                let token = token.into();
                Replacement {
                    variable: placeholder::normalize_key(&token),
                    variant: placeholder::detect_variant(placeholder::inner(&token)),
                    token,
                    value: value.into(),
                }
            })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(mut entries: Vec<Replacement>) -> Self {
        entries.sort_by(|a, b| {
            b.token
                .len()
                .cmp(&a.token.len())
                .then_with(|| a.token.cmp(&b.token))
        });
        entries.dedup_by(|a, b| a.token == b.token);
        Self { entries }
    }

    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.token == token)
            .map(|r| r.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every token in `text`, longest token first.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in &self.entries {
            if result.contains(&entry.token) {
                result = result.replace(&entry.token, &entry.value);
            }
        }
        result
    }
}
