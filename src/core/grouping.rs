//! Collapse placeholder tokens into logical variables.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::placeholder;

/// Logical-variable key → tokens that denote it. A partition of the scanned
/// token set: every token appears in exactly one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableGroups(BTreeMap<String, BTreeSet<String>>);

impl VariableGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    /// Variable keys in sorted order; this is the prompt order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn tokens(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}

pub fn group(tokens: &BTreeSet<String>) -> VariableGroups {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for token in tokens {
        groups
            .entry(placeholder::normalize_key(token))
            .or_default()
            .insert(token.clone());
    }
    VariableGroups(groups)
}
