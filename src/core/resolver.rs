//! Include reference resolution.
//!
//! An include directive names another template fragment with a path-like
//! reference. Resolution order:
//!
//! 1. an absolute path to an existing directory is used as-is
//! 2. a first segment naming a known template definition resolves inside it
//! 3. each template root is tried in order, first as `root/reference`, then by
//!    matching the first segment against the root's immediate subdirectories
//!
//! For 2 and 3 the remaining segments select a subdirectory of the matched
//! template when it exists; otherwise the template's own root is used.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::template::{self, TemplateDefinition};

#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    roots: Vec<PathBuf>,
    lookup: BTreeMap<String, PathBuf>,
}

impl TemplateResolver {
    pub fn new(roots: Vec<PathBuf>, lookup: BTreeMap<String, PathBuf>) -> Self {
        Self { roots, lookup }
    }

    /// Build a resolver whose lookup table holds every enumerated definition.
    /// When two roots define the same name, the earlier root wins.
    pub fn from_definitions(roots: Vec<PathBuf>, definitions: &[TemplateDefinition]) -> Self {
        let mut lookup = BTreeMap::new();
        for def in definitions {
            lookup
                .entry(def.name.clone())
                .or_insert_with(|| def.path.clone());
        }
        Self { roots, lookup }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        let as_path = Path::new(reference);
        if as_path.is_absolute() {
            return as_path.is_dir().then(|| as_path.to_path_buf());
        }

        let segments = split_segments(reference);
        let (first, rest) = segments.split_first()?;

        if let Some(base) = self.lookup_definition(first) {
            return Some(descend_or_base(base, rest));
        }

        if template::is_ignored_name(first) && *first != ".." {
            return None;
        }

        for root in &self.roots {
            let direct = root.join(reference);
            if direct.is_dir() {
                return Some(direct);
            }

            if let Some(base) = find_child_dir(root, first) {
                return Some(descend_or_base(&base, rest));
            }
        }

        None
    }

    fn lookup_definition(&self, segment: &str) -> Option<&PathBuf> {
        self.lookup.get(segment).or_else(|| {
            self.lookup
                .iter()
                .find(|(name, _)| name_matches(name, segment))
                .map(|(_, path)| path)
        })
    }
}

/// Does a template directory name answer to `segment`?
/// Hidden templates answer to their bare name: `(common)` matches `common`.
pub fn name_matches(name: &str, segment: &str) -> bool {
    if name == segment {
        return true;
    }
    template::unwrap_hidden_name(name).is_some_and(|bare| bare == segment)
}

fn split_segments(reference: &str) -> Vec<&str> {
    reference
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn descend_or_base(base: &Path, rest: &[&str]) -> PathBuf {
    if rest.is_empty() {
        return base.to_path_buf();
    }

    let candidate = rest.iter().fold(base.to_path_buf(), |acc, s| acc.join(s));
    if candidate.is_dir() {
        candidate
    } else {
        base.to_path_buf()
    }
}

fn find_child_dir(root: &Path, segment: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if template::is_ignored_name(&name) || !name_matches(&name, segment) {
                return None;
            }
            Some(entry.path())
        })
        .collect();

    // exact name before the parenthesized form
    matches.sort_by_key(|p| {
        let exact = p.file_name().is_some_and(|n| n == segment);
        (!exact, p.clone())
    });
    matches.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdir(base: &Path, rel: &str) -> PathBuf {
        let path = base.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn resolves_absolute_directory() {
        let tmp = TempDir::new().unwrap();
        let target = mkdir(tmp.path(), "anywhere/fragment");
        let resolver = TemplateResolver::default();

        let resolved = resolver.resolve(target.to_str().unwrap());
        assert_eq!(resolved, Some(target));
    }

    #[test]
    fn absolute_missing_directory_is_unresolved() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let resolver = TemplateResolver::new(vec![tmp.path().to_path_buf()], BTreeMap::new());
        assert_eq!(resolver.resolve(missing.to_str().unwrap()), None);
    }

    #[test]
    fn lookup_table_wins_and_descends() {
        let tmp = TempDir::new().unwrap();
        let shared = mkdir(tmp.path(), "elsewhere/shared");
        let docs = mkdir(tmp.path(), "elsewhere/shared/docs");

        let mut lookup = BTreeMap::new();
        lookup.insert("shared".to_string(), shared.clone());
        let resolver = TemplateResolver::new(vec![], lookup);

        assert_eq!(resolver.resolve("shared"), Some(shared.clone()));
        assert_eq!(resolver.resolve("shared/docs"), Some(docs));
        // missing subdirectory falls back to the template root
        assert_eq!(resolver.resolve("shared/missing"), Some(shared));
    }

    #[test]
    fn lookup_matches_hidden_name() {
        let tmp = TempDir::new().unwrap();
        let hidden = mkdir(tmp.path(), "(common)");

        let mut lookup = BTreeMap::new();
        lookup.insert("(common)".to_string(), hidden.clone());
        let resolver = TemplateResolver::new(vec![], lookup);

        assert_eq!(resolver.resolve("common"), Some(hidden.clone()));
        assert_eq!(resolver.resolve("(common)"), Some(hidden));
    }

    #[test]
    fn roots_tried_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        mkdir(second.path(), "common");
        let in_first = mkdir(first.path(), "common");

        let resolver = TemplateResolver::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            BTreeMap::new(),
        );

        assert_eq!(resolver.resolve("common"), Some(in_first));
    }

    #[test]
    fn root_scan_matches_hidden_child_and_falls_back() {
        let tmp = TempDir::new().unwrap();
        let hidden = mkdir(tmp.path(), "(parts)");
        let header = mkdir(tmp.path(), "(parts)/header");

        let resolver = TemplateResolver::new(vec![tmp.path().to_path_buf()], BTreeMap::new());

        assert_eq!(resolver.resolve("parts/header"), Some(header));
        assert_eq!(resolver.resolve("parts/footer"), Some(hidden));
    }

    #[test]
    fn dot_directories_are_never_resolved() {
        let tmp = TempDir::new().unwrap();
        mkdir(tmp.path(), ".cache/inner");
        let resolver = TemplateResolver::new(vec![tmp.path().to_path_buf()], BTreeMap::new());
        assert_eq!(resolver.resolve(".cache"), None);
        assert_eq!(resolver.resolve(".cache/inner"), None);
    }

    #[test]
    fn unresolved_reference_is_none() {
        let tmp = TempDir::new().unwrap();
        let resolver = TemplateResolver::new(vec![tmp.path().to_path_buf()], BTreeMap::new());
        assert_eq!(resolver.resolve("missing"), None);
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("./"), None);
    }
}
