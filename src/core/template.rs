//! Template roots and the template definitions they contain.
//!
//! A template root is a directory whose immediate subdirectories are template
//! definitions. Names starting with `.` are ignored entirely; names wrapped in
//! parentheses (`(common)`) are hidden from selection but remain available as
//! include targets.

use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::Defaults;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub path: PathBuf,
    pub root: PathBuf,
    pub hidden: bool,
}

/// `.git`, `.DS_Store`, `.cache`: never a template.
pub fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.')
}

/// `(common)` -> `Some("common")`.
pub fn unwrap_hidden_name(name: &str) -> Option<&str> {
    name.strip_prefix('(')?.strip_suffix(')')
}

pub fn is_hidden_name(name: &str) -> bool {
    unwrap_hidden_name(name).is_some()
}

/// Candidate template roots, in search order, before existence checks.
///
/// CLI-supplied roots come first, then configured `template_paths`, then the
/// conventional `<project>/<templates_dir>`. Relative paths are resolved
/// against the project root after `~`/env expansion.
pub fn candidate_roots(project_root: &Path, cli_roots: &[PathBuf], defaults: &Defaults) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = cli_roots
        .iter()
        .map(|p| absolutize(project_root, p))
        .collect();

    for configured in &defaults.template_paths {
        let expanded = shellexpand::full(configured)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| configured.clone());
        candidates.push(absolutize(project_root, Path::new(&expanded)));
    }

    candidates.push(project_root.join(&defaults.templates_dir));
    candidates
}

/// Existing template roots in search order. Roots that do not exist are
/// dropped; duplicates keep their first position.
pub fn discover_roots(project_root: &Path, cli_roots: &[PathBuf], defaults: &Defaults) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    candidate_roots(project_root, cli_roots, defaults)
        .into_iter()
        .filter(|p| p.is_dir())
        .filter(|p| seen.insert(canonical_or_self(p)))
        .collect()
}

/// Every template definition under the given roots, root order first and
/// name order within a root. Dot-prefixed directories are skipped.
pub fn list_definitions(roots: &[PathBuf]) -> Vec<TemplateDefinition> {
    let mut definitions = Vec::new();

    for root in roots {
        let Ok(entries) = fs::read_dir(root) else {
            crate::log_status!("templates", "Cannot read template root {}", root.display());
            continue;
        };

        let mut in_root: Vec<TemplateDefinition> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if is_ignored_name(&name) {
                    return None;
                }
                Some(TemplateDefinition {
                    hidden: is_hidden_name(&name),
                    name,
                    path: entry.path(),
                    root: root.clone(),
                })
            })
            .collect();

        in_root.sort_by(|a, b| a.name.cmp(&b.name));
        definitions.extend(in_root);
    }

    definitions
}

/// Names offered in the template picker: hidden definitions excluded, a name
/// defined in several roots listed once.
pub fn visible_names(definitions: &[TemplateDefinition]) -> Vec<String> {
    let mut seen = HashSet::new();
    definitions
        .iter()
        .filter(|d| !d.hidden)
        .filter(|d| seen.insert(d.name.as_str()))
        .map(|d| d.name.clone())
        .collect()
}

/// First definition with exactly this name, hidden ones included.
pub fn find_definition<'a>(
    definitions: &'a [TemplateDefinition],
    name: &str,
) -> Result<&'a TemplateDefinition> {
    definitions
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| Error::template_not_found(name, visible_names(definitions)))
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub(crate) fn canonical_or_self(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Canonical form of a path that may not exist yet: the deepest existing
/// ancestor is canonicalized and the missing tail appended.
pub(crate) fn canonical_target(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => return path.to_path_buf(),
        }
    };

    let mut tail = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(canonical) = fs::canonicalize(current) {
            return tail
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                current = parent;
            }
            _ => return absolute,
        }
    }
}
