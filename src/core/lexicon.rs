//! Placeholder discovery across a template tree.
//!
//! Every entry name and every UTF-8 file body is scanned for `__inner__`
//! tokens. Include directives are followed to the fragment they reference so
//! tokens used only inside included fragments are discovered as well.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::io;
use crate::placeholder;
use crate::resolver::TemplateResolver;
use crate::template::canonical_or_self;

/// An include directive met during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeSite {
    pub reference: String,
    pub entry: PathBuf,
    /// `None` when the reference does not resolve yet. References that
    /// contain placeholders are only resolvable after substitution.
    pub resolved: Option<PathBuf>,
    /// The reference contains placeholders, so its target is only known
    /// after substitution and was not scanned.
    pub deferred: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Lexicon {
    pub tokens: BTreeSet<String>,
    pub includes: Vec<IncludeSite>,
    /// Files whose content was not scanned (unreadable or not UTF-8).
    pub skipped_files: Vec<PathBuf>,
    pub directories_scanned: usize,
    pub files_scanned: usize,
}

struct ScanContext<'a> {
    resolver: &'a TemplateResolver,
    visited: HashSet<PathBuf>,
    lexicon: Lexicon,
}

/// Scan one or more template directories.
///
/// A directory reached twice (overlapping roots, or an include chain that
/// loops back) is scanned once.
pub fn scan(roots: &[PathBuf], resolver: &TemplateResolver) -> Lexicon {
    let mut ctx = ScanContext {
        resolver,
        visited: HashSet::new(),
        lexicon: Lexicon::default(),
    };

    for root in roots {
        visit_dir(root, &mut ctx);
    }

    crate::log_status!(
        "scan",
        "Found {} placeholder(s) in {} file(s), {} include(s)",
        ctx.lexicon.tokens.len(),
        ctx.lexicon.files_scanned,
        ctx.lexicon.includes.len()
    );

    ctx.lexicon
}

pub fn scan_template(root: &Path, resolver: &TemplateResolver) -> Lexicon {
    scan(&[root.to_path_buf()], resolver)
}

fn visit_dir(dir: &Path, ctx: &mut ScanContext<'_>) {
    if !ctx.visited.insert(canonical_or_self(dir)) {
        return;
    }

    let Ok(entries) = io::read_dir_sorted(dir, "scan template directory") else {
        return;
    };
    ctx.lexicon.directories_scanned += 1;

    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        collect_tokens(&name, &mut ctx.lexicon.tokens);

        if let Some(reference) = placeholder::include_reference(&name) {
            visit_include(reference, &path, ctx);
            continue;
        }

        if path.is_dir() {
            visit_dir(&path, ctx);
        } else {
            visit_file(&path, ctx);
        }
    }
}

fn visit_include(reference: &str, entry: &Path, ctx: &mut ScanContext<'_>) {
    let has_placeholders = placeholder::find_tokens(reference).next().is_some();
    let resolved = if has_placeholders {
        None
    } else {
        ctx.resolver.resolve(reference)
    };

    ctx.lexicon.includes.push(IncludeSite {
        reference: reference.to_string(),
        entry: entry.to_path_buf(),
        resolved: resolved.clone(),
        deferred: has_placeholders,
    });

    if let Some(target) = resolved {
        visit_dir(&target, ctx);
    }
}

fn visit_file(path: &Path, ctx: &mut ScanContext<'_>) {
    let content = io::read_bytes(path, "scan template file")
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match content {
        Some(text) => {
            ctx.lexicon.files_scanned += 1;
            collect_tokens(&text, &mut ctx.lexicon.tokens);
        }
        None => ctx.lexicon.skipped_files.push(path.to_path_buf()),
    }
}

fn collect_tokens(text: &str, found: &mut BTreeSet<String>) {
    for token in placeholder::find_tokens(text) {
        if !found.contains(token) {
            found.insert(token.to_string());
        }
    }
}
