//! Copy a template tree to its destination with placeholders substituted.
//!
//! Include directives are spliced: the resolved fragment's entries land in the
//! directory that held the directive, with no extra level for the directive
//! itself.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;
use crate::io;
use crate::placeholder;
use crate::replacement::ReplacementMap;
use crate::resolver::TemplateResolver;
use crate::template::{canonical_or_self, canonical_target};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    pub directories_created: usize,
    pub files_written: usize,
    pub binary_files_copied: usize,
    pub includes_spliced: usize,
    pub warnings: Vec<String>,
}

struct MaterializeContext<'a> {
    replacements: &'a ReplacementMap,
    resolver: &'a TemplateResolver,
    /// Canonical paths of the template and every include currently being
    /// spliced, outermost first.
    chain: HashSet<PathBuf>,
    /// Canonical source directories on the current copy path.
    copying: HashSet<PathBuf>,
    /// Canonical destination root; never read back as a source.
    destination_root: PathBuf,
    report: MaterializeReport,
}

impl MaterializeContext<'_> {
    fn warn(&mut self, message: String) {
        crate::log_status!("warning", "{}", message);
        self.report.warnings.push(message);
    }
}

/// Materialize `source` into `destination`.
///
/// Local problems (an include that does not resolve, an include cycle, an
/// unreadable source file) become warnings in the report. Failing to create
/// or write a destination entry aborts with an error and leaves whatever was
/// already written in place.
pub fn materialize(
    source: &Path,
    destination: &Path,
    replacements: &ReplacementMap,
    resolver: &TemplateResolver,
) -> Result<MaterializeReport> {
    let mut ctx = MaterializeContext {
        replacements,
        resolver,
        chain: HashSet::new(),
        copying: HashSet::new(),
        destination_root: canonical_target(destination),
        report: MaterializeReport::default(),
    };
    ctx.chain.insert(canonical_or_self(source));

    copy_dir(source, destination, &mut ctx)?;

    crate::log_status!(
        "materialize",
        "Wrote {} file(s), {} dir(s), {} include(s) spliced",
        ctx.report.files_written + ctx.report.binary_files_copied,
        ctx.report.directories_created,
        ctx.report.includes_spliced
    );

    Ok(ctx.report)
}

fn copy_dir(source: &Path, destination: &Path, ctx: &mut MaterializeContext<'_>) -> Result<()> {
    let key = canonical_or_self(source);
    if !ctx.copying.insert(key.clone()) {
        ctx.warn(format!("directory cycle: {} (skipped)", source.display()));
        return Ok(());
    }

    let result = copy_entries(source, destination, ctx);
    ctx.copying.remove(&key);
    result
}

fn copy_entries(source: &Path, destination: &Path, ctx: &mut MaterializeContext<'_>) -> Result<()> {
    if !destination.is_dir() {
        io::ensure_dir(destination, "create destination directory")?;
        ctx.report.directories_created += 1;
    }

    let entries = io::read_dir_sorted(source, "read template directory")?;

    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(reference) = placeholder::include_reference(&name) {
            splice_include(reference, destination, ctx)?;
            continue;
        }

        let rendered = ctx.replacements.apply(&name);
        if rendered.is_empty() {
            ctx.warn(format!(
                "empty name after substitution: {} (skipped)",
                path.display()
            ));
            continue;
        }
        if !is_single_component(&rendered) {
            ctx.warn(format!(
                "unsafe name after substitution: {} -> {} (skipped)",
                path.display(),
                rendered
            ));
            continue;
        }

        let target = destination.join(&rendered);
        if path.is_dir() {
            if canonical_or_self(&path) == ctx.destination_root {
                ctx.warn(format!(
                    "destination inside template: {} (skipped)",
                    path.display()
                ));
                continue;
            }
            copy_dir(&path, &target, ctx)?;
        } else {
            copy_file(&path, &target, ctx)?;
        }
    }

    Ok(())
}

/// A rendered entry name must stay one plain component of its parent:
/// no separators, no root, no `.`/`..`.
fn is_single_component(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn splice_include(
    reference: &str,
    destination: &Path,
    ctx: &mut MaterializeContext<'_>,
) -> Result<()> {
    let rendered = ctx.replacements.apply(reference);

    let Some(target) = ctx.resolver.resolve(&rendered) else {
        ctx.warn(format!("include not found: {} (skipped)", rendered));
        return Ok(());
    };

    let key = canonical_or_self(&target);
    if !ctx.chain.insert(key.clone()) {
        ctx.warn(format!("include cycle: {} (skipped)", rendered));
        return Ok(());
    }

    crate::log_status!("include", "{} -> {}", rendered, target.display());
    ctx.report.includes_spliced += 1;

    let result = copy_dir(&target, destination, ctx);
    ctx.chain.remove(&key);
    result
}

fn copy_file(source: &Path, target: &Path, ctx: &mut MaterializeContext<'_>) -> Result<()> {
    let bytes = match io::read_bytes(source, "read template file") {
        Ok(bytes) => bytes,
        Err(err) => {
            ctx.warn(format!(
                "unreadable file: {} (skipped: {})",
                source.display(),
                err.message
            ));
            return Ok(());
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => {
            let rendered = ctx.replacements.apply(&text);
            io::write_bytes(target, rendered.as_bytes(), "write destination file")?;
            ctx.report.files_written += 1;
        }
        Err(err) => {
            io::write_bytes(target, err.as_bytes(), "copy binary file")?;
            ctx.report.binary_files_copied += 1;
        }
    }

    Ok(())
}
