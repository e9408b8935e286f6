//! End-to-end scaffolding: pick a template, ask for one value per logical
//! variable, materialize.
//!
//! All interaction goes through [`Prompter`]; nothing is written to the
//! destination until every prompt has been answered.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::case::Variant;
use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::grouping::{self, VariableGroups};
use crate::lexicon::{self, IncludeSite, Lexicon};
use crate::materialize::{self, MaterializeReport};
use crate::placeholder;
use crate::replacement::{Replacement, ReplacementMap};
use crate::resolver::TemplateResolver;
use crate::template::{self, canonical_or_self, canonical_target, TemplateDefinition};

/// Source of the interactive answers. `Ok(None)` means the user cancelled.
pub trait Prompter {
    fn select_template(&mut self, choices: &[String]) -> Result<Option<String>>;

    fn value(
        &mut self,
        variable: &str,
        tokens: &BTreeSet<String>,
        default: &str,
    ) -> Result<Option<String>>;
}

/// Answers given up front (`--template`, `--var`), deferring anything else
/// to the wrapped prompter.
pub struct PresetPrompter<P> {
    template: Option<String>,
    values: HashMap<String, String>,
    fallback: P,
}

impl<P: Prompter> PresetPrompter<P> {
    /// Value keys are normalized the same way placeholder tokens are, so
    /// `--var project-name=x` answers `__projectName__`.
    pub fn new(template: Option<String>, values: Vec<(String, String)>, fallback: P) -> Self {
        let values = values
            .into_iter()
            .map(|(key, value)| (placeholder::normalize_key(&key), value))
            .collect();
        Self {
            template,
            values,
            fallback,
        }
    }
}

impl<P: Prompter> Prompter for PresetPrompter<P> {
    fn select_template(&mut self, choices: &[String]) -> Result<Option<String>> {
        match &self.template {
            Some(name) => Ok(Some(name.clone())),
            None => self.fallback.select_template(choices),
        }
    }

    fn value(
        &mut self,
        variable: &str,
        tokens: &BTreeSet<String>,
        default: &str,
    ) -> Result<Option<String>> {
        match self.values.get(variable) {
            Some(value) => Ok(Some(value.clone())),
            None => self.fallback.value(variable, tokens, default),
        }
    }
}

/// Template roots and everything enumerated from them.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub roots: Vec<PathBuf>,
    pub definitions: Vec<TemplateDefinition>,
    pub resolver: TemplateResolver,
}

impl Catalogue {
    /// Discover roots for a project and enumerate their definitions.
    pub fn discover(project_root: &Path, cli_roots: &[PathBuf], defaults: &Defaults) -> Result<Self> {
        if !project_root.is_dir() {
            return Err(Error::workspace_not_found(project_root.display().to_string()));
        }

        let roots = template::discover_roots(project_root, cli_roots, defaults);
        if roots.is_empty() {
            let searched = template::candidate_roots(project_root, cli_roots, defaults)
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            return Err(Error::template_no_roots(searched));
        }

        let definitions = template::list_definitions(&roots);
        let resolver = TemplateResolver::from_definitions(roots.clone(), &definitions);

        crate::log_status!(
            "templates",
            "{} root(s), {} template(s)",
            roots.len(),
            definitions.len()
        );

        Ok(Self {
            roots,
            definitions,
            resolver,
        })
    }

    pub fn visible_names(&self) -> Vec<String> {
        template::visible_names(&self.definitions)
    }

    /// A selectable (non-hidden) definition by name; first root wins.
    pub fn visible(&self, name: &str) -> Result<&TemplateDefinition> {
        self.definitions
            .iter()
            .find(|d| !d.hidden && d.name == name)
            .ok_or_else(|| Error::template_not_found(name, self.visible_names()))
    }

    fn root_names(&self) -> Vec<String> {
        self.roots.iter().map(|p| p.display().to_string()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub destination: PathBuf,
    pub project_root: PathBuf,
    pub template_roots: Vec<PathBuf>,
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableValue {
    pub variable: String,
    pub value: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub template: String,
    pub template_path: PathBuf,
    pub destination: PathBuf,
    pub variables: Vec<VariableValue>,
    pub replacements: Vec<Replacement>,
    pub materialized: MaterializeReport,
    pub warnings: Vec<String>,
    pub message: String,
}

/// Run one scaffolding operation.
pub fn run(request: &ScaffoldRequest, prompter: &mut dyn Prompter) -> Result<ScaffoldReport> {
    validate_destination(&request.destination)?;

    let catalogue = Catalogue::discover(
        &request.project_root,
        &request.template_roots,
        &request.defaults,
    )?;

    let choices = catalogue.visible_names();
    if choices.is_empty() {
        return Err(Error::template_none_visible(catalogue.root_names()));
    }

    let chosen = prompter
        .select_template(&choices)?
        .ok_or_else(|| Error::scaffold_cancelled("template"))?;
    let definition = catalogue.visible(&chosen)?;
    validate_destination_outside(&request.destination, definition)?;

    let lexicon = lexicon::scan_template(&definition.path, &catalogue.resolver);
    let groups = grouping::group(&lexicon.tokens);

    let mut warnings = Vec::new();
    if groups.is_empty() {
        crate::log_status!("warning", "no variables found in {}", definition.name);
        warnings.push(format!("no variables found in {}", definition.name));
    }

    let default_value = destination_basename(&request.destination);
    let mut values = HashMap::new();
    for (variable, tokens) in groups.iter() {
        let value = prompter
            .value(variable, tokens, &default_value)?
            .ok_or_else(|| Error::scaffold_cancelled(format!("value:{}", variable)))?;
        values.insert(variable.clone(), value);
    }

    let replacements = ReplacementMap::build(&groups, &values);
    let materialized = materialize::materialize(
        &definition.path,
        &request.destination,
        &replacements,
        &catalogue.resolver,
    )?;
    warnings.extend(materialized.warnings.iter().cloned());

    let message = format!(
        "Created {} from template {}",
        request.destination.display(),
        definition.name
    );
    crate::log_status!("new", "{}", message);

    Ok(ScaffoldReport {
        template: definition.name.clone(),
        template_path: definition.path.clone(),
        destination: request.destination.clone(),
        variables: variable_values(&groups, &values),
        replacements: replacements.entries().to_vec(),
        materialized,
        warnings,
        message,
    })
}

/// The destination may be missing or an existing directory, never a file.
pub fn validate_destination(destination: &Path) -> Result<()> {
    if destination.as_os_str().is_empty() {
        return Err(Error::destination_invalid("", "Destination path is empty"));
    }
    if destination.exists() && !destination.is_dir() {
        return Err(Error::destination_invalid(
            destination.display().to_string(),
            "Destination exists and is not a directory",
        ));
    }
    Ok(())
}

/// Template definitions are read-only; a destination at or below the chosen
/// one would be copied into itself.
pub fn validate_destination_outside(destination: &Path, definition: &TemplateDefinition) -> Result<()> {
    let target = canonical_target(destination);
    let template = canonical_or_self(&definition.path);
    if target.starts_with(&template) {
        return Err(Error::destination_invalid(
            destination.display().to_string(),
            format!("Destination is inside template {}", definition.name),
        )
        .with_hint("Choose a destination outside the template roots"));
    }
    Ok(())
}

/// Default answer for every value prompt: the destination's final component.
pub fn destination_basename(destination: &Path) -> String {
    destination
        .file_name()
        .map(|n| n.to_os_string())
        .or_else(|| canonical_or_self(destination).file_name().map(|n| n.to_os_string()))
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn variable_values(groups: &VariableGroups, values: &HashMap<String, String>) -> Vec<VariableValue> {
    groups
        .iter()
        .map(|(variable, tokens)| VariableValue {
            variable: variable.clone(),
            value: values.get(variable).cloned().unwrap_or_default(),
            tokens: tokens.iter().cloned().collect(),
        })
        .collect()
}

// =============================================================================
// Inspection
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TokenUsage {
    pub token: String,
    pub variant: Variant,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableUsage {
    pub variable: String,
    pub tokens: Vec<TokenUsage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInspection {
    pub template: TemplateDefinition,
    pub tokens: Vec<String>,
    pub variables: Vec<VariableUsage>,
    pub includes: Vec<IncludeSite>,
    pub skipped_files: Vec<PathBuf>,
    /// Include sites whose fragments were not scanned.
    pub warnings: Vec<String>,
}

/// What a template asks for, without prompting or writing anything.
pub fn inspect(definition: &TemplateDefinition, resolver: &TemplateResolver) -> TemplateInspection {
    let Lexicon {
        tokens,
        includes,
        skipped_files,
        ..
    } = lexicon::scan_template(&definition.path, resolver);
    let groups = grouping::group(&tokens);

    let variables = groups
        .iter()
        .map(|(variable, tokens)| VariableUsage {
            variable: variable.clone(),
            tokens: tokens
                .iter()
                .map(|token| TokenUsage {
                    token: token.clone(),
                    variant: placeholder::detect_variant(placeholder::inner(token)),
                })
                .collect(),
        })
        .collect();

    let warnings = includes
        .iter()
        .filter(|site| site.resolved.is_none())
        .map(|site| {
            if site.deferred {
                format!(
                    "include resolved after substitution: {} (placeholders only in its target are not prompted for)",
                    site.reference
                )
            } else {
                format!("include not found: {}", site.reference)
            }
        })
        .collect();

    TemplateInspection {
        template: definition.clone(),
        tokens: tokens.into_iter().collect(),
        variables,
        includes,
        skipped_files,
        warnings,
    }
}
