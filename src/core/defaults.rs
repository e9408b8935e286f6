use serde::{Deserialize, Serialize};
use std::fs;

use crate::paths;

/// Root configuration structure for stencil.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StencilConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via stencil.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Defaults {
    /// Extra template roots, searched before the project's templates dir.
    /// Relative entries resolve against the project root; `~` and `$VAR` expand.
    #[serde(default)]
    pub template_paths: Vec<String>,

    /// Conventional per-project template root.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template_paths: Vec::new(),
            templates_dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> String {
    ".templates".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If stencil.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full stencil.json config, falling back to defaults on any error.
pub fn load_config() -> StencilConfig {
    load_config_from_file().unwrap_or_default()
}

/// Attempt to load config from stencil.json file.
pub fn load_config_from_file() -> crate::Result<StencilConfig> {
    let path = paths::stencil_json()?;

    if !path.exists() {
        return Err(crate::Error::other("stencil.json not found"));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to stencil.json file (creates if missing).
pub fn save_config(config: &StencilConfig) -> crate::Result<()> {
    let path = paths::stencil_json()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize stencil.json".to_string()))
    })?;

    crate::io::write_file_atomic(&path, &content, &format!("write {}", path.display()))
}

/// Add a template root to the configured search paths.
/// Returns false when the path was already configured.
pub fn add_template_path(path: &str) -> crate::Result<bool> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(crate::Error::config_invalid_value(
            "template_paths",
            Some(path.to_string()),
            "Template path cannot be empty",
        ));
    }

    let mut config = load_config();
    if config.defaults.template_paths.iter().any(|p| p == trimmed) {
        return Ok(false);
    }

    config.defaults.template_paths.push(trimmed.to_string());
    save_config(&config)?;
    Ok(true)
}

/// Remove a configured template root. Returns false when it was not present.
pub fn remove_template_path(path: &str) -> crate::Result<bool> {
    let mut config = load_config();
    let before = config.defaults.template_paths.len();
    config.defaults.template_paths.retain(|p| p != path.trim());

    if config.defaults.template_paths.len() == before {
        return Ok(false);
    }

    save_config(&config)?;
    Ok(true)
}

/// Check if stencil.json file exists
pub fn config_exists() -> bool {
    paths::stencil_json().map(|p| p.exists()).unwrap_or(false)
}

/// Delete stencil.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::stencil_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to stencil.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::stencil_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_use_dot_templates() {
        let defaults = builtin_defaults();
        assert_eq!(defaults.templates_dir, ".templates");
        assert!(defaults.template_paths.is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: StencilConfig =
            serde_json::from_str(r#"{"defaults":{"template_paths":["~/templates"]}}"#).unwrap();
        assert_eq!(config.defaults.template_paths, vec!["~/templates"]);
        assert_eq!(config.defaults.templates_dir, ".templates");
    }

    #[test]
    fn empty_json_is_builtin() {
        let config: StencilConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StencilConfig::default());
    }
}
