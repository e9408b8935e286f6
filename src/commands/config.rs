use clap::{Args, Subcommand};
use serde::Serialize;

use stencil::defaults::{self, Defaults, StencilConfig};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore stencil.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Add an extra template root (relative paths resolve per project)
    AddPath {
        /// Directory containing template definitions; `~` and `$VAR` expand
        path: String,
    },
    /// Remove a configured template root
    RemovePath {
        /// Path exactly as it was added
        path: String,
    },
    /// Reset configuration to built-in defaults (deletes stencil.json)
    Reset,
    /// Show the path to stencil.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<StencilConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            template_path: None,
            changed: None,
            deleted: None,
        }
    }
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::AddPath { path } => add_path(&path),
        ConfigCommand::RemovePath { path } => remove_path(&path),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.show");
    if builtin {
        output.defaults = Some(defaults::builtin_defaults());
    } else {
        output.config = Some(defaults::load_config());
    }
    Ok((output, 0))
}

fn add_path(template_path: &str) -> CmdResult<ConfigOutput> {
    let added = defaults::add_template_path(template_path)?;

    let mut output = ConfigOutput::new("config.add-path");
    output.config = Some(defaults::load_config());
    output.template_path = Some(template_path.trim().to_string());
    output.changed = Some(added);
    Ok((output, 0))
}

fn remove_path(template_path: &str) -> CmdResult<ConfigOutput> {
    let removed = defaults::remove_template_path(template_path)?;
    if !removed {
        let configured = defaults::load_defaults().template_paths;
        return Err(stencil::Error::config_invalid_value(
            "template_paths",
            Some(template_path.to_string()),
            "Template path is not configured",
        )
        .with_hint(format!("Configured paths: {}", configured.join(", "))));
    }

    let mut output = ConfigOutput::new("config.remove-path");
    output.config = Some(defaults::load_config());
    output.template_path = Some(template_path.trim().to_string());
    output.changed = Some(true);
    Ok((output, 0))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    let mut output = ConfigOutput::new("config.reset");
    output.defaults = Some(defaults::builtin_defaults());
    output.path = Some(defaults::config_path()?);
    output.deleted = Some(deleted);
    Ok((output, 0))
}

fn path() -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.path");
    output.path = Some(defaults::config_path()?);
    output.exists = Some(defaults::config_exists());
    Ok((output, 0))
}
