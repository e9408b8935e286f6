use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use stencil::defaults;
use stencil::scaffold::{self, Catalogue, TemplateInspection};
use stencil::template::{self, TemplateDefinition};

use super::{CmdResult, ProjectArgs};

#[derive(Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    command: TemplatesCommand,
}

#[derive(Subcommand)]
enum TemplatesCommand {
    /// List template definitions across all roots
    List {
        #[command(flatten)]
        project: ProjectArgs,

        /// Include hidden `(name)` definitions
        #[arg(long)]
        all: bool,
    },
    /// Show the placeholders, variables and includes of one template
    Inspect {
        /// Template name (hidden definitions allowed)
        name: String,

        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TemplatesOutput {
    List {
        command: String,
        roots: Vec<PathBuf>,
        templates: Vec<TemplateDefinition>,
    },
    Inspect {
        command: String,
        #[serde(flatten)]
        inspection: TemplateInspection,
    },
}

pub fn run(args: TemplatesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<TemplatesOutput> {
    match args.command {
        TemplatesCommand::List { project, all } => list(&project, all),
        TemplatesCommand::Inspect { name, project } => inspect(&name, &project),
    }
}

fn catalogue(project: &ProjectArgs) -> stencil::Result<Catalogue> {
    Catalogue::discover(
        &project.root()?,
        &project.templates,
        &defaults::load_defaults(),
    )
}

fn list(project: &ProjectArgs, all: bool) -> CmdResult<TemplatesOutput> {
    let catalogue = catalogue(project)?;
    let templates = catalogue
        .definitions
        .into_iter()
        .filter(|d| all || !d.hidden)
        .collect();

    Ok((
        TemplatesOutput::List {
            command: "templates.list".to_string(),
            roots: catalogue.roots,
            templates,
        },
        0,
    ))
}

fn inspect(name: &str, project: &ProjectArgs) -> CmdResult<TemplatesOutput> {
    let catalogue = catalogue(project)?;
    let definition = template::find_definition(&catalogue.definitions, name)?;

    Ok((
        TemplatesOutput::Inspect {
            command: "templates.inspect".to_string(),
            inspection: scaffold::inspect(definition, &catalogue.resolver),
        },
        0,
    ))
}
