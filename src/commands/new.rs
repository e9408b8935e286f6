use clap::Args;
use std::path::PathBuf;

use stencil::defaults;
use stencil::prompt::PromptEngine;
use stencil::scaffold::{self, PresetPrompter, ScaffoldReport, ScaffoldRequest};
use stencil::validation;

use super::{CmdResult, ProjectArgs};

#[derive(Args)]
pub struct NewArgs {
    /// Directory to create (or fill) from the template
    pub destination: PathBuf,

    /// Template name; skips the picker
    #[arg(long, short = 't')]
    pub template: Option<String>,

    /// Answer a variable up front (repeatable): --var name="my thing"
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Never prompt; unanswered variables take the destination name
    #[arg(long)]
    pub no_input: bool,
}

pub fn run(args: NewArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ScaffoldReport> {
    let values = validation::parse_assignments(&args.vars, "var")?;

    let engine = if args.no_input {
        PromptEngine::non_interactive()
    } else {
        PromptEngine::new()
    };

    if !engine.is_interactive() {
        validation::require(
            args.template.as_ref(),
            "template",
            "--template is required when prompts are unavailable",
        )
        .map_err(|e| e.with_hint("Run `stencil templates list` to see available templates"))?;
    }

    let request = ScaffoldRequest {
        destination: args.destination,
        project_root: args.project.root()?,
        template_roots: args.project.templates,
        defaults: defaults::load_defaults(),
    };

    let mut prompter = PresetPrompter::new(args.template, values, engine);
    let report = scaffold::run(&request, &mut prompter)?;

    Ok((report, 0))
}
