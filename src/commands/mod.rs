use clap::Args;
use std::path::PathBuf;

pub type CmdResult<T> = stencil::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Where templates are looked up: the project root and extra template roots.
#[derive(Args, Default, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Extra template root, searched before configured ones (repeatable)
    #[arg(long = "templates", value_name = "PATH")]
    pub templates: Vec<PathBuf>,
}

impl ProjectArgs {
    pub fn root(&self) -> stencil::Result<PathBuf> {
        match &self.project {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().map_err(|e| {
                stencil::Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
            }),
        }
    }
}

pub mod case;
pub mod config;
pub mod error;
pub mod new;
pub mod templates;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (stencil::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::New(args) => dispatch!(args, global, new),
        crate::Commands::Templates(args) => dispatch!(args, global, templates),
        crate::Commands::Case(args) => dispatch!(args, global, case),
        crate::Commands::Config(args) => dispatch!(args, global, config),
        crate::Commands::Error(args) => dispatch!(args, global, error),
    }
}
