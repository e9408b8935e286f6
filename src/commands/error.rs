use clap::{Args, Subcommand};
use serde::Serialize;

use stencil::error::codes;
use stencil::error::help::{self, ErrorHelp, ErrorHelpSummary};
use stencil::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    command: ErrorCommand,
}

#[derive(Subcommand)]
enum ErrorCommand {
    /// List every error code
    List,
    /// Explain one error code and how to fix it
    Explain {
        /// Dotted code, e.g. template.not_found
        code: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorOutput {
    List { errors: Vec<ErrorHelpSummary> },
    Explain(ErrorHelp),
}

pub fn run(args: ErrorArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ErrorOutput> {
    match args.command {
        ErrorCommand::List => Ok((ErrorOutput::List { errors: help::list() }, 0)),
        ErrorCommand::Explain { code } => {
            let parsed = codes::parse_code(&code).ok_or_else(|| {
                Error::validation_invalid_argument(
                    "code",
                    format!("Unknown error code '{}'", code),
                    None,
                    Some(codes::all_codes().iter().map(|c| c.as_str().to_string()).collect()),
                )
            })?;
            Ok((ErrorOutput::Explain(help::explain(parsed)), 0))
        }
    }
}
