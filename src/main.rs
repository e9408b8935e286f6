use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{case, config, error, new, templates};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version = VERSION)]
#[command(about = "Scaffold new source trees from placeholder templates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tree from a template
    New(new::NewArgs),
    /// List or inspect available templates
    #[command(visible_alias = "template")]
    Templates(templates::TemplatesArgs),
    /// Show how a value renders in every case variant
    Case(case::CaseArgs),
    /// Manage global stencil configuration
    Config(config::ConfigArgs),
    /// List and explain error codes
    Error(error::ErrorArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    if matches!(cli.command, Commands::New(_)) {
        tty::status("stencil is working...");
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    if let Err(err) = &json_result {
        tty::status(&format!("error: {}", err.message));
    }
    // Nothing useful can be reported if stdout itself is gone.
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
