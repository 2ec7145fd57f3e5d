use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use nodecli_resolver::DEFAULT_INTERPRETER;
use tracing_subscriber::EnvFilter;

mod completion;
mod dispatch;
mod render;

use crate::dispatch::run_cli;
use crate::render::{render_error_line, resolve_output_style};

const LOG_ENV: &str = "NODECLI_LOG";

#[derive(Parser, Debug)]
#[command(name = "nodecli")]
#[command(about = "Resolve and run Node package executables", long_about = None)]
struct Cli {
    /// Interpreter used to launch locally installed package scripts.
    #[arg(long, global = true, env = "NODECLI_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    interpreter: String,
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the command that would launch NAME.
    Path {
        name: String,
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Run NAME with ARGS joined into a single shell command.
    Exec {
        name: String,
        #[arg(long)]
        silent: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let style = resolve_output_style(cli.color, io::stderr().is_terminal());
    match run_cli(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", render_error_line(style, &format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}
