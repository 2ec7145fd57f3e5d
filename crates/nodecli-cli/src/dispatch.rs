use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use nodecli_exec::{ExecOptions, ExecOutcome, InvocationArg, NodeCli, ShellExec};
use nodecli_resolver::{ExecutableSearch, PackageFs, ResolverConfig};

use crate::completion::write_completions_script;
use crate::render::{render_warning_line, resolve_output_style, OutputStyle};
use crate::{Cli, Commands};

pub(crate) fn run_cli(cli: Cli) -> Result<ExitCode> {
    let style = resolve_output_style(cli.color, io::stderr().is_terminal());
    let node_cli = NodeCli::host(ResolverConfig {
        interpreter: cli.interpreter,
    });

    let status = run_command(
        &node_cli,
        cli.command,
        style,
        &mut io::stdout(),
        &mut io::stderr(),
    )?;
    Ok(ExitCode::from(status))
}

/// Runs one subcommand and returns the process exit status.
pub(crate) fn run_command<F, S, D, O, E>(
    node_cli: &NodeCli<F, S, D>,
    command: Commands,
    style: OutputStyle,
    out: &mut O,
    err: &mut E,
) -> Result<u8>
where
    F: PackageFs,
    S: ExecutableSearch,
    D: ShellExec<Output = ExecOutcome>,
    O: Write,
    E: Write,
{
    match command {
        Commands::Path { name, root } => {
            let prefix = node_cli.resolve(&name, root.as_deref())?;
            if prefix.is_empty() {
                writeln!(
                    err,
                    "{}",
                    render_warning_line(style, &format!("Couldn't find {name}."))
                )
                .context("failed writing warning")?;
                return Ok(1);
            }
            writeln!(out, "{prefix}").context("failed writing resolved command")?;
        }
        Commands::Exec { name, silent, args } => {
            let invocation = build_invocation(args, silent);
            let outcome = node_cli.exec(&name, invocation)?;
            return Ok(exit_status_for(&outcome));
        }
        Commands::Completions { shell } => {
            write_completions_script(shell, out)?;
        }
    }

    Ok(0)
}

pub(crate) fn build_invocation(args: Vec<String>, silent: bool) -> Vec<InvocationArg> {
    let mut invocation = args.into_iter().map(InvocationArg::from).collect::<Vec<_>>();
    invocation.push(
        ExecOptions {
            silent,
            ..ExecOptions::default()
        }
        .into(),
    );
    invocation
}

pub(crate) fn exit_status_for(outcome: &ExecOutcome) -> u8 {
    match outcome {
        ExecOutcome::Completed(output) => output
            .code
            .and_then(|code| u8::try_from(code).ok())
            .unwrap_or(1),
        ExecOutcome::Background(_) => 0,
    }
}
