use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::args::{ExecCallback, PassthroughValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    pub silent: bool,
    pub run_async: bool,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn output(&self) -> &str {
        &self.stdout
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug)]
pub enum ExecOutcome {
    Completed(ExecOutput),
    Background(JoinHandle<()>),
}

/// The primitive that actually runs a command string.
pub trait ShellExec {
    type Output;

    fn exec(&self, command: String, rest: Vec<PassthroughValue>) -> Result<Self::Output>;
}

impl<T: ShellExec + ?Sized> ShellExec for &T {
    type Output = T::Output;

    fn exec(&self, command: String, rest: Vec<PassthroughValue>) -> Result<Self::Output> {
        (**self).exec(command, rest)
    }
}

/// Runs commands through the platform shell.
///
/// Synchronous unless a callback is passed or `run_async` is set, in which
/// case the child is waited on by a worker thread that hands the output to
/// the callback. Child output is echoed as it arrives unless `silent`, and
/// captured either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl ShellExec for SystemShell {
    type Output = ExecOutcome;

    fn exec(&self, command: String, rest: Vec<PassthroughValue>) -> Result<ExecOutcome> {
        let (options, callback) = split_passthrough(rest);
        let mut shell = build_shell_command(&command, &options);
        let background = callback.is_some() || options.run_async;
        let stdin = if background {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        let running = RunningCommand::spawn(&mut shell, stdin, options.silent)
            .with_context(|| format!("failed to launch shell for command: {command}"))?;

        if background {
            return Ok(ExecOutcome::Background(finish_in_background(
                running, command, callback,
            )));
        }

        let result = running
            .wait()
            .with_context(|| format!("failed waiting for command: {command}"))?;
        debug!(command = %command, code = ?result.code, "command finished");
        Ok(ExecOutcome::Completed(result))
    }
}

fn split_passthrough(rest: Vec<PassthroughValue>) -> (ExecOptions, Option<ExecCallback>) {
    let mut options = ExecOptions::default();
    let mut callback = None;
    for value in rest {
        match value {
            PassthroughValue::Options(value) => options = value,
            PassthroughValue::Callback(value) => {
                if callback.is_none() {
                    callback = Some(value);
                }
            }
            PassthroughValue::Text(_) => {}
        }
    }
    (options, callback)
}

pub fn build_shell_command(command: &str, options: &ExecOptions) -> Command {
    let mut shell = if cfg!(windows) {
        let mut shell = Command::new("cmd");
        shell.arg("/C").arg(command);
        shell
    } else {
        let mut shell = Command::new("sh");
        shell.arg("-c").arg(command);
        shell
    };
    if let Some(cwd) = &options.cwd {
        shell.current_dir(cwd);
    }
    shell.envs(&options.env);
    shell
}

struct RunningCommand {
    child: Child,
    stdout: Option<JoinHandle<Vec<u8>>>,
    stderr: Option<JoinHandle<Vec<u8>>>,
}

impl RunningCommand {
    fn spawn(shell: &mut Command, stdin: Stdio, silent: bool) -> io::Result<Self> {
        let mut child = shell
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .map(|pipe| thread::spawn(move || tee_stream(pipe, io::stdout(), silent)));
        let stderr = child
            .stderr
            .take()
            .map(|pipe| thread::spawn(move || tee_stream(pipe, io::stderr(), silent)));

        Ok(Self {
            child,
            stdout,
            stderr,
        })
    }

    fn wait(mut self) -> io::Result<ExecOutput> {
        let status = self.child.wait()?;
        Ok(ExecOutput {
            code: status.code(),
            stdout: String::from_utf8_lossy(&join_capture(self.stdout)).into_owned(),
            stderr: String::from_utf8_lossy(&join_capture(self.stderr)).into_owned(),
        })
    }
}

fn finish_in_background(
    running: RunningCommand,
    command: String,
    callback: Option<ExecCallback>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = running.wait().unwrap_or_else(|err| {
            warn!(command = %command, error = %err, "failed waiting for background command");
            ExecOutput {
                code: None,
                stdout: String::new(),
                stderr: err.to_string(),
            }
        });
        debug!(command = %command, code = ?result.code, "background command finished");
        if let Some(callback) = callback {
            callback(result);
        }
    })
}

/// Copies `pipe` into a buffer, forwarding each chunk to `echo` as it is read
/// unless `silent`. Echo failures never cut the capture short.
pub(crate) fn tee_stream<R, W>(mut pipe: R, mut echo: W, silent: bool) -> Vec<u8>
where
    R: Read,
    W: Write,
{
    let mut captured = Vec::new();
    let mut chunk = [0_u8; 8192];
    loop {
        match pipe.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => {
                captured.extend_from_slice(&chunk[..read]);
                if !silent {
                    let _ = echo.write_all(&chunk[..read]);
                    let _ = echo.flush();
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(error = %err, "failed reading child output");
                break;
            }
        }
    }
    captured
}

fn join_capture(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
