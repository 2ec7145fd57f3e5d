use std::path::Path;

use anyhow::Result;
use nodecli_resolver::{
    CliResolver, CommandPrefix, ExecutableSearch, HostFs, PackageFs, ResolverConfig, SearchPath,
};
use thiserror::Error;
use tracing::debug;

use crate::args::{join_command, partition_args, InvocationArg};
use crate::shell::{ShellExec, SystemShell};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Couldn't find {name}.")]
pub struct NotFoundError {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NodeCli<F = HostFs, S = SearchPath, D = SystemShell> {
    resolver: CliResolver<F, S>,
    shell: D,
}

impl NodeCli {
    pub fn host(config: ResolverConfig) -> Self {
        Self::new(CliResolver::host(config), SystemShell)
    }
}

impl<F, S, D> NodeCli<F, S, D>
where
    F: PackageFs,
    S: ExecutableSearch,
    D: ShellExec,
{
    pub fn new(resolver: CliResolver<F, S>, shell: D) -> Self {
        Self { resolver, shell }
    }

    pub fn resolve(&self, name: &str, root: Option<&Path>) -> Result<CommandPrefix> {
        self.resolver.resolve(name, root)
    }

    pub fn path(&self, name: &str, root: Option<&Path>) -> Result<String> {
        self.resolver.path(name, root)
    }

    /// Resolves `name` from the current directory and hands the joined
    /// command to the shell, returning whatever the shell returns.
    pub fn exec(&self, name: &str, args: Vec<InvocationArg>) -> Result<D::Output> {
        let prefix = self.resolver.resolve(name, None)?;
        if prefix.is_empty() {
            return Err(NotFoundError {
                name: name.to_string(),
            }
            .into());
        }

        let partitioned = partition_args(args);
        let command = join_command(&prefix.to_string(), &partitioned.tokens);
        debug!(
            command = %command,
            passthrough = partitioned.passthrough.len(),
            "delegating command to shell"
        );
        self.shell.exec(command, partitioned.passthrough)
    }
}
