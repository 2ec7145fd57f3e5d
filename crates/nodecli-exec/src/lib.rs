mod args;
mod executor;
mod shell;

pub use args::{
    join_command, partition_args, ExecCallback, InvocationArg, PartitionedArgs, PassthroughValue,
};
pub use executor::{NodeCli, NotFoundError};
pub use shell::{build_shell_command, ExecOptions, ExecOutcome, ExecOutput, ShellExec, SystemShell};
