mod host;
mod resolve;

pub use host::{ExecutableSearch, HostFs, PackageFs, SearchPath};
pub use resolve::{CliResolver, CommandPrefix, ResolverConfig, DEFAULT_INTERPRETER};
