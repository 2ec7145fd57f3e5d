use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nodecli_core::{join_lexical, PackageDescriptor, MODULES_DIR, PACKAGE_DESCRIPTOR_FILE};
use tracing::debug;

use crate::host::{ExecutableSearch, HostFs, PackageFs, SearchPath};

pub const DEFAULT_INTERPRETER: &str = "node";

/// How a package executable should be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPrefix {
    NotFound,
    Global { name: String },
    Local { interpreter: String, script: String },
}

impl CommandPrefix {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for CommandPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => Ok(()),
            Self::Global { name } => f.write_str(name),
            Self::Local {
                interpreter,
                script,
            } => write!(f, "{interpreter} {script}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub interpreter: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliResolver<F = HostFs, S = SearchPath> {
    fs: F,
    search: S,
    config: ResolverConfig,
}

impl CliResolver {
    pub fn host(config: ResolverConfig) -> Self {
        Self::new(HostFs, SearchPath::system(), config)
    }
}

impl<F, S> CliResolver<F, S>
where
    F: PackageFs,
    S: ExecutableSearch,
{
    pub fn new(fs: F, search: S, config: ResolverConfig) -> Self {
        Self { fs, search, config }
    }

    pub fn descriptor_path(name: &str, root: Option<&Path>) -> PathBuf {
        root.unwrap_or_else(|| Path::new(""))
            .join(MODULES_DIR)
            .join(name)
            .join(PACKAGE_DESCRIPTOR_FILE)
    }

    /// Loads `<root>/node_modules/<name>/package.json` if it exists.
    ///
    /// A present but unreadable or malformed descriptor is an error; it never
    /// degrades to `Ok(None)`. Parse failures surface as the bare
    /// `serde_json::Error`.
    pub fn load_descriptor(
        &self,
        name: &str,
        root: Option<&Path>,
    ) -> Result<Option<PackageDescriptor>> {
        let path = Self::descriptor_path(name, root);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let raw = self
            .fs
            .read_to_string(&path)
            .with_context(|| format!("failed to read package descriptor: {}", path.display()))?;
        let descriptor = PackageDescriptor::from_json_str(&raw)?;
        Ok(Some(descriptor))
    }

    pub fn resolve(&self, name: &str, root: Option<&Path>) -> Result<CommandPrefix> {
        if let Some(descriptor) = self.load_descriptor(name, root)? {
            let Some(bin_rel_path) = descriptor.bin_path(name) else {
                debug!(package = name, "local package declares no matching bin");
                return Ok(CommandPrefix::NotFound);
            };

            let root_str = root
                .map(|value| value.to_string_lossy().into_owned())
                .unwrap_or_default();
            let script = join_lexical([root_str.as_str(), MODULES_DIR, name, bin_rel_path]);
            debug!(package = name, script = %script, "resolved local package executable");
            return Ok(CommandPrefix::Local {
                interpreter: self.config.interpreter.clone(),
                script,
            });
        }

        if let Some(found) = self.search.find(name) {
            debug!(package = name, path = %found.display(), "resolved global executable");
            return Ok(CommandPrefix::Global {
                name: name.to_string(),
            });
        }

        debug!(package = name, "executable not found locally or on search path");
        Ok(CommandPrefix::NotFound)
    }

    pub fn path(&self, name: &str, root: Option<&Path>) -> Result<String> {
        Ok(self.resolve(name, root)?.to_string())
    }
}
