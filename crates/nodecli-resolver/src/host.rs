use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait PackageFs {
    fn is_file(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

pub trait ExecutableSearch {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

impl<T: PackageFs + ?Sized> PackageFs for &T {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

impl<T: ExecutableSearch + ?Sized> ExecutableSearch for &T {
    fn find(&self, name: &str) -> Option<PathBuf> {
        (**self).find(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl PackageFs for HostFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Executable lookup over `PATH`, or over an explicit search list.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    paths: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl SearchPath {
    pub fn system() -> Self {
        Self::default()
    }

    pub fn with_paths(paths: impl Into<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            paths: Some(paths.into()),
            cwd: Some(cwd.into()),
        }
    }
}

impl ExecutableSearch for SearchPath {
    fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        match &self.paths {
            None => which::which(name).ok(),
            Some(paths) => {
                let cwd = self.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
                which::which_in(name, Some(paths), cwd).ok()
            }
        }
    }
}
