//! Target resolver abstraction.
//!
//! A [`TargetResolver`] maps a command name to an absolute path. Path
//! resolution chains a [`RegistryResolver`] with a [`SearchPathResolver`]
//! fallback through [`PairResolver`].

use crate::registry::Registry;
use crate::uid::{resolve_uid, strip_escape};
use basis_platform::path;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

pub trait TargetResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

impl<R: TargetResolver + ?Sized> TargetResolver for &R {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        (**self).resolve(command)
    }
}

#[derive(Clone)]
pub struct PairResolver<R1, R2> {
    primary: R1,
    fallback: R2,
}

impl<R1, R2> PairResolver<R1, R2>
where
    R1: TargetResolver,
    R2: TargetResolver,
{
    pub fn new(primary: R1, fallback: R2) -> Self {
        Self { primary, fallback }
    }
}

impl<R1, R2> TargetResolver for PairResolver<R1, R2>
where
    R1: TargetResolver,
    R2: TargetResolver,
{
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.primary
            .resolve(command)
            .or_else(|| self.fallback.resolve(command))
    }
}

/// Resolves registered targets under a namespace.
///
/// A registry hit is returned whether or not the file exists.
#[derive(Clone, Copy)]
pub struct RegistryResolver<'a> {
    namespace: &'a str,
    registry: &'a Registry,
}

impl<'a> RegistryResolver<'a> {
    pub fn new(namespace: &'a str, registry: &'a Registry) -> Self {
        Self {
            namespace,
            registry,
        }
    }
}

impl TargetResolver for RegistryResolver<'_> {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let uid = resolve_uid(command, self.namespace, self.registry);
        let record = self.registry.get(strip_escape(&uid))?;
        let path = self.registry.path_of(record);
        debug!(command, uid = %record.uid(), path = %path.display(), "resolved registered target");
        Some(path)
    }
}

/// Resolves literal command names on the OS search path.
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    paths: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl SearchPathResolver {
    /// Search the process `PATH` from the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `paths` (a `PATH`-style list) instead of the process `PATH`.
    pub fn with_paths(mut self, paths: impl Into<OsString>) -> Self {
        self.paths = Some(paths.into());
        self
    }

    /// Resolve names containing a path separator against `cwd`.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl TargetResolver for SearchPathResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let found = match (&self.paths, &self.cwd) {
            (None, None) => path::find_executable(command),
            (paths, cwd) => {
                let paths = paths
                    .clone()
                    .or_else(|| std::env::var_os("PATH"))
                    .unwrap_or_default();
                let cwd = match cwd {
                    Some(cwd) => cwd.clone(),
                    None => std::env::current_dir().ok()?,
                };
                path::find_executable_in(command, paths, &cwd)
            }
        };
        if let Some(path) = &found {
            debug!(command, path = %path.display(), "resolved on search path");
        }
        found
    }
}
