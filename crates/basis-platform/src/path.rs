//! Executable search path helpers.

use crate::error::{Error, Result};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Absolute, symlink-resolved path of the running executable.
pub fn current_exe() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(Error::CurrentExe)?;
    dunce::canonicalize(exe).map_err(Error::CurrentExe)
}

/// Look `name` up on the process search path.
///
/// Names containing a path separator are resolved against the working
/// directory instead, as a shell would.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    match which::which(name) {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(name, %err, "not found on search path");
            None
        }
    }
}

/// Look `name` up in an explicit search path, relative names resolving
/// against `cwd`.
pub fn find_executable_in<P>(name: &str, paths: P, cwd: &Path) -> Option<PathBuf>
where
    P: AsRef<OsStr>,
{
    if name.is_empty() {
        return None;
    }
    match which::which_in(name, Some(paths), cwd) {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(name, %err, "not found on search path");
            None
        }
    }
}
