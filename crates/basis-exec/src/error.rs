//! Error types for command execution.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Command {cmdline} failed")]
    SubprocessFailure { cmdline: String, status: i32 },

    #[error(transparent)]
    Target(#[from] basis_target::Error),

    #[error(transparent)]
    Platform(#[from] basis_platform::Error),
}

impl Error {
    /// Exit status of the failed subprocess, if that is what failed.
    pub fn status(&self) -> Option<i32> {
        match self {
            Self::SubprocessFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
