//! Process termination for orchestration entry points.
//!
//! Library code returns errors. A script's `main` decides to stop the whole
//! process, and does so through [`or_exit`] so every binding fails the same
//! way: exit code `1` and one diagnostic line on standard error.

use crate::error::Error;
use std::process;

pub const FAILURE_EXIT_CODE: i32 = 1;

/// Unwrap `result`, or print its error and exit with [`FAILURE_EXIT_CODE`].
///
/// A [`Error::SubprocessFailure`] prints as `Command <cmdline> failed`.
pub fn or_exit<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => exit(&err),
    }
}

pub fn exit(err: &Error) -> ! {
    eprintln!("{err}");
    process::exit(FAILURE_EXIT_CODE)
}
