//! The `execute` primitive shared by generated scripts.
//!
//! One call resolves a command (a build target UID or a plain command name),
//! optionally echoes its quoted command line, spawns exactly one child with
//! the caller's standard streams, waits for it, and applies the exit-status
//! policy from [`ExecOptions`].
//!
//! # Example
//!
//! ```no_run
//! use basis_exec::{ExecOptions, execute, or_exit};
//! use basis_target::{Context, RegistrySource};
//!
//! let ctx = Context::from_source(RegistrySource::File("share/targets.toml".into()));
//! let options = ExecOptions::new().verbosity(1);
//!
//! // Terminates with `Command ... failed` if the tool exits non-zero.
//! or_exit(execute(&ctx, &options, "tool", &["--input", "data file.txt"]));
//! ```

pub use error::{Error, Result};
pub use execute::{command_line, execute, execute_capture, execute_line};
pub use fatal::{FAILURE_EXIT_CODE, or_exit};
pub use options::ExecOptions;

mod error;
mod execute;
pub mod fatal;
mod options;
