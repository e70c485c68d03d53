//! Platform helpers shared by the basis resolution and execution layers.
//!
//! - [`quote`]: lossless argument vector <-> command line string codec
//! - [`path`]: OS search path lookup and the running executable's location
//! - [`command`]: a thin [`std::process::Command`] wrapper that remembers its
//!   own quoted command line

pub use error::{Error, Result};

pub mod command;
mod error;
pub mod path;
pub mod quote;
