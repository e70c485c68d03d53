//! Build target registry and target name resolution.
//!
//! # Architecture
//!
//! Scripts refer to sibling build products by a hierarchical UID such as
//! `proj.sub.tool` instead of a path. The [`Registry`] records where each
//! target lives, relative to a base directory anchored at the registry file,
//! so an installed tree resolves correctly wherever it is moved.
//!
//! - [`resolve_uid`] expands a short name using namespace fallback
//! - [`Context::exe_path`] turns a name into an absolute path, falling back to
//!   the OS search path for names that are not targets
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use basis_target::{Context, Registry, TargetKind};
//!
//! let mut builder = Registry::builder();
//! builder.target("proj.sub.tool", "bin/tool", TargetKind::Executable).unwrap();
//! let ctx = Context::from_registry(builder.build("/opt/proj").unwrap())
//!     .with_namespace("proj.sub");
//!
//! assert_eq!(ctx.target_uid("tool").unwrap(), "proj.sub.tool");
//! assert_eq!(ctx.exe_path(Some("tool")).unwrap(), PathBuf::from("/opt/proj/bin/tool"));
//! ```

pub use context::Context;
pub use error::{Error, Result};
pub use registry::{
    LazyRegistry, Registry, RegistryBuilder, RegistrySource, TargetKind, TargetRecord, sanitize,
};
pub use resolver::{PairResolver, RegistryResolver, SearchPathResolver, TargetResolver};
pub use uid::{NAMESPACE_SEPARATOR, resolve_uid, strip_escape};

mod context;
mod error;
pub mod manifest;
pub mod registry;
mod resolver;
mod uid;
