//! Error types for registry loading and target resolution.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot resolve '{name}': neither a registered target nor on the search path")]
    UnresolvableTarget { name: String },

    #[error("registry collision on key '{key}': '{first}' and '{second}'")]
    RegistryCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("registry {field} entry has an empty key")]
    EmptyKey { field: String },

    #[error("registry entry '{key}' has no {field} field")]
    MissingField { key: String, field: &'static str },

    #[error("registry entry '{key}' declares uid '{uid}' which does not sanitize to its key")]
    KeyMismatch { key: String, uid: String },

    #[error("malformed registry line {line}: {content}")]
    MalformedTriple { line: usize, content: String },

    #[error("failed to read registry {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse registry manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Platform(#[from] basis_platform::Error),
}
