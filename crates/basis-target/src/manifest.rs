//! Registry files written by the build-time generator.
//!
//! Two formats carry the same `(key, field, value)` triples:
//!
//! - `*.toml`: one `[targets.<key>]` table per target, plus optional top-level
//!   `base` (offset of the base directory from the manifest's directory) and
//!   `namespace`.
//! - anything else: one `key FIELD value` triple per line, `value` quoted as
//!   [`basis_platform::quote`] does. `#` starts a comment line.
//!
//! Relative target locations are anchored at the directory holding the file,
//! so the file travels with the tree it describes.

use crate::error::{Error, Result};
use crate::registry::{FIELD_LOCATION, FIELD_TYPE, FIELD_UID, Registry};
use basis_platform::quote;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    base: Option<PathBuf>,
    namespace: Option<String>,
    #[serde(default)]
    targets: BTreeMap<String, ManifestTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestTarget {
    uid: Option<String>,
    location: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Load a registry file, choosing the format by extension.
pub fn load(path: &Path) -> Result<Registry> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = manifest_dir(path)?;
    debug!(path = %path.display(), "loading registry");

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        from_toml(&text, &dir).map_err(|err| match err {
            Error::Manifest { source, .. } => Error::Manifest {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    } else {
        let mut builder = Registry::builder();
        builder.triples(parse_triples(&text)?)?;
        builder.build(dir)
    }
}

/// Build a registry from TOML manifest text whose relative paths are anchored
/// at `dir`.
pub fn from_toml(text: &str, dir: &Path) -> Result<Registry> {
    let manifest: Manifest = toml::from_str(text).map_err(|source| Error::Manifest {
        path: PathBuf::new(),
        source,
    })?;

    let mut builder = Registry::builder();
    if let Some(namespace) = &manifest.namespace {
        builder.namespace(namespace.as_str());
    }
    for (key, target) in &manifest.targets {
        if let Some(uid) = &target.uid {
            builder.field(key, FIELD_UID, uid)?;
        }
        builder.field(key, FIELD_LOCATION, &target.location)?;
        if let Some(kind) = &target.kind {
            builder.field(key, FIELD_TYPE, kind)?;
        }
    }

    let base_dir = match &manifest.base {
        Some(base) => anchor(&dir.join(base)),
        None => dir.to_path_buf(),
    };
    builder.build(base_dir)
}

/// Parse line-oriented `key FIELD value` triples.
pub fn parse_triples(text: &str) -> Result<Vec<(String, String, String)>> {
    let mut triples = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = quote::split_quoted(trimmed).into_iter();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(field), Some(value), None) => triples.push((key, field, value)),
            _ => {
                return Err(Error::MalformedTriple {
                    line: i + 1,
                    content: line.to_owned(),
                });
            }
        }
    }
    Ok(triples)
}

fn manifest_dir(path: &Path) -> Result<PathBuf> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    dunce::canonicalize(dir).map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })
}

// Canonical when the directory exists, as joined otherwise.
fn anchor(dir: &Path) -> PathBuf {
    dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}
