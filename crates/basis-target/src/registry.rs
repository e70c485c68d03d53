//! The build target registry.
//!
//! A [`Registry`] maps sanitized target identifiers to [`TargetRecord`]s. It
//! is assembled once from `(key, field, value)` triples by a
//! [`RegistryBuilder`] and is read-only afterwards. [`LazyRegistry`] defers
//! that assembly to the first lookup.

use crate::error::{Error, Result};
use crate::manifest;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const FIELD_UID: &str = "UID";
pub const FIELD_LOCATION: &str = "LOCATION";
pub const FIELD_TYPE: &str = "TYPE";

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(uid: &str) -> String {
    uid.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Executable,
    Library,
    Other,
}

impl TargetKind {
    /// Unrecognised type names map to [`TargetKind::Other`].
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("executable") {
            Self::Executable
        } else if s.eq_ignore_ascii_case("library") {
            Self::Library
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executable => "EXECUTABLE",
            Self::Library => "LIBRARY",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    uid: String,
    location: PathBuf,
    location_is_relative: bool,
    kind: TargetKind,
}

impl TargetRecord {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The location exactly as registered.
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn location_is_relative(&self) -> bool {
        self.location_is_relative
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    base_dir: PathBuf,
    namespace: Option<String>,
    targets: HashMap<String, TargetRecord>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn empty(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            namespace: None,
            targets: HashMap::new(),
        }
    }

    pub fn get(&self, uid: &str) -> Option<&TargetRecord> {
        if uid.is_empty() {
            return None;
        }
        self.targets.get(&sanitize(uid))
    }

    pub fn contains(&self, uid: &str) -> bool {
        !uid.is_empty() && self.targets.contains_key(&sanitize(uid))
    }

    /// Directory that relative locations are joined to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Namespace declared by the registry source, if any.
    pub fn default_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Absolute location of `record` under this registry's base directory.
    pub fn path_of(&self, record: &TargetRecord) -> PathBuf {
        if record.location_is_relative {
            self.base_dir.join(&record.location)
        } else {
            record.location.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Uid,
    Location,
    Type,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case(FIELD_UID) {
            Some(Self::Uid)
        } else if name.eq_ignore_ascii_case(FIELD_LOCATION) {
            Some(Self::Location)
        } else if name.eq_ignore_ascii_case(FIELD_TYPE) {
            Some(Self::Type)
        } else {
            None
        }
    }
}

#[derive(Debug)]
struct PartialRecord {
    // Name the entry was first declared under.
    raw_key: String,
    uid: Option<String>,
    location: Option<String>,
    kind: Option<String>,
}

/// Collects registry triples and checks them for collisions.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    namespace: Option<String>,
    entries: HashMap<String, PartialRecord>,
}

impl RegistryBuilder {
    pub fn namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Register a target by its unsanitized identifier.
    pub fn target(
        &mut self,
        uid: &str,
        location: impl AsRef<str>,
        kind: TargetKind,
    ) -> Result<&mut Self> {
        let key = sanitize(uid);
        self.field(&key, FIELD_UID, uid)?;
        self.field(&key, FIELD_LOCATION, location.as_ref())?;
        self.field(&key, FIELD_TYPE, kind.as_str())
    }

    /// Apply one `(key, field, value)` triple.
    ///
    /// Setting a field twice to different values is a collision, as is a
    /// second name that sanitizes to an existing key.
    pub fn field(&mut self, raw_key: &str, field: &str, value: &str) -> Result<&mut Self> {
        if raw_key.is_empty() {
            return Err(Error::EmptyKey {
                field: field.to_owned(),
            });
        }
        let key = sanitize(raw_key);
        let Some(field) = Field::parse(field) else {
            warn!(key = %key, field, "ignoring unknown registry field");
            return Ok(self);
        };

        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| PartialRecord {
                raw_key: raw_key.to_owned(),
                uid: None,
                location: None,
                kind: None,
            });
        if entry.raw_key != raw_key {
            return Err(Error::RegistryCollision {
                key,
                first: entry.raw_key.clone(),
                second: raw_key.to_owned(),
            });
        }
        let slot = match field {
            Field::Uid => &mut entry.uid,
            Field::Location => &mut entry.location,
            Field::Type => &mut entry.kind,
        };

        match slot {
            Some(existing) if existing.as_str() != value => {
                return Err(Error::RegistryCollision {
                    key,
                    first: existing.clone(),
                    second: value.to_owned(),
                });
            }
            Some(_) => {}
            empty => *empty = Some(value.to_owned()),
        }
        Ok(self)
    }

    pub fn triples<I, K, F, V>(&mut self, triples: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, F, V)>,
        K: AsRef<str>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, field, value) in triples {
            self.field(key.as_ref(), field.as_ref(), value.as_ref())?;
        }
        Ok(self)
    }

    pub fn build(self, base_dir: impl Into<PathBuf>) -> Result<Registry> {
        let mut targets = HashMap::with_capacity(self.entries.len());

        for (key, entry) in self.entries {
            let uid = entry.uid.unwrap_or_else(|| key.clone());
            if sanitize(&uid) != key {
                return Err(Error::KeyMismatch { key, uid });
            }
            let Some(location) = entry.location else {
                return Err(Error::MissingField {
                    key,
                    field: FIELD_LOCATION,
                });
            };
            let location = PathBuf::from(location);
            let record = TargetRecord {
                uid,
                location_is_relative: location.is_relative(),
                location,
                kind: entry.kind.as_deref().map_or(TargetKind::Other, TargetKind::parse),
            };

            targets.insert(key, record);
        }

        let registry = Registry {
            base_dir: base_dir.into(),
            namespace: self.namespace,
            targets,
        };
        debug!(
            targets = registry.len(),
            base_dir = %registry.base_dir.display(),
            "registry initialized"
        );
        Ok(registry)
    }
}

/// Where a [`LazyRegistry`] takes its data from.
#[derive(Debug, Clone)]
pub enum RegistrySource {
    /// No targets; every name resolves through the search path.
    Empty,
    /// A triples (`.reg`) or TOML (`.toml`) registry file.
    File(PathBuf),
    /// Triples compiled into the program. A missing base directory defaults
    /// to the directory of the running executable.
    Triples {
        base_dir: Option<PathBuf>,
        triples: Vec<(String, String, String)>,
    },
}

impl RegistrySource {
    fn load(&self) -> Result<Registry> {
        match self {
            Self::Empty => Ok(Registry::empty(executable_dir()?)),
            Self::File(path) => manifest::load(path),
            Self::Triples { base_dir, triples } => {
                let base_dir = match base_dir {
                    Some(dir) => dir.clone(),
                    None => executable_dir()?,
                };
                let mut builder = Registry::builder();
                builder.triples(triples.iter().map(|(k, f, v)| (k, f, v)))?;
                builder.build(base_dir)
            }
        }
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = basis_platform::path::current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or(exe))
}

/// A registry built on first access and kept for the life of the value.
#[derive(Debug)]
pub struct LazyRegistry {
    source: RegistrySource,
    cell: OnceCell<Registry>,
}

impl LazyRegistry {
    pub fn new(source: RegistrySource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already built registry.
    pub fn ready(registry: Registry) -> Self {
        Self {
            source: RegistrySource::Empty,
            cell: OnceCell::with_value(registry),
        }
    }

    /// Build the registry if this is the first access.
    ///
    /// A failed build is reported to the caller and retried on the next call.
    pub fn get(&self) -> Result<&Registry> {
        self.cell.get_or_try_init(|| self.source.load())
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
