use crate::cli::App;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "basis.toml";
pub const ENV_PREFIX: &str = "BASIS_";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub verbosity: u8,
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
}

impl From<&App> for Overrides {
    fn from(app: &App) -> Self {
        Self {
            registry: app.registry.clone(),
            namespace: app.namespace.clone(),
            verbosity: (app.verbose > 0).then_some(app.verbose),
        }
    }
}

impl Settings {
    /// Defaults, then `basis.toml` in `dir`, then `BASIS_*` variables, then
    /// `overrides`.
    pub fn figment(dir: &Path, overrides: Overrides) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join(SETTINGS_FILE)))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(dir: &Path, overrides: Overrides) -> Result<Self, figment::Error> {
        Self::figment(dir, overrides).extract()
    }
}
