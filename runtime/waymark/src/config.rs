//! Load URL generation settings from hierarchical configuration.
//!
//! Settings are merged from, in increasing order of precedence:
//!
//! - `{configuration_dir}/base.yml`;
//! - `{configuration_dir}/{profile}.yml`, if a profile is set;
//! - environment variables prefixed with `WAYMARK_`. Use `__` to separate nested keys,
//!   e.g. `WAYMARK_DEFAULTS__PARAMS__LOCALE=es`.
//!
//! Missing files are skipped.
//!
//! # Example
//!
//! ```yaml
//! # configuration/base.yml
//! origin: "https://erp.example.com"
//! defaults:
//!   params:
//!     locale: es
//!   query:
//!     vista: compacta
//! ```
//!
//! ```rust,no_run
//! use waymark::config::{ConfigLoader, WaymarkConfig};
//!
//! let config: WaymarkConfig = ConfigLoader::new().load().unwrap();
//! let generator = config.generator();
//! # let _ = generator;
//! ```
use std::path::PathBuf;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::de::DeserializeOwned;

use crate::builder::UrlGenerator;
use crate::defaults::{UrlDefaults, set_url_defaults};

static ENV_PREFIX: &str = "WAYMARK_";
static PROFILE_ENV_VAR: &str = "WAYMARK_PROFILE";

/// Settings for URL generation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaymarkConfig {
    /// Scheme and authority to prefix URLs with. URLs are relative when unset.
    pub origin: Option<String>,
    /// Route parameter and query defaults.
    pub defaults: UrlDefaults,
}

impl WaymarkConfig {
    /// A [`UrlGenerator`] that uses these settings.
    pub fn generator(&self) -> UrlGenerator {
        let generator = UrlGenerator::with_defaults(self.defaults.clone());
        match &self.origin {
            Some(origin) => generator.origin(origin.as_str()),
            None => generator,
        }
    }

    /// Install the configured defaults as the process-wide URL defaults.
    pub fn install_defaults(&self) {
        set_url_defaults(self.defaults.clone());
    }
}

/// Merge configuration files and environment variables into a settings type.
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    configuration_dir: Option<PathBuf>,
    profile: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{profile}.yml` on top of `base.yml`.
    ///
    /// If not set, the profile is read from the `WAYMARK_PROFILE` environment variable.
    /// If that isn't set either, only `base.yml` and the environment are used.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Where to look for configuration files. Defaults to `configuration`.
    pub fn configuration_dir<Dir>(mut self, dir: Dir) -> Self
    where
        Dir: Into<PathBuf>,
    {
        self.configuration_dir = Some(dir.into());
        self
    }

    pub fn load<Config>(self) -> Result<Config, errors::ConfigLoadError>
    where
        Config: DeserializeOwned,
    {
        let profile = self
            .profile
            .or_else(|| std::env::var(PROFILE_ENV_VAR).ok());
        let configuration_dir = self
            .configuration_dir
            .unwrap_or_else(|| PathBuf::from("configuration"));
        let span = tracing::info_span!(
            "Loading configuration",
            configuration.directory = %configuration_dir.display(),
            configuration.profile = profile.as_deref().unwrap_or("<none>"),
        );
        let _guard = span.enter();

        let mut figment = Figment::new().merge(Yaml::file(configuration_dir.join("base.yml")));
        if let Some(profile) = &profile {
            figment = figment.merge(Yaml::file(
                configuration_dir.join(format!("{profile}.yml")),
            ));
        }
        let profile_key = PROFILE_ENV_VAR.trim_start_matches(ENV_PREFIX);
        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&[profile_key]));

        let configuration: Config = figment
            .extract()
            .context("Failed to load hierarchical configuration")
            .map_err(errors::ConfigLoadError)?;
        Ok(configuration)
    }
}

pub mod errors {
    #[derive(Debug, thiserror::Error)]
    #[error("Failed to load configuration")]
    pub struct ConfigLoadError(#[source] pub(super) anyhow::Error);
}
