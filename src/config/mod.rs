//! Configuration management.
//!
//! Every setting has a built-in default, so the form runs without any
//! configuration file. When present, a TOML file is layered under
//! environment variables prefixed with `DOI_CITE_`:
//!
//! ```toml
//! [resolver]
//! base_url = "https://doi.org"
//! timeout_secs = 30
//!
//! [mirror]
//! base_url = "https://sci-hub.red"
//!
//! [export]
//! default_extension = "txt"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `DOI_CITE_RESOLVER__TIMEOUT_SECS=10`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::DOI_ORG;
use crate::utils::DEFAULT_MIRROR_BASE;

/// Name of the per-directory configuration file
pub const CONFIG_FILE_NAME: &str = "doi-cite.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// DOI resolver settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Mirror search settings
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// DOI resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Endpoint that DOIs are appended to
    #[serde(default = "default_resolver_base")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_resolver_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_resolver_base() -> String {
    DOI_ORG.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Mirror search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default = "default_mirror_base")]
    pub base_url: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: default_mirror_base(),
        }
    }
}

fn default_mirror_base() -> String {
    DEFAULT_MIRROR_BASE.to_string()
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Extension appended to chosen paths that have none
    #[serde(default = "default_extension")]
    pub default_extension: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "txt".to_string()
}

impl Config {
    /// Check the values that cannot be caught by deserialization
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        for (key, value) in [
            ("resolver.base_url", &self.resolver.base_url),
            ("mirror.base_url", &self.mirror.base_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                config::ConfigError::Message(format!("{} is not a valid URL ({}): {}", key, value, e))
            })?;
        }

        if self.resolver.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "resolver.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Load configuration from an optional file plus `DOI_CITE_*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("DOI_CITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find the first configuration file that exists in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("doi-cite").join("config.toml"));
    }
    candidates.into_iter().find(|path| path.is_file())
}
