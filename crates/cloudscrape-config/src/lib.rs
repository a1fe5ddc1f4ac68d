//! Configuration for the cloudscrape CLI.
//!
//! TOML file + `CLOUDTRAX_`-prefixed environment variables, merged with
//! figment, then translated into `cloudscrape_core::ScrapeConfig`. The
//! file holds one `[common]` section describing the dashboard itself and
//! one `[networks.<name>]` section per scraped network.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cloudscrape_core::{Credentials, PageConfig, ScrapeConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no network named '{name}' in configuration")]
    UnknownNetwork { name: String },

    #[error("no network selected and no default_network configured")]
    NoNetwork,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Network to scrape when none is named on the command line.
    pub default_network: Option<String>,

    /// Dashboard location and page paths, shared by every network.
    #[serde(default)]
    pub common: Common,

    /// Transport defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Per-network credentials, keyed by the dashboard's network name.
    #[serde(default)]
    pub networks: HashMap<String, Network>,
}

/// The `[common]` section: where the dashboard lives.
///
/// The page paths default to the current upstream layout; they are
/// configurable because the dashboard has reshuffled them before.
#[derive(Debug, Deserialize, Serialize)]
pub struct Common {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_login_page")]
    pub login_page: String,

    #[serde(default = "default_data_page")]
    pub data_page: String,

    #[serde(default = "default_user_page")]
    pub user_page: String,

    #[serde(default = "default_checkin_page")]
    pub checkin_page: String,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_page: default_login_page(),
            data_page: default_data_page(),
            user_page: default_user_page(),
            checkin_page: default_checkin_page(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.cloudtrax.com".into()
}
fn default_login_page() -> String {
    "/login.php".into()
}
fn default_data_page() -> String {
    "/data.php".into()
}
fn default_user_page() -> String {
    "/user.php".into()
}
fn default_checkin_page() -> String {
    "/checkin.php".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: false,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// One `[networks.<name>]` section.
#[derive(Debug, Deserialize, Serialize)]
pub struct Network {
    /// Dashboard login account for this network.
    pub username: String,

    /// Dashboard login password (plaintext in the file — keep the file
    /// permissions tight).
    pub password: String,

    /// Override the shared timeout.
    pub timeout: Option<u64>,

    /// Override the shared insecure-TLS setting.
    pub insecure: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "receptiveit", "cloudscrape").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cloudscrape");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from a file + environment.
///
/// `path` overrides the platform default; `CLOUDTRAX_`-prefixed variables
/// override the file (e.g. `CLOUDTRAX_DEFAULT_NETWORK`).
pub fn load_config(path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    let default_path = config_path();
    let path = path.unwrap_or(&default_path);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CLOUDTRAX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Translation to core config ──────────────────────────────────────

/// Resolve one network's scrape configuration.
///
/// `name` comes from the command line; falls back to `default_network`.
pub fn resolve_network(config: &Config, name: Option<&str>) -> Result<ScrapeConfig, ConfigError> {
    let Some(name) = name.or(config.default_network.as_deref()) else {
        return Err(ConfigError::NoNetwork);
    };

    let network = config
        .networks
        .get(name)
        .ok_or_else(|| ConfigError::UnknownNetwork { name: name.into() })?;

    let base_url = config
        .common
        .base_url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "common.base_url".into(),
            reason: format!("{e}: {}", config.common.base_url),
        })?;

    Ok(ScrapeConfig {
        base_url,
        pages: PageConfig {
            login: config.common.login_page.clone(),
            data: config.common.data_page.clone(),
            user: config.common.user_page.clone(),
            checkin: config.common.checkin_page.clone(),
        },
        network: name.to_owned(),
        credentials: Credentials {
            account: network.username.clone(),
            password: network.password.clone().into(),
        },
        timeout: Duration::from_secs(network.timeout.unwrap_or(config.defaults.timeout)),
        insecure: network.insecure.unwrap_or(config.defaults.insecure),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FILE: &str = r#"
        default_network = "homenet"

        [common]
        base_url = "https://dashboard.example.net"

        [defaults]
        timeout = 10

        [networks.homenet]
        username = "operator"
        password = "hunter2"

        [networks.cafe]
        username = "barista"
        password = "espresso"
        timeout = 60
        insecure = true
    "#;

    fn parsed() -> Config {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(FILE))
            .extract()
            .unwrap()
    }

    #[test]
    fn resolves_the_default_network() {
        let cfg = resolve_network(&parsed(), None).unwrap();

        assert_eq!(cfg.network, "homenet");
        assert_eq!(cfg.base_url.as_str(), "https://dashboard.example.net/");
        assert_eq!(cfg.credentials.account, "operator");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!(!cfg.insecure);
    }

    #[test]
    fn per_network_overrides_beat_the_shared_defaults() {
        let cfg = resolve_network(&parsed(), Some("cafe")).unwrap();

        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert!(cfg.insecure);
    }

    #[test]
    fn unconfigured_network_is_an_error() {
        let err = resolve_network(&parsed(), Some("nowhere")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork { name } if name == "nowhere"));
    }

    #[test]
    fn page_paths_fall_back_to_upstream_defaults() {
        let cfg = resolve_network(&parsed(), None).unwrap();
        assert_eq!(cfg.pages.data, "/data.php");
        assert_eq!(cfg.pages.checkin, "/checkin.php");
    }
}
