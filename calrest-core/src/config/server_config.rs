//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalrestError, CalrestResult};
use crate::seed::{DEFAULT_CALENDARS, DEFAULT_EVENTS, SeedSource};

const DEFAULT_PORT: u16 = 8083;

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/calrest/config.toml
///
/// Every key can be overridden with a `CALREST_`-prefixed environment
/// variable (`CALREST_PORT`, `CALREST_EVENTS_SEED`, ...). A plain `PORT`
/// variable overrides the port last.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file with the initial calendars; the embedded dataset when unset.
    pub calendars_seed: Option<PathBuf>,

    /// JSON file with the initial calendar events; the embedded dataset when unset.
    pub events_seed: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            calendars_seed: None,
            events_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn config_path() -> CalrestResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalrestError::Config("Could not determine config directory".into()))?
            .join("calrest");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file (if present) and the environment.
    pub fn load() -> CalrestResult<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path, std::env::var("PORT").ok())
    }

    /// Load from `path` (if present) and `CALREST_*` variables, then apply
    /// `port_override`.
    pub fn load_from(path: &Path, port_override: Option<String>) -> CalrestResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALREST"))
            .set_override_option("port", port_override)
            .map_err(|e| CalrestError::Config(e.to_string()))?
            .build()
            .map_err(|e| CalrestError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalrestError::Config(e.to_string()))
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn calendars_source(&self) -> SeedSource {
        SeedSource::file_or(self.calendars_seed.as_deref().map(expand), DEFAULT_CALENDARS)
    }

    pub fn events_source(&self) -> SeedSource {
        SeedSource::file_or(self.events_seed.as_deref().map(expand), DEFAULT_EVENTS)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load_from(&dir.path().join("config.toml"), None).unwrap();

        assert_eq!(config.port, 8083);
        assert_eq!(config.addr().to_string(), "127.0.0.1:8083");
        assert_eq!(config.calendars_source(), SeedSource::Embedded(DEFAULT_CALENDARS));
        assert_eq!(config.events_source(), SeedSource::Embedded(DEFAULT_EVENTS));
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "host = \"0.0.0.0\"\nport = 9000\nevents_seed = \"/srv/events.json\"\n",
        )
        .unwrap();

        let config = ServerConfig::load_from(&path, None).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:9000");
        assert_eq!(
            config.events_source(),
            SeedSource::File(PathBuf::from("/srv/events.json"))
        );
        assert_eq!(config.calendars_source(), SeedSource::Embedded(DEFAULT_CALENDARS));
    }

    #[test]
    fn test_port_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 9000\n").unwrap();

        let config = ServerConfig::load_from(&path, Some("7070".to_string())).unwrap();
        assert_eq!(config.port, 7070);
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let err = ServerConfig::load_from(&path, Some("not-a-port".to_string())).unwrap_err();
        assert!(matches!(err, CalrestError::Config(_)));
    }

    #[test]
    fn test_seed_paths_expand_tilde() {
        let config = ServerConfig {
            calendars_seed: Some(PathBuf::from("~/calendars.json")),
            ..ServerConfig::default()
        };

        match config.calendars_source() {
            SeedSource::File(path) => {
                assert!(!path.to_string_lossy().starts_with('~'), "Got {}", path.display())
            }
            other => panic!("Expected a file source, got {:?}", other),
        }
    }
}
