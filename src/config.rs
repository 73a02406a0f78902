//! Startup configuration.
//!
//! Loaded from (in order of precedence, highest first):
//! 1. Environment variables prefixed with `LAUNCH_DASH_`
//! 2. `launch-dash.toml` in the working directory, if present
//! 3. Defaults: `spacex_launch_dash.csv` served on `127.0.0.1:8050`

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Optional configuration file name.
const CONFIG_FILE_NAME: &str = "launch-dash.toml";

/// Dataset read when nothing else is configured.
const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Launch records file (`.csv`, `.parquet` or `.json`).
    pub data_path: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
        }
    }
}

impl DashConfig {
    /// Load from the default locations.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE_NAME)).extract()
    }

    /// Layered providers, exposed so tests can add their own on top.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("LAUNCH_DASH_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.bind_addr.port(), 8050);
        assert!(config.bind_addr.ip().is_loopback());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config: DashConfig = Figment::new()
            .merge(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file("/nonexistent/launch-dash.toml"))
            .extract()
            .unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config: DashConfig = Figment::new()
            .merge(Serialized::defaults(DashConfig::default()))
            .merge(Toml::string(
                r#"
                data_path = "data/launches.parquet"
                bind_addr = "0.0.0.0:9000"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/launches.parquet"));
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_address_rejected() {
        let result: Result<DashConfig, _> = Figment::new()
            .merge(Serialized::defaults(DashConfig::default()))
            .merge(Toml::string(r#"bind_addr = "not an address""#))
            .extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_file_or_env() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config = DashConfig::load()?;
            assert_eq!(config, DashConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "launch-dash.toml",
                r#"
                data_path = "data/launches.parquet"
                bind_addr = "0.0.0.0:9000"
                "#,
            )?;
            let config = DashConfig::load()?;
            assert_eq!(config.data_path, PathBuf::from("data/launches.parquet"));
            assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "launch-dash.toml",
                r#"
                data_path = "data/launches.parquet"
                bind_addr = "0.0.0.0:9000"
                "#,
            )?;
            jail.set_env("LAUNCH_DASH_BIND_ADDR", "127.0.0.1:9100");
            let config = DashConfig::load()?;
            assert_eq!(config.data_path, PathBuf::from("data/launches.parquet"));
            assert_eq!(config.bind_addr, "127.0.0.1:9100".parse::<SocketAddr>().unwrap());
            Ok(())
        });
    }

    #[test]
    fn test_env_data_path_with_explicit_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"bind_addr = "0.0.0.0:8100""#)?;
            jail.set_env("LAUNCH_DASH_DATA_PATH", "launches.json");
            let config: DashConfig = DashConfig::figment(Path::new("custom.toml")).extract()?;
            assert_eq!(config.data_path, PathBuf::from("launches.json"));
            assert_eq!(config.bind_addr.port(), 8100);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_address_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LAUNCH_DASH_BIND_ADDR", "not an address");
            assert!(DashConfig::load().is_err());
            Ok(())
        });
    }
}
