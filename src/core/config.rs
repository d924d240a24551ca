use crate::core::analytics::{ForecastOverrides, ForecastParams};
use crate::core::store::StoreError;
use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_collection() -> String {
    "financial_records".to_string()
}

fn default_api_key_env() -> String {
    "SUPABASE_KEY".to_string()
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl StoreConfig {
    pub fn api_key(&self) -> Result<String, StoreError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StoreError::MissingCredentials(self.api_key_env.clone()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ForecastConfig {
    #[serde(default)]
    pub report: ForecastOverrides,
    #[serde(default)]
    pub endpoint: ForecastOverrides,
}

impl ForecastConfig {
    pub fn report_params(&self) -> ForecastParams {
        self.report.apply(ForecastParams::report())
    }

    pub fn endpoint_params(&self) -> ForecastParams {
        self.endpoint.apply(ForecastParams::endpoint())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("tech", "anubis", "anubis")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.store.base_url.trim().is_empty(),
            "store.base_url must not be empty"
        );
        ensure!(
            !self.store.collection.trim().is_empty(),
            "store.collection must not be empty"
        );
        for (name, params) in [
            ("report", self.forecast.report_params()),
            ("endpoint", self.forecast.endpoint_params()),
        ] {
            ensure!(
                params.normalization_days > 0,
                "forecast.{name}.normalization_days must be at least 1"
            );
        }
        Ok(())
    }
}
