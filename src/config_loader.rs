use anyhow::{anyhow, Result};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tokio::time::Duration;

use crate::domain::model::market::{Market, TokenInfo};
use crate::engine::config::{
    BALANCE_POLL_SECS, DEBOUNCE_MS, DEVIATION_WARN_PCT, POOL_POLL_SECS, QUOTE_TTL_SECS,
};
use crate::engine::SessionConfig;

/// Top-level configuration structure containing all config sections
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub market: MarketConfig,
    pub app: AppInfo,
}

/// Backend gateway connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    2
}

/// Engine timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_quote_ttl_secs")]
    pub quote_ttl_secs: u64,

    #[serde(default = "default_deviation_warn_pct")]
    pub deviation_warn_pct: f64,

    #[serde(default = "default_pool_poll_secs")]
    pub pool_poll_secs: u64,

    #[serde(default = "default_balance_poll_secs")]
    pub balance_poll_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            quote_ttl_secs: QUOTE_TTL_SECS,
            deviation_warn_pct: DEVIATION_WARN_PCT,
            pool_poll_secs: POOL_POLL_SECS,
            balance_poll_secs: BALANCE_POLL_SECS,
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEBOUNCE_MS
}

fn default_quote_ttl_secs() -> u64 {
    QUOTE_TTL_SECS
}

fn default_deviation_warn_pct() -> f64 {
    DEVIATION_WARN_PCT
}

fn default_pool_poll_secs() -> u64 {
    POOL_POLL_SECS
}

fn default_balance_poll_secs() -> u64 {
    BALANCE_POLL_SECS
}

/// Market definition for the traded pair
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    pub name: String,
    pub base_symbol: String,
    pub base_decimals: u32,
    pub quote_symbol: String,
    pub quote_decimals: u32,
    pub tick_spacing: i32,
}

impl MarketConfig {
    pub fn to_market(&self) -> Market {
        Market {
            name: self.name.clone(),
            base: TokenInfo {
                symbol: self.base_symbol.clone(),
                decimals: self.base_decimals,
            },
            quote: TokenInfo {
                symbol: self.quote_symbol.clone(),
                decimals: self.quote_decimals,
            },
            tick_spacing: self.tick_spacing,
        }
    }
}

/// Application identity and demo input
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub account: String,

    /// Amount the headless runner types into the form on startup.
    #[serde(default)]
    pub demo_amount: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: AppConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        info!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            debounce: Duration::from_millis(self.engine.debounce_ms),
            quote_ttl: Duration::from_secs(self.engine.quote_ttl_secs),
            deviation_warn_pct: self.engine.deviation_warn_pct,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway.request_timeout_ms)
    }

    pub fn pool_poll_interval(&self) -> Duration {
        Duration::from_secs(self.engine.pool_poll_secs)
    }

    pub fn balance_poll_interval(&self) -> Duration {
        Duration::from_secs(self.engine.balance_poll_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config_with_defaults() {
        let toml_str = r#"
            [gateway]
            endpoint = "http://localhost:8080/rpc"

            [market]
            name = "ICP/ckUSDC"
            base_symbol = "ICP"
            base_decimals = 8
            quote_symbol = "ckUSDC"
            quote_decimals = 6
            tick_spacing = 10

            [app]
            account = "demo-account"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.debounce_ms, DEBOUNCE_MS);
        assert_eq!(config.engine.quote_ttl_secs, QUOTE_TTL_SECS);
        assert_eq!(config.gateway.max_retries, 2);
        assert_eq!(config.app.demo_amount, None);

        let market = config.market.to_market();
        assert_eq!(market.base.decimals, 8);
        assert_eq!(market.quote.decimals, 6);
    }
}
