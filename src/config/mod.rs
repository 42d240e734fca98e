//! Configuration module for coinframe.
//!
//! Values come from environment variables (a `.env` file is loaded first by
//! the binary); command-line flags override them afterwards.

mod provider_config;

pub use provider_config::{COINGECKO_API_BASE, CoinGeckoConfig};

use crate::domain::ports::Lookback;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where market data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CoinGecko,
    Mock,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coingecko" => Ok(Mode::CoinGecko),
            "mock" => Ok(Mode::Mock),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'coingecko' or 'mock'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub coingecko: CoinGeckoConfig,
    pub vs_currency: String,
    pub lookback: Lookback,
    pub export_dir: PathBuf,
    /// Coin loaded at startup, skipping the first selection prompt
    pub initial_coin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::CoinGecko,
            coingecko: CoinGeckoConfig::default(),
            vs_currency: "usd".to_string(),
            lookback: Lookback::default(),
            export_dir: PathBuf::from("."),
            initial_coin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = var("MODE")
            .map(|m| Mode::from_str(&m))
            .transpose()?
            .unwrap_or(Mode::CoinGecko);

        let lookback = var("LOOKBACK_DAYS")
            .map(|d| Lookback::from_str(&d))
            .transpose()
            .context("Failed to parse LOOKBACK_DAYS")?
            .unwrap_or_default();

        let vs_currency = var("VS_CURRENCY")
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "usd".to_string());

        Ok(Self {
            mode,
            coingecko: CoinGeckoConfig::from_vars(&var),
            vs_currency,
            lookback,
            export_dir: var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            initial_coin: var("DEFAULT_COIN").filter(|c| !c.trim().is_empty()),
        })
    }
}
