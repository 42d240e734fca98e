//! Provider configuration parsing from environment variables.

use std::time::Duration;

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API configuration
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl CoinGeckoConfig {
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: var("COINGECKO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: var("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_retries: var("HTTP_MAX_RETRIES")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.max_retries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coingecko_config_defaults() {
        let config = CoinGeckoConfig::from_vars(|_| None);
        assert_eq!(config.base_url, COINGECKO_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = CoinGeckoConfig::from_vars(|k| {
            (k == "COINGECKO_BASE_URL").then(|| "http://localhost:8080/api/v3/".to_string())
        });
        assert_eq!(config.base_url, "http://localhost:8080/api/v3");
    }
}
