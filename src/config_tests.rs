use crate::config::{Config, Mode};
use crate::domain::ports::Lookback;
use std::collections::HashMap;
use std::path::PathBuf;

fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.mode, Mode::CoinGecko);
    assert_eq!(config.vs_currency, "usd");
    assert_eq!(config.lookback, Lookback::Days(365));
    assert_eq!(config.export_dir, PathBuf::from("."));
    assert!(config.initial_coin.is_none());
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("MODE", "Mock"),
        ("VS_CURRENCY", " EUR "),
        ("LOOKBACK_DAYS", "365"),
        ("EXPORT_DIR", "/tmp/exports"),
        ("DEFAULT_COIN", "eth"),
    ])
    .unwrap();

    assert_eq!(config.mode, Mode::Mock);
    assert_eq!(config.vs_currency, "eur");
    assert_eq!(config.lookback, Lookback::Days(365));
    assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    assert_eq!(config.initial_coin.as_deref(), Some("eth"));
}

#[test]
fn test_invalid_mode_rejected() {
    let err = config_from(&[("MODE", "binance")]).unwrap_err();
    assert!(err.to_string().contains("Invalid MODE"));
}

#[test]
fn test_invalid_lookback_rejected() {
    assert!(config_from(&[("LOOKBACK_DAYS", "0")]).is_err());
    assert!(config_from(&[("LOOKBACK_DAYS", "forever")]).is_err());
    assert_eq!(
        config_from(&[("LOOKBACK_DAYS", "MAX")]).unwrap().lookback,
        Lookback::Max
    );
}
