use crate::config::CoinGeckoConfig;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use url::Url;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware
    pub fn create_client(config: &CoinGeckoConfig) -> ClientWithMiddleware {
        // Exponential backoff on transient failures only (5xx, 429, timeouts)
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(2)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// Joins `path` onto `base_url` and appends the query parameters.
///
/// reqwest-middleware's request builder does not expose `.query()`, so the
/// full URL is assembled up front.
pub fn build_url_with_query<K, V>(base_url: &str, path: &str, params: &[(K, V)]) -> anyhow::Result<Url>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let url = if params.is_empty() {
        Url::parse(&raw)?
    } else {
        Url::parse_with_params(&raw, params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))?
    };
    Ok(url)
}
