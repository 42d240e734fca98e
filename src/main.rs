//! coinframe: interactive explorer for CoinGecko market history.

use anyhow::Result;
use clap::Parser;
use coinframe::application::session::{Session, SessionOutcome, SessionSettings};
use coinframe::config::{Config, Mode};
use coinframe::domain::ports::{Lookback, MarketDataProvider, Plotter};
use coinframe::infrastructure::{CoinGeckoMarketDataService, FileExporter, MockMarketDataProvider};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "Fetch, slice, plot and export crypto market history", long_about = None)]
struct Cli {
    /// Coin to load at startup (ticker symbol or CoinGecko id)
    #[arg(short, long)]
    coin: Option<String>,

    /// Quote currency (e.g. usd, eur)
    #[arg(long)]
    vs_currency: Option<String>,

    /// Lookback in days (default 365), or "max" for the full history
    #[arg(short, long)]
    days: Option<Lookback>,

    /// Directory for exported files
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Use the offline mock provider instead of CoinGecko
    #[arg(long)]
    mock: bool,

    /// Log at info level instead of warn (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(coin) = self.coin {
            config.initial_coin = Some(coin);
        }
        if let Some(currency) = self.vs_currency {
            config.vs_currency = currency.trim().to_lowercase();
        }
        if let Some(days) = self.days {
            config.lookback = days;
        }
        if let Some(dir) = self.export_dir {
            config.export_dir = dir;
        }
        if self.mock {
            config.mode = Mode::Mock;
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts on stdout
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.apply(Config::from_env()?);
    let session_id = Uuid::new_v4();
    info!(%session_id, mode = ?config.mode, "Starting coinframe session");

    let provider: Arc<dyn MarketDataProvider> = match config.mode {
        Mode::CoinGecko => Arc::new(CoinGeckoMarketDataService::new(&config.coingecko)),
        Mode::Mock => Arc::new(MockMarketDataProvider::new()),
    };

    #[cfg(feature = "ui")]
    let plotter: Box<dyn Plotter> = Box::new(coinframe::interfaces::EguiPlotter);
    #[cfg(not(feature = "ui"))]
    let plotter: Box<dyn Plotter> = Box::new(coinframe::interfaces::UnavailablePlotter);

    let settings = SessionSettings {
        vs_currency: config.vs_currency.clone(),
        lookback: config.lookback,
        initial_coin: config.initial_coin.clone(),
    };

    let stdin = std::io::stdin();
    let mut session = Session::start(
        provider,
        plotter,
        FileExporter::new(&config.export_dir),
        settings,
        stdin.lock(),
        std::io::stdout(),
    )
    .await?;

    match session.run().await? {
        SessionOutcome::Closed => info!(%session_id, "Session closed"),
        SessionOutcome::InputClosed => info!(%session_id, "Session ended at end of input"),
    }
    Ok(())
}
