//! Menu-driven interactive session.
//!
//! Reads commands line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the whole loop can be driven by a script.
//! Every recoverable error is reported and the user is prompted again; only
//! "close program" or end of input ends the session.

pub mod menu;
pub mod state;

pub use menu::MenuChoice;
pub use state::{ActiveCoin, SessionState, TableChoice, TableSlice};

use crate::domain::catalog::CoinCatalog;
use crate::domain::errors::CatalogError;
use crate::domain::market::{DateRange, MarketColumn, MarketTable};
use crate::domain::ports::{Lookback, MarketDataProvider, Plotter};
use crate::infrastructure::export::{ExportFormat, FileExporter};
use crate::interfaces::console;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const SEARCH_LIMIT: usize = 25;
const SUGGESTION_LIMIT: usize = 5;

/// Raised when stdin reaches end of file mid-prompt
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Closed,
    InputClosed,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub vs_currency: String,
    pub lookback: Lookback,
    pub initial_coin: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            lookback: Lookback::default(),
            initial_coin: None,
        }
    }
}

pub struct Session<R, W> {
    provider: Arc<dyn MarketDataProvider>,
    plotter: Box<dyn Plotter>,
    exporter: FileExporter,
    settings: SessionSettings,
    catalog: CoinCatalog,
    state: SessionState,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Loads the coin catalog and returns a session ready to run.
    pub async fn start(
        provider: Arc<dyn MarketDataProvider>,
        plotter: Box<dyn Plotter>,
        exporter: FileExporter,
        settings: SessionSettings,
        input: R,
        output: W,
    ) -> Result<Self> {
        let records = provider
            .coins_list()
            .await
            .context("Failed to load coin catalog")?;
        let mut catalog = CoinCatalog::new(records);

        match provider.top_coins(&settings.vs_currency).await {
            Ok(ranking) => catalog.attach_ranking(&ranking),
            Err(e) => warn!("Session: market-cap ranking unavailable: {:#}", e),
        }
        info!("Session: catalog ready with {} coins", catalog.len());

        Ok(Self {
            provider,
            plotter,
            exporter,
            settings,
            catalog,
            state: SessionState::new(),
            input,
            output,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &CoinCatalog {
        &self.catalog
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> Result<SessionOutcome> {
        writeln!(
            self.output,
            "coinframe: {} coins listed, prices in {}",
            self.catalog.len(),
            self.settings.vs_currency.to_uppercase()
        )?;

        if let Some(coin) = self.settings.initial_coin.clone() {
            if let Err(e) = self.load_coin(&coin).await {
                self.report(&e)?;
            }
        }

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line("> ")? else {
                info!("Session: input closed");
                return Ok(SessionOutcome::InputClosed);
            };
            if line.is_empty() {
                continue;
            }

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            debug!("Session: menu choice {:?}", choice);

            if choice.needs_table() && self.state.active().is_none() {
                writeln!(self.output, "No coin selected yet. Choose 'select coin' first.")?;
                continue;
            }

            let result = match choice {
                MenuChoice::SelectCoin => self.select_coin().await,
                MenuChoice::ViewTable => self.view_table(),
                MenuChoice::SliceTable => self.slice_table(),
                MenuChoice::Visualize => self.visualize(),
                MenuChoice::Summary => self.summary(),
                MenuChoice::TopCoins => self.top_coins().await,
                MenuChoice::SearchIds => self.search_ids(),
                MenuChoice::Export => self.export(),
                MenuChoice::Close => {
                    if self.state.active().is_some() {
                        if let Err(e) = self.export() {
                            if e.is::<InputClosed>() {
                                return Ok(SessionOutcome::InputClosed);
                            }
                            self.report(&e)?;
                        }
                    }
                    writeln!(self.output, "Goodbye.")?;
                    info!("Session: closed by user");
                    return Ok(SessionOutcome::Closed);
                }
            };

            if let Err(e) = result {
                if e.is::<InputClosed>() {
                    info!("Session: input closed");
                    return Ok(SessionOutcome::InputClosed);
                }
                self.report(&e)?;
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        match self.state.active() {
            Some(active) => {
                write!(
                    self.output,
                    "Active: {} ({}), {} rows",
                    active.coin.id,
                    active.coin.symbol,
                    active.table.len()
                )?;
                match &active.slice {
                    Some(slice) => writeln!(self.output, ", slice {}", slice.range)?,
                    None => writeln!(self.output)?,
                }
            }
            None => writeln!(self.output, "Active: none")?,
        }
        for choice in MenuChoice::ALL {
            writeln!(self.output, "  [{}] {}", choice.key(), choice)?;
        }
        Ok(())
    }

    /// Prompts and reads one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?.ok_or_else(|| InputClosed.into())
    }

    fn report(&mut self, error: &anyhow::Error) -> Result<()> {
        warn!("Session: {:#}", error);
        writeln!(self.output, "Error: {:#}", error)?;
        Ok(())
    }

    async fn select_coin(&mut self) -> Result<()> {
        loop {
            let input = self.ask("Ticker symbol or coin id (blank to cancel): ")?;
            if input.is_empty() {
                return Ok(());
            }
            match self.load_coin(&input).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is::<CatalogError>() => {
                    self.report(&e)?;
                    let prefix = input.to_lowercase();
                    writeln!(self.output, "Coin ids starting with '{}':", prefix)?;
                    console::print_matches(
                        &mut self.output,
                        self.catalog.prefix_search(&prefix),
                        SUGGESTION_LIMIT,
                    )?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves `input`, fetches its history and makes it the active table.
    async fn load_coin(&mut self, input: &str) -> Result<()> {
        let coin = self.catalog.resolve_id(input)?.clone();

        let shared = self.catalog.candidates(&coin.symbol).len();
        if shared > 1 {
            writeln!(
                self.output,
                "Note: {} coins use the symbol '{}'; using {}",
                shared, coin.symbol, coin.id
            )?;
        }

        writeln!(self.output, "Fetching {} ({})...", coin.name, coin.id)?;
        let chart = self
            .provider
            .market_chart(&coin.id, &self.settings.vs_currency, self.settings.lookback)
            .await?;
        let table = MarketTable::from_chart(&chart)
            .with_context(|| format!("Failed to build market table for {}", coin.id))?;

        for anomaly in table.price_anomalies() {
            writeln!(self.output, "Warning: {}", anomaly)?;
        }

        info!("Session: loaded {} rows for {}", table.len(), coin.id);
        let title = format!("{} ({})", coin.id, self.settings.vs_currency.to_uppercase());
        console::print_table(&mut self.output, &title, &table)?;
        self.state.select(coin, table);
        Ok(())
    }

    /// Asks which table to use when a slice exists; `None` if cancelled.
    fn choose_table(&mut self, verb: &str) -> Result<Option<TableChoice>> {
        if self.state.slice().is_none() {
            return Ok(Some(TableChoice::Full));
        }
        loop {
            let input = self.ask(&format!("{} which table (full | slice, blank to cancel): ", verb))?;
            if input.is_empty() {
                return Ok(None);
            }
            match input.parse::<TableChoice>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn view_table(&mut self) -> Result<()> {
        let Some(choice) = self.choose_table("View")? else {
            return Ok(());
        };
        let label = self.state.label(choice).unwrap_or_default();
        if let Some(table) = self.state.table(choice) {
            console::print_table(&mut self.output, &label, table)?;
        }
        Ok(())
    }

    fn slice_table(&mut self) -> Result<()> {
        if let Some(range) = self.state.table(TableChoice::Full).and_then(|t| t.full_range()) {
            writeln!(self.output, "Available dates: {}", range)?;
        }

        loop {
            let start = self.ask("Start date (yyyy-mm-dd, blank to cancel): ")?;
            if start.is_empty() {
                return Ok(());
            }
            let end = self.ask("End date (yyyy-mm-dd): ")?;

            let outcome = DateRange::parse(&start, &end)
                .map_err(anyhow::Error::from)
                .and_then(|range| self.state.set_slice(range).map(|slice| slice.range));

            match outcome {
                Ok(range) => {
                    info!("Session: sliced {}", range);
                    let label = self.state.label(TableChoice::Slice).unwrap_or_default();
                    if let Some(slice) = self.state.slice() {
                        console::print_table(&mut self.output, &label, &slice.table)?;
                    }
                    return Ok(());
                }
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn ask_column(&mut self) -> Result<Option<MarketColumn>> {
        loop {
            let input =
                self.ask("Column (price | log returns | market cap | total volume, blank to cancel): ")?;
            if input.is_empty() {
                return Ok(None);
            }
            match input.parse::<MarketColumn>() {
                Ok(column) => return Ok(Some(column)),
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn visualize(&mut self) -> Result<()> {
        let Some(choice) = self.choose_table("Plot")? else {
            return Ok(());
        };
        let Some(column) = self.ask_column()? else {
            return Ok(());
        };

        let label = self.state.label(choice).unwrap_or_default();
        let points = self
            .state
            .table(choice)
            .map(|t| t.column(column))
            .unwrap_or_default();
        let title = format!(
            "{}: {} ({})",
            label,
            column,
            self.settings.vs_currency.to_uppercase()
        );

        self.plotter.plot(&title, column, &points)
    }

    fn summary(&mut self) -> Result<()> {
        let Some(choice) = self.choose_table("Summarize")? else {
            return Ok(());
        };
        if let Some(table) = self.state.table(choice) {
            console::print_summary(&mut self.output, &table.summary())?;
        }
        Ok(())
    }

    async fn top_coins(&mut self) -> Result<()> {
        let ranking = self.provider.top_coins(&self.settings.vs_currency).await?;
        self.catalog.attach_ranking(&ranking);
        console::print_top_coins(&mut self.output, &ranking)?;
        Ok(())
    }

    fn search_ids(&mut self) -> Result<()> {
        let prefix = self.ask("Coin id prefix: ")?;
        console::print_matches(
            &mut self.output,
            self.catalog.prefix_search(&prefix),
            SEARCH_LIMIT,
        )?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let Some(choice) = self.choose_table("Export")? else {
            return Ok(());
        };

        let format = loop {
            let input = self.ask("Format (csv | xlsx | both, blank to skip): ")?;
            if input.is_empty() {
                writeln!(self.output, "Export skipped.")?;
                return Ok(());
            }
            match input.parse::<ExportFormat>() {
                Ok(format) => break format,
                Err(e) => self.report(&e)?,
            }
        };

        let stem = self.state.label(choice).unwrap_or_default();
        let table = self
            .state
            .table(choice)
            .ok_or_else(|| anyhow::anyhow!("No table to export"))?;
        let paths = self.exporter.export(table, &stem, format)?;
        for path in paths {
            writeln!(self.output, "Wrote {}", path.display())?;
        }
        Ok(())
    }
}
