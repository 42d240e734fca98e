use crate::domain::catalog::CoinRecord;
use crate::domain::market::{DateRange, MarketTable};

/// A date-bounded copy of the active table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSlice {
    pub range: DateRange,
    pub table: MarketTable,
}

/// The coin currently loaded, its history and an optional slice of it
#[derive(Debug, Clone)]
pub struct ActiveCoin {
    pub coin: CoinRecord,
    pub table: MarketTable,
    pub slice: Option<TableSlice>,
}

/// Which of the active tables an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableChoice {
    Full,
    Slice,
}

impl std::str::FromStr for TableChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "f" => Ok(Self::Full),
            "slice" | "s" => Ok(Self::Slice),
            _ => anyhow::bail!("Invalid choice: {}. Must be 'full' or 'slice'", s),
        }
    }
}

/// Everything the session carries between menu actions.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active: Option<ActiveCoin>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveCoin> {
        self.active.as_ref()
    }

    /// Replaces the active coin; any previous slice is dropped with it.
    pub fn select(&mut self, coin: CoinRecord, table: MarketTable) {
        self.active = Some(ActiveCoin {
            coin,
            table,
            slice: None,
        });
    }

    /// Slices the active table and stores the result, replacing any earlier slice.
    pub fn set_slice(&mut self, range: DateRange) -> anyhow::Result<&TableSlice> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("No coin selected"))?;
        let table = active.table.slice_range(&range)?;
        Ok(active.slice.insert(TableSlice { range, table }))
    }

    pub fn slice(&self) -> Option<&TableSlice> {
        self.active.as_ref()?.slice.as_ref()
    }

    pub fn table(&self, choice: TableChoice) -> Option<&MarketTable> {
        match choice {
            TableChoice::Full => self.active.as_ref().map(|a| &a.table),
            TableChoice::Slice => self.slice().map(|s| &s.table),
        }
    }

    /// File stem and display title for the chosen table
    pub fn label(&self, choice: TableChoice) -> Option<String> {
        let active = self.active.as_ref()?;
        match choice {
            TableChoice::Full => Some(active.coin.id.clone()),
            TableChoice::Slice => active
                .slice
                .as_ref()
                .map(|s| format!("{}_{}_{}", active.coin.id, s.range.start(), s.range.end())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::RawSeriesPoint;
    use chrono::NaiveDate;

    fn table(n: usize) -> MarketTable {
        let points: Vec<RawSeriesPoint> = (0..n)
            .map(|i| RawSeriesPoint::new(i as i64 * 86_400_000, 1.0 + i as f64))
            .collect();
        MarketTable::normalize(&points, &points, &points).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, d).unwrap()
    }

    #[test]
    fn test_slice_requires_coin() {
        let mut state = SessionState::new();
        let range = DateRange::new(date(1), date(2)).unwrap();
        assert!(state.set_slice(range).is_err());
        assert!(state.slice().is_none());
    }

    #[test]
    fn test_select_clears_slice() {
        let mut state = SessionState::new();
        state.select(CoinRecord::new("bitcoin", "btc", "Bitcoin"), table(5));
        state
            .set_slice(DateRange::new(date(2), date(3)).unwrap())
            .unwrap();
        assert_eq!(state.table(TableChoice::Slice).unwrap().len(), 2);
        assert_eq!(
            state.label(TableChoice::Slice).as_deref(),
            Some("bitcoin_1970-01-02_1970-01-03")
        );

        state.select(CoinRecord::new("ethereum", "eth", "Ethereum"), table(3));
        assert!(state.slice().is_none());
        assert_eq!(state.label(TableChoice::Full).as_deref(), Some("ethereum"));
    }

    #[test]
    fn test_failed_slice_keeps_previous() {
        let mut state = SessionState::new();
        state.select(CoinRecord::new("bitcoin", "btc", "Bitcoin"), table(5));
        state
            .set_slice(DateRange::new(date(1), date(2)).unwrap())
            .unwrap();

        let missing = DateRange::new(date(1), date(20)).unwrap();
        assert!(state.set_slice(missing).is_err());
        assert_eq!(state.slice().unwrap().table.len(), 2);
    }

    #[test]
    fn test_parse_table_choice() {
        assert_eq!("Slice".parse::<TableChoice>().unwrap(), TableChoice::Slice);
        assert_eq!("f".parse::<TableChoice>().unwrap(), TableChoice::Full);
        assert!("both".parse::<TableChoice>().is_err());
    }
}
