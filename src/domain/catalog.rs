//! Coin catalog: maps ticker symbols to the provider's canonical ids.
//!
//! Built once per session from the provider's full listing and never
//! mutated afterwards, apart from attaching market-cap ranks.

use crate::domain::errors::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A coin as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub id: String,
    /// Ticker, always lower-cased
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

impl CoinRecord {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into().to_lowercase(),
            name: name.into(),
        }
    }
}

/// A coin from the provider's market-cap leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCoin {
    pub market_cap_rank: Option<u32>,
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct CoinCatalog {
    records: Vec<CoinRecord>,
    /// symbol -> positions in `records`, listing order
    by_symbol: HashMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
    ranks: HashMap<String, u32>,
}

impl CoinCatalog {
    pub fn new(records: Vec<CoinRecord>) -> Self {
        let mut by_symbol: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_id = HashMap::with_capacity(records.len());

        let records: Vec<CoinRecord> = records
            .into_iter()
            .map(|r| CoinRecord {
                symbol: r.symbol.to_lowercase(),
                ..r
            })
            .collect();

        for (i, record) in records.iter().enumerate() {
            by_symbol.entry(record.symbol.clone()).or_default().push(i);
            by_id.entry(record.id.clone()).or_insert(i);
        }

        Self {
            records,
            by_symbol,
            by_id,
            ranks: HashMap::new(),
        }
    }

    /// Attaches market-cap ranks, used to pick between coins sharing a symbol.
    pub fn with_ranking(mut self, ranking: &[RankedCoin]) -> Self {
        self.attach_ranking(ranking);
        self
    }

    pub fn attach_ranking(&mut self, ranking: &[RankedCoin]) {
        for coin in ranking {
            if let Some(rank) = coin.market_cap_rank {
                self.ranks.insert(coin.id.clone(), rank);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CoinRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&CoinRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Every coin listed under `symbol` (case-insensitive), listing order.
    pub fn candidates(&self, symbol: &str) -> Vec<&CoinRecord> {
        self.by_symbol
            .get(&symbol.trim().to_lowercase())
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Resolves a ticker symbol to a coin, falling back to an exact canonical id.
    ///
    /// The symbol is matched case-insensitively; among several coins sharing
    /// it the best-ranked one is returned, and without ranks the first in
    /// listing order. Only input that is no coin's symbol is tried as an id.
    pub fn resolve_id(&self, symbol_or_id: &str) -> Result<&CoinRecord, CatalogError> {
        let needle = symbol_or_id.trim();
        let candidates = self.candidates(needle);
        candidates
            .iter()
            .enumerate()
            .min_by_key(|(pos, r)| (self.ranks.get(&r.id).copied().unwrap_or(u32::MAX), *pos))
            .map(|(_, r)| *r)
            .or_else(|| self.get(needle))
            .ok_or_else(|| CatalogError::UnknownSymbol {
                symbol: needle.to_string(),
            })
    }

    /// Coins whose id starts with `prefix`, in catalog order.
    ///
    /// Matching is case-sensitive. The result is lazy and can be iterated
    /// any number of times.
    pub fn prefix_search<'a>(&'a self, prefix: &'a str) -> PrefixSearch<'a> {
        PrefixSearch {
            records: &self.records,
            prefix,
        }
    }
}

impl FromIterator<CoinRecord> for CoinCatalog {
    fn from_iter<I: IntoIterator<Item = CoinRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Restartable view over catalog ids matching a prefix
#[derive(Debug, Clone, Copy)]
pub struct PrefixSearch<'a> {
    records: &'a [CoinRecord],
    prefix: &'a str,
}

impl<'a> PrefixSearch<'a> {
    pub fn iter(self) -> impl Iterator<Item = &'a CoinRecord> + Clone + 'a {
        let prefix = self.prefix;
        self.records
            .iter()
            .filter(move |r| r.id.starts_with(prefix))
    }
}

impl<'a> IntoIterator for PrefixSearch<'a> {
    type Item = &'a CoinRecord;
    type IntoIter = Box<dyn Iterator<Item = &'a CoinRecord> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CoinCatalog {
        CoinCatalog::new(vec![
            CoinRecord::new("bitcoin", "btc", "Bitcoin"),
            CoinRecord::new("bridged-ether", "eth", "Bridged Ether"),
            CoinRecord::new("ethereum", "ETH", "Ethereum"),
            CoinRecord::new("ethereum-classic", "etc", "Ethereum Classic"),
        ])
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let c = catalog();
        assert_eq!(c.resolve_id("BTC").unwrap().id, "bitcoin");
        assert_eq!(c.resolve_id(" btc ").unwrap().id, "bitcoin");
    }

    #[test]
    fn test_resolve_unknown_symbol() {
        let err = catalog().resolve_id("xyz").unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownSymbol {
                symbol: "xyz".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_falls_back_to_exact_id() {
        assert_eq!(catalog().resolve_id("ethereum").unwrap().id, "ethereum");
    }

    #[test]
    fn test_symbol_beats_colliding_id() {
        let c = CoinCatalog::new(vec![
            CoinRecord::new("ethereum", "eth", "Ethereum"),
            CoinRecord::new("eth", "ethx", "Some Other Eth"),
        ]);
        assert_eq!(c.resolve_id("eth").unwrap().id, "ethereum");
        assert_eq!(c.resolve_id("ETHX").unwrap().id, "eth");
    }

    #[test]
    fn test_shared_symbol_prefers_rank() {
        let c = catalog();
        assert_eq!(c.resolve_id("eth").unwrap().id, "bridged-ether");
        assert_eq!(c.candidates("ETH").len(), 2);

        let ranked = c.with_ranking(&[RankedCoin {
            market_cap_rank: Some(2),
            id: "ethereum".to_string(),
            symbol: "eth".to_string(),
            name: "Ethereum".to_string(),
            current_price: None,
            market_cap: None,
        }]);
        assert_eq!(ranked.resolve_id("eth").unwrap().id, "ethereum");
    }

    #[test]
    fn test_prefix_search_preserves_order_and_restarts() {
        let c = catalog();
        let search = c.prefix_search("ethereum");

        let first: Vec<_> = search.iter().map(|r| r.id.as_str()).collect();
        let second: Vec<_> = search.into_iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first, vec!["ethereum", "ethereum-classic"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_search_is_case_sensitive() {
        let c = catalog();
        assert_eq!(c.prefix_search("Eth").iter().count(), 0);
        assert_eq!(c.prefix_search("").iter().count(), 4);
    }
}
