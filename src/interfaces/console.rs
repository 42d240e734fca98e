//! Plain-text rendering of tables and listings for the terminal session.

use crate::domain::catalog::{CoinRecord, RankedCoin};
use crate::domain::market::{ColumnSummary, MarketRow, MarketTable};
use std::io::{self, Write};

/// Rows shown at each end when a table is too long to print in full
pub const PREVIEW_ROWS: usize = 5;

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "NaN".to_string(),
    }
}

fn write_row<W: Write>(out: &mut W, row: &MarketRow) -> io::Result<()> {
    writeln!(
        out,
        "{:<12} {:>16} {:>12} {:>22} {:>20}",
        row.date.to_string(),
        fmt_value(Some(row.price)),
        fmt_value(row.log_return),
        fmt_value(Some(row.market_cap)),
        fmt_value(Some(row.total_volume)),
    )
}

/// Prints the table, eliding the middle when it exceeds `2 * PREVIEW_ROWS` rows.
pub fn print_table<W: Write>(out: &mut W, title: &str, table: &MarketTable) -> io::Result<()> {
    writeln!(out, "\n{}", title)?;
    writeln!(
        out,
        "{:<12} {:>16} {:>12} {:>22} {:>20}",
        "date", "price", "log_return", "market_cap", "total_volume"
    )?;
    writeln!(out, "{}", "-".repeat(86))?;

    if table.len() <= 2 * PREVIEW_ROWS {
        for row in table.rows() {
            write_row(out, row)?;
        }
    } else {
        for row in table.head(PREVIEW_ROWS) {
            write_row(out, row)?;
        }
        writeln!(out, "{:<12}", "...")?;
        for row in table.tail(PREVIEW_ROWS) {
            write_row(out, row)?;
        }
    }

    writeln!(out, "\n[{} rows x 4 columns]", table.len())
}

pub fn print_summary<W: Write>(out: &mut W, summaries: &[ColumnSummary]) -> io::Result<()> {
    write!(out, "\n{:<8}", "")?;
    for s in summaries {
        write!(out, " {:>20}", s.column.header())?;
    }
    writeln!(out)?;

    type Getter = fn(&ColumnSummary) -> f64;
    let lines: [(&str, Getter); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std_dev),
        ("min", |s| s.min),
        ("25%", |s| s.lower_quartile),
        ("50%", |s| s.median),
        ("75%", |s| s.upper_quartile),
        ("max", |s| s.max),
    ];
    for (label, get) in lines {
        write!(out, "{:<8}", label)?;
        for s in summaries {
            write!(out, " {:>20.3}", get(s))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_top_coins<W: Write>(out: &mut W, coins: &[RankedCoin]) -> io::Result<()> {
    writeln!(
        out,
        "\n{:>5}  {:<28} {:<10} {:>16} {:>22}",
        "rank", "id", "symbol", "price", "market_cap"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;
    for coin in coins {
        writeln!(
            out,
            "{:>5}  {:<28} {:<10} {:>16} {:>22}",
            coin.market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            coin.id,
            coin.symbol,
            fmt_value(coin.current_price),
            fmt_value(coin.market_cap),
        )?;
    }
    Ok(())
}

/// Prints up to `limit` matches and reports how many were left out.
pub fn print_matches<'a, W, I>(out: &mut W, matches: I, limit: usize) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a CoinRecord>,
{
    let mut total = 0;
    for record in matches {
        if total < limit {
            writeln!(out, "  {:<32} {:<10} {}", record.id, record.symbol, record.name)?;
        }
        total += 1;
    }
    if total == 0 {
        writeln!(out, "  (no matches)")?;
    } else if total > limit {
        writeln!(out, "  ... and {} more", total - limit)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::RawSeriesPoint;

    fn table(n: usize) -> MarketTable {
        let points: Vec<RawSeriesPoint> = (0..n)
            .map(|i| RawSeriesPoint::new(i as i64 * 86_400_000, 10.0 + i as f64))
            .collect();
        MarketTable::normalize(&points, &points, &points).unwrap()
    }

    #[test]
    fn test_short_table_printed_in_full() {
        let mut out = Vec::new();
        print_table(&mut out, "BTC", &table(3)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1970-01-03"));
        assert!(text.contains("NaN"));
        assert!(text.contains("10.000"));
        assert!(text.contains("[3 rows x 4 columns]"));
        assert!(!text.contains("..."));
    }

    #[test]
    fn test_long_table_elided() {
        let mut out = Vec::new();
        print_table(&mut out, "BTC", &table(30)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("..."));
        assert!(text.contains("1970-01-30"));
        assert!(!text.contains("1970-01-15"));
    }

    #[test]
    fn test_print_matches_limit() {
        let records = vec![
            CoinRecord::new("a1", "a", "A1"),
            CoinRecord::new("a2", "a", "A2"),
            CoinRecord::new("a3", "a", "A3"),
        ];
        let mut out = Vec::new();
        let total = print_matches(&mut out, &records, 2).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(total, 3);
        assert!(text.contains("a2"));
        assert!(!text.contains("a3 "));
        assert!(text.contains("and 1 more"));
    }
}
