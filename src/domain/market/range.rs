use crate::domain::errors::MarketDataError;
use chrono::NaiveDate;
use std::fmt;

/// Input format for dates typed at the prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MarketDataError> {
        if start > end {
            return Err(MarketDataError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses two `yyyy-mm-dd` strings into a validated range.
    pub fn parse(start: &str, end: &str) -> Result<Self, MarketDataError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, MarketDataError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| MarketDataError::InvalidDate {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("2024-01-01", " 2024-01-05 ").unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 5));
        assert!(range.contains(date(2024, 1, 3)));
        assert!(!range.contains(date(2024, 1, 6)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::parse("2024-01-05", "2024-01-01").unwrap_err();
        assert_eq!(
            err,
            MarketDataError::InvertedRange {
                start: date(2024, 1, 5),
                end: date(2024, 1, 1),
            }
        );
    }

    #[test]
    fn test_ordering_is_calendar_not_lexical() {
        // "2023-12-31" vs "2024-1-2" would sort the wrong way as text
        let range = DateRange::new(date(2023, 12, 31), date(2024, 1, 2)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));

        assert!(DateRange::new(date(2024, 10, 1), date(2024, 9, 30)).is_err());
    }

    #[test]
    fn test_malformed_date() {
        let err = parse_date("05/01/2024").unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidDate { .. }));
    }
}
