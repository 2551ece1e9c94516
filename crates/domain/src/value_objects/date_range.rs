//! Optional date window for metocean time-series requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Wire format of `start_date` / `end_date` query parameters
pub const SERVICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A possibly open-ended range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range; both ends are optional
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, DomainError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(DomainError::InvalidDateRange(format!(
                    "start {s} is after end {e}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no bounds (server default window)
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Parse `YYYY-MM-DD` strings into a range
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` for unparseable dates and
    /// `DomainError::InvalidDateRange` for inverted ranges.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DomainError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), SERVICE_DATE_FORMAT)
                .map_err(|e| DomainError::InvalidDateTime(format!("{s}: {e}")))
        };
        let start = start.map(parse).transpose()?;
        let end = end.map(parse).transpose()?;
        Self::new(start, end)
    }

    /// Start date, if bounded
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// End date, if bounded
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// `start_date` / `end_date` query pairs for the bounded ends
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(s) = self.start {
            pairs.push((
                "start_date".to_string(),
                s.format(SERVICE_DATE_FORMAT).to_string(),
            ));
        }
        if let Some(e) = self.end {
            pairs.push((
                "end_date".to_string(),
                e.format(SERVICE_DATE_FORMAT).to_string(),
            ));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unbounded_has_no_query() {
        assert!(DateRange::unbounded().query_pairs().is_empty());
        assert_eq!(DateRange::default(), DateRange::unbounded());
    }

    #[test]
    fn bounded_query_pairs() {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 7))).unwrap();
        assert_eq!(
            range.query_pairs(),
            vec![
                ("start_date".to_string(), "2024-01-01".to_string()),
                ("end_date".to_string(), "2024-01-07".to_string()),
            ]
        );
    }

    #[test]
    fn start_only() {
        let range = DateRange::new(Some(date(2024, 3, 9)), None).unwrap();
        assert_eq!(range.query_pairs().len(), 1);
        assert_eq!(range.start(), Some(date(2024, 3, 9)));
        assert!(range.end().is_none());
    }

    #[test]
    fn inverted_range_rejected() {
        let err = DateRange::new(Some(date(2024, 1, 2)), Some(date(2024, 1, 1))).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange(_)));
    }

    #[test]
    fn parse_strings() {
        let range = DateRange::parse(Some("2024-05-01"), Some("2024-05-03")).unwrap();
        assert_eq!(range.end(), Some(date(2024, 5, 3)));
        assert!(DateRange::parse(Some("05/01/2024"), None).is_err());
    }
}
