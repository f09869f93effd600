use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::ReasonCode;

/// Canonical textual form of every stored date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const ALTERNATE_DATE_FORMATS: [&str; 1] = ["%Y/%m/%d"];

/// A calendar date without time of day.
///
/// Years are limited to four digits so that the canonical `YYYY-MM-DD`
/// rendering sorts lexically in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseDate(NaiveDate);

impl ExpenseDate {
    pub fn new(date: NaiveDate) -> Option<Self> {
        if (1..=9999).contains(&date.year()) {
            Some(Self(date))
        } else {
            None
        }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::new)
    }

    /// Parses and canonicalizes a date.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, RFC 3339 timestamps and naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamps; timestamps keep the calendar date
    /// as written.
    pub fn parse(raw: &str) -> Result<Self, ReasonCode> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReasonCode::InvalidDate);
        }
        parse_calendar_date(raw)
            .and_then(Self::new)
            .ok_or(ReasonCode::InvalidDate)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }
    ALTERNATE_DATE_FORMATS
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for ExpenseDate {
    type Error = ReasonCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpenseDate> for String {
    fn from(date: ExpenseDate) -> Self {
        date.to_string()
    }
}

/// Inclusive span of dates with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: ExpenseDate,
    to: ExpenseDate,
}

impl DateRange {
    /// Returns `None` when the bounds are inverted.
    pub fn new(from: ExpenseDate, to: ExpenseDate) -> Option<Self> {
        if from <= to {
            Some(Self { from, to })
        } else {
            None
        }
    }

    pub fn from(&self) -> ExpenseDate {
        self.from
    }

    pub fn to(&self) -> ExpenseDate {
        self.to
    }

    pub fn contains(&self, date: ExpenseDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> String {
        ExpenseDate::parse(raw).expect("valid date").to_string()
    }

    #[test]
    fn canonical_dates_round_trip_unchanged() {
        assert_eq!(date("2024-03-01"), "2024-03-01");
        assert_eq!(date("2000-02-29"), "2000-02-29");
    }

    #[test]
    fn parseable_values_are_canonicalized() {
        assert_eq!(date("2024-03-01T23:59:59.000Z"), "2024-03-01");
        assert_eq!(date("2024-03-01T10:15:00+09:00"), "2024-03-01");
        assert_eq!(date("2024-03-01T10:15:00"), "2024-03-01");
        assert_eq!(date("2024/03/01"), "2024-03-01");
        assert_eq!(date("  2024-03-01 "), "2024-03-01");
    }

    #[test]
    fn impossible_or_malformed_dates_are_rejected() {
        for raw in ["", "   ", "2023-02-29", "2024-13-01", "2024-04-31", "yesterday", "01/03/2024"] {
            assert_eq!(
                ExpenseDate::parse(raw),
                Err(ReasonCode::InvalidDate),
                "{raw:?} must be rejected"
            );
        }
    }

    #[test]
    fn lexical_order_matches_chronological_order() {
        let mut dates = vec![
            ExpenseDate::parse("2024-10-02").unwrap(),
            ExpenseDate::parse("0999-01-01").unwrap(),
            ExpenseDate::parse("2024-09-30").unwrap(),
        ];
        let mut rendered: Vec<String> = dates.iter().map(ToString::to_string).collect();
        dates.sort();
        rendered.sort();
        let chronological: Vec<String> = dates.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, chronological);
    }

    #[test]
    fn range_requires_ordered_bounds() {
        let early = ExpenseDate::parse("2024-01-01").unwrap();
        let late = ExpenseDate::parse("2024-01-31").unwrap();
        let range = DateRange::new(early, late).expect("ordered");
        assert!(range.contains(early));
        assert!(range.contains(late));
        assert!(DateRange::new(late, early).is_none());
        assert!(DateRange::new(early, early).is_some());
    }
}
