//! Common types used across the platform

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, CalculationResult};

/// A numeric field as submitted by an operator.
///
/// Forms post numbers as text, so a value may arrive either as a JSON number
/// or as a string. Blank text means the field was left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(Decimal),
    Text(String),
}

impl NumericInput {
    /// Resolve to a decimal, treating blank text as absent
    pub fn resolve(&self, field: &str) -> CalculationResult<Option<Decimal>> {
        match self {
            NumericInput::Number(value) => Ok(Some(*value)),
            NumericInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Decimal::from_str(trimmed).map(Some).map_err(|_| {
                    CalculationError::invalid_input(field, format!("'{}' is not a number", trimmed))
                })
            }
        }
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Number(value)
    }
}

/// Resolve an optional submitted field
pub fn resolve_numeric(
    input: &Option<NumericInput>,
    field: &str,
) -> CalculationResult<Option<Decimal>> {
    match input {
        Some(value) => value.resolve(field),
        None => Ok(None),
    }
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` days before `today` through `today`
    pub fn trailing_days(today: NaiveDate, days: u64) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(today);
        Self { start, end: today }
    }

    /// Monday through Sunday of the week containing `today`
    pub fn week_of(today: NaiveDate) -> Self {
        let offset = u64::from(today.weekday().num_days_from_monday());
        let start = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day in the range, ascending; empty when start is after end
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_numeric_input_number() {
        let input = NumericInput::Number(Decimal::new(25, 1));
        assert_eq!(input.resolve("gpm").unwrap(), Some(Decimal::new(25, 1)));
    }

    #[test]
    fn test_numeric_input_blank_is_absent() {
        let input = NumericInput::Text("  ".to_string());
        assert_eq!(input.resolve("gpm").unwrap(), None);
    }

    #[test]
    fn test_numeric_input_non_numeric_rejected() {
        let input = NumericInput::Text("lots".to_string());
        let err = input.resolve("inches_needed").unwrap_err();
        assert_eq!(err.field(), Some("inches_needed"));
    }

    #[test]
    fn test_numeric_input_deserializes_from_json() {
        let number: NumericInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(number.resolve("x").unwrap(), Some(Decimal::new(125, 1)));

        let text: NumericInput = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(text.resolve("x").unwrap(), Some(Decimal::new(125, 1)));

        let junk: NumericInput = serde_json::from_str("\"twelve\"").unwrap();
        assert!(junk.resolve("x").is_err());
    }

    #[test]
    fn test_trailing_week() {
        let range = DateRange::trailing_days(date(2024, 7, 21), 7);
        assert_eq!(range.start, date(2024, 7, 14));
        assert_eq!(range.end, date(2024, 7, 21));
        assert_eq!(range.days().count(), 8);
    }

    #[test]
    fn test_week_of_runs_monday_to_sunday() {
        // 2024-07-17 is a Wednesday
        let range = DateRange::week_of(date(2024, 7, 17));
        assert_eq!(range.start, date(2024, 7, 15));
        assert_eq!(range.end, date(2024, 7, 21));

        let monday = DateRange::week_of(date(2024, 7, 15));
        assert_eq!(monday.start, date(2024, 7, 15));
    }

    #[test]
    fn test_inverted_range_has_no_days() {
        let range = DateRange::new(date(2024, 7, 10), date(2024, 7, 1));
        assert_eq!(range.days().count(), 0);
        assert!(!range.contains(date(2024, 7, 5)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_week_of_contains_today(offset in 0u64..3650) {
                let today = date(2020, 1, 1).checked_add_days(Days::new(offset)).unwrap();
                let week = DateRange::week_of(today);

                prop_assert!(week.contains(today));
                prop_assert_eq!(week.start.weekday(), chrono::Weekday::Mon);
                prop_assert_eq!(week.days().count(), 7);
            }
        }
    }
}
