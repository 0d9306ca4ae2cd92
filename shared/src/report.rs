//! Day-bucketed irrigation history for ranch reports

use std::iter::Peekable;
use std::vec::IntoIter;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::IrrigationHistory;
use crate::types::DateRange;

/// Anything logged against a calendar day
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for IrrigationHistory {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// All records logged on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket<T> {
    pub date: NaiveDate,
    /// Weekday name, e.g. "Monday"
    pub day: String,
    pub histories: Vec<T>,
}

/// Iterator over non-empty day buckets in ascending date order
pub struct DayBuckets<T> {
    records: Peekable<IntoIter<T>>,
}

impl<T: Dated> Iterator for DayBuckets<T> {
    type Item = DayBucket<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.records.next()?;
        let date = first.date();
        let mut histories = vec![first];
        while let Some(record) = self.records.next_if(|record| record.date() == date) {
            histories.push(record);
        }

        Some(DayBucket {
            date,
            day: weekday_name(date),
            histories,
        })
    }
}

/// Group records by day within `range`.
///
/// Records are expected in the order the ranch lays them out (set number,
/// then block); that order is kept within each day. Days without records
/// produce no bucket.
pub fn bucket_history_by_day<T, I>(records: I, range: DateRange) -> DayBuckets<T>
where
    T: Dated,
    I: IntoIterator<Item = T>,
{
    let mut in_range: Vec<T> = records
        .into_iter()
        .filter(|record| range.contains(record.date()))
        .collect();
    // stable, so the structural order within a day survives
    in_range.sort_by_key(|record| record.date());

    DayBuckets {
        records: in_range.into_iter().peekable(),
    }
}

pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
