//! Irrigation history models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DateRange;

/// Append-only record of one schedule applied to one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationHistory {
    pub id: Uuid,
    pub block_id: Uuid,
    pub well_id: Option<Uuid>,
    pub date: NaiveDate,
    pub minutes_irrigated: Decimal,
    pub gallons_used: Decimal,
    pub acre_feet_used: Decimal,
    pub days_between_irrigations: Option<i32>,
    pub interval_between_irrigations: Option<i32>,
}

/// Water drawn by one history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryVolumes {
    pub gallons_used: Decimal,
    pub acre_feet_used: Decimal,
}

/// Water used by a block over one Monday–Sunday week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyUsage {
    pub week: DateRange,
    pub total_gallons: Decimal,
    pub total_acre_feet: Decimal,
}

impl WeeklyUsage {
    /// Total the records that fall within the week containing `today`
    pub fn for_week<'a, I>(today: NaiveDate, records: I) -> Self
    where
        I: IntoIterator<Item = &'a IrrigationHistory>,
    {
        let week = DateRange::week_of(today);
        let (total_gallons, total_acre_feet) = records
            .into_iter()
            .filter(|record| week.contains(record.date))
            .fold((Decimal::ZERO, Decimal::ZERO), |(gallons, acre_feet), record| {
                (gallons + record.gallons_used, acre_feet + record.acre_feet_used)
            });

        Self {
            week,
            total_gallons,
            total_acre_feet,
        }
    }
}
