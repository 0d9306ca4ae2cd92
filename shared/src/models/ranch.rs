//! Ranch allocation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Consumption against a ranch's allocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationStatus {
    pub allocation: Decimal,
    pub total_gallons: Decimal,
    pub total_acre_feet: Decimal,
    pub allocation_remaining: Decimal,
}

impl AllocationStatus {
    /// Sum meter readings against an allocation; absent volumes count as nothing
    pub fn from_readings<I>(allocation: Decimal, readings: I) -> Self
    where
        I: IntoIterator<Item = (Option<Decimal>, Option<Decimal>)>,
    {
        let (total_gallons, total_acre_feet) = readings.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(gallons, acre_feet), (g, af)| {
                (gallons + g.unwrap_or_default(), acre_feet + af.unwrap_or_default())
            },
        );

        Self {
            allocation,
            total_gallons,
            total_acre_feet,
            allocation_remaining: allocation - total_acre_feet,
        }
    }
}
