//! Water meter reading models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A usage sample for a ranch, optionally tied to a well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterMeterReading {
    pub id: Uuid,
    pub ranch_id: Uuid,
    pub well_id: Option<Uuid>,
    pub date: NaiveDate,
    pub gallons: Option<Decimal>,
    pub acre_feet: Option<Decimal>,
}

/// Both volume fields of a reading after conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterVolume {
    pub gallons: Decimal,
    pub acre_feet: Decimal,
}
