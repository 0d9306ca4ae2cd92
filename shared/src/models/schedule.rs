//! Irrigation schedule models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::NumericInput;

/// A stored schedule for one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationSchedule {
    pub id: Uuid,
    pub block_id: Uuid,
    pub well_id: Option<Uuid>,
    pub timing: IrrigationTiming,
    pub inches_needed: Option<Decimal>,
    pub leaching_factor: Option<Decimal>,
    pub reference_evapotranspiration: Option<Decimal>,
    pub distribution_uniformity: Option<Decimal>,
    pub fertilized: bool,
    pub fertilization_details: Option<String>,
}

/// Calculator inputs of a schedule as submitted.
///
/// Any field may be missing; non-numeric values are rejected when the
/// calculator resolves them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub minutes_needed: Option<NumericInput>,
    pub inches_needed: Option<NumericInput>,
    /// Leaching requirement in percent
    pub leaching_factor: Option<NumericInput>,
    /// Reference evapotranspiration (ET₀)
    pub reference_evapotranspiration: Option<NumericInput>,
    /// Distribution uniformity in percent
    pub distribution_uniformity: Option<NumericInput>,
}

/// Irrigation duration. Hours are always derived from minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TimingRecord")]
pub struct IrrigationTiming {
    minutes_needed: Decimal,
    hours_needed: Decimal,
}

#[derive(Deserialize)]
struct TimingRecord {
    minutes_needed: Decimal,
}

impl From<TimingRecord> for IrrigationTiming {
    fn from(record: TimingRecord) -> Self {
        IrrigationTiming::from_minutes(record.minutes_needed)
    }
}

impl IrrigationTiming {
    pub fn from_minutes(minutes_needed: Decimal) -> Self {
        Self {
            minutes_needed,
            hours_needed: minutes_needed / Decimal::from(60),
        }
    }

    pub fn minutes_needed(&self) -> Decimal {
        self.minutes_needed
    }

    pub fn hours_needed(&self) -> Decimal {
        self.hours_needed
    }
}

/// Fertilization details attached to a schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizationInfo {
    pub fertilized: bool,
    pub details: Option<String>,
}

impl FertilizationInfo {
    /// Details are only reported for fertilized schedules
    pub fn new(fertilized: bool, details: Option<String>) -> Self {
        Self {
            fertilized,
            details: if fertilized { details } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_derived_from_minutes() {
        let timing = IrrigationTiming::from_minutes(Decimal::from(90));
        assert_eq!(timing.hours_needed(), Decimal::new(15, 1));
    }

    #[test]
    fn test_deserialized_hours_are_recomputed() {
        let timing: IrrigationTiming =
            serde_json::from_str(r#"{"minutes_needed": "120", "hours_needed": "7"}"#).unwrap();
        assert_eq!(timing.hours_needed(), Decimal::from(2));
    }

    #[test]
    fn test_unfertilized_drops_details() {
        let info = FertilizationInfo::new(false, Some("UAN 32".to_string()));
        assert_eq!(info.details, None);

        let info = FertilizationInfo::new(true, Some("UAN 32".to_string()));
        assert_eq!(info.details.as_deref(), Some("UAN 32"));
    }
}
