//! Irrigation block models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Agronomic and hydraulic attributes of a block used by the calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockParameters {
    /// Block area in acres
    pub acreage: Decimal,
    /// Rated flow in gallons per minute
    pub gpm: Decimal,
    /// Tree spacing in feet
    pub tree_spacing: Option<Decimal>,
    /// Emitter output in gallons per hour
    pub emitter_output: Option<Decimal>,
    /// Selects the depth-request branch when set
    #[serde(default = "default_has_crop_x")]
    pub has_crop_x: bool,
    pub et_crop_coefficient: Option<Decimal>,
    pub water_quality: Option<Decimal>,
    pub days_between_irrigations: Option<i32>,
    pub interval_between_irrigations: Option<i32>,
}

fn default_has_crop_x() -> bool {
    true
}

/// Which formula the calculator applies to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationBranch {
    /// Water depth requested directly in inches
    DepthRequest,
    /// Evapotranspiration-based demand
    Evapotranspiration,
}

/// Scheduling hint carried onto history records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingHint {
    pub days_between_irrigations: Option<i32>,
    pub interval_between_irrigations: Option<i32>,
}

impl BlockParameters {
    pub fn branch(&self) -> CalculationBranch {
        if self.has_crop_x {
            CalculationBranch::DepthRequest
        } else {
            CalculationBranch::Evapotranspiration
        }
    }

    /// Crop-x blocks are scheduled by interval, ET blocks by days between irrigations
    pub fn scheduling_hint(&self) -> SchedulingHint {
        match self.branch() {
            CalculationBranch::DepthRequest => SchedulingHint {
                days_between_irrigations: None,
                interval_between_irrigations: self.interval_between_irrigations,
            },
            CalculationBranch::Evapotranspiration => SchedulingHint {
                days_between_irrigations: self.days_between_irrigations,
                interval_between_irrigations: None,
            },
        }
    }
}
