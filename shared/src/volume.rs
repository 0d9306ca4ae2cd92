//! Gallons ↔ acre-feet conversion

use rust_decimal::Decimal;

use crate::error::{CalculationError, CalculationResult};
use crate::irrigation::{divide, multiply};
use crate::models::{BlockParameters, HistoryVolumes, MeterVolume};

/// Gallons recorded per acre-foot.
///
/// Kept at the value existing meter and history records were written with.
pub const GAL_PER_ACRE_FOOT: Decimal = Decimal::from_parts(27154, 0, 0, false, 0);

/// Fill in whichever volume field is missing.
///
/// When both are supplied they are returned untouched, even if they disagree.
pub fn convert_volume(
    gallons: Option<Decimal>,
    acre_feet: Option<Decimal>,
) -> CalculationResult<MeterVolume> {
    match (gallons, acre_feet) {
        (Some(gallons), Some(acre_feet)) => Ok(MeterVolume { gallons, acre_feet }),
        (Some(gallons), None) => Ok(MeterVolume {
            gallons,
            acre_feet: gallons_to_acre_feet(gallons)?,
        }),
        (None, Some(acre_feet)) => Ok(MeterVolume {
            gallons: acre_feet_to_gallons(acre_feet)?,
            acre_feet,
        }),
        (None, None) => Err(CalculationError::MissingVolume),
    }
}

pub fn gallons_to_acre_feet(gallons: Decimal) -> CalculationResult<Decimal> {
    divide(gallons, GAL_PER_ACRE_FOOT, "gallons")
}

pub fn acre_feet_to_gallons(acre_feet: Decimal) -> CalculationResult<Decimal> {
    multiply(acre_feet, GAL_PER_ACRE_FOOT, "acre_feet")
}

/// Water drawn by running a block for `minutes`
pub fn derive_history_volumes(
    block: &BlockParameters,
    minutes: Decimal,
) -> CalculationResult<HistoryVolumes> {
    let gallons_used = multiply(block.gpm, minutes, "minutes_needed")?;
    Ok(HistoryVolumes {
        gallons_used,
        acre_feet_used: gallons_to_acre_feet(gallons_used)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(gpm: i64) -> BlockParameters {
        BlockParameters {
            acreage: Decimal::ONE,
            gpm: Decimal::from(gpm),
            tree_spacing: None,
            emitter_output: None,
            has_crop_x: true,
            et_crop_coefficient: None,
            water_quality: None,
            days_between_irrigations: None,
            interval_between_irrigations: None,
        }
    }

    #[test]
    fn test_gallons_only() {
        let volume = convert_volume(Some(Decimal::from(27154)), None).unwrap();
        assert_eq!(volume.acre_feet, Decimal::ONE);
    }

    #[test]
    fn test_acre_feet_only() {
        let volume = convert_volume(None, Some(Decimal::new(5, 1))).unwrap();
        assert_eq!(volume.gallons, Decimal::from(13577));
    }

    #[test]
    fn test_both_left_untouched() {
        let volume = convert_volume(Some(Decimal::from(10)), Some(Decimal::from(10))).unwrap();
        assert_eq!(volume.gallons, Decimal::from(10));
        assert_eq!(volume.acre_feet, Decimal::from(10));
    }

    #[test]
    fn test_neither_is_missing_volume() {
        assert_eq!(convert_volume(None, None), Err(CalculationError::MissingVolume));
    }

    #[test]
    fn test_zero_counts_as_present() {
        let volume = convert_volume(Some(Decimal::ZERO), None).unwrap();
        assert_eq!(volume.acre_feet, Decimal::ZERO);
    }

    #[test]
    fn test_history_volumes() {
        let volumes = derive_history_volumes(&block(50), Decimal::new(54308, 2)).unwrap();
        assert_eq!(volumes.gallons_used, Decimal::from(27154));
        assert_eq!(volumes.acre_feet_used, Decimal::ONE);
    }
}
