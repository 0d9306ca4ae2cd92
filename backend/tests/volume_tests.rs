//! Tests for gallons / acre-feet conversion and history volumes

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    convert_volume, derive_history_volumes, AllocationStatus, BlockParameters, CalculationError,
    GAL_PER_ACRE_FOOT,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn block(gpm: Decimal) -> BlockParameters {
    BlockParameters {
        acreage: dec("2.5"),
        gpm,
        tree_spacing: None,
        emitter_output: None,
        has_crop_x: true,
        et_crop_coefficient: None,
        water_quality: None,
        days_between_irrigations: None,
        interval_between_irrigations: None,
    }
}

mod meter_readings {
    use super::*;

    #[test]
    fn gallons_fill_acre_feet() {
        let volume = convert_volume(Some(dec("27154")), None).unwrap();
        assert_eq!(volume.acre_feet, dec("1.00"));
    }

    #[test]
    fn acre_feet_fill_gallons() {
        let volume = convert_volume(None, Some(dec("0.5"))).unwrap();
        assert_eq!(volume.gallons, dec("13577"));
    }

    #[test]
    fn both_values_kept_as_given() {
        let volume = convert_volume(Some(dec("100")), Some(dec("9"))).unwrap();
        assert_eq!(volume.gallons, dec("100"));
        assert_eq!(volume.acre_feet, dec("9"));
    }

    #[test]
    fn neither_value_is_an_error() {
        assert_eq!(convert_volume(None, None), Err(CalculationError::MissingVolume));
    }

    #[test]
    fn readings_count_against_allocation() {
        let readings = [Some(dec("27154")), Some(dec("54308"))]
            .into_iter()
            .map(|gallons| convert_volume(gallons, None).unwrap())
            .map(|v| (Some(v.gallons), Some(v.acre_feet)));

        let status = AllocationStatus::from_readings(dec("10"), readings);
        assert_eq!(status.total_acre_feet, dec("3"));
        assert_eq!(status.allocation_remaining, dec("7"));
    }
}

mod history_volumes {
    use super::*;

    #[test]
    fn one_acre_inch_at_fifty_gpm() {
        let volumes = derive_history_volumes(&block(dec("50")), dec("543.08")).unwrap();

        assert_eq!(volumes.gallons_used, dec("27154"));
        assert_eq!(volumes.acre_feet_used, dec("1"));
    }

    #[test]
    fn zero_minutes_use_no_water() {
        let volumes = derive_history_volumes(&block(dec("50")), Decimal::ZERO).unwrap();

        assert_eq!(volumes.gallons_used, Decimal::ZERO);
        assert_eq!(volumes.acre_feet_used, Decimal::ZERO);
    }
}

mod properties {
    use super::*;

    fn gallons_strategy() -> impl Strategy<Value = Decimal> {
        (0u64..=1_000_000_000u64).prop_map(|v| Decimal::from(v) / Decimal::from(100))
    }

    proptest! {
        /// Converting gallons to acre-feet and back lands on the same volume
        #[test]
        fn prop_gallons_roundtrip(gallons in gallons_strategy()) {
            let acre_feet = convert_volume(Some(gallons), None).unwrap().acre_feet;
            let back = convert_volume(None, Some(acre_feet)).unwrap().gallons;

            prop_assert!((back - gallons).abs() < dec("0.000001"));
        }

        /// History volumes are flow times duration, then gallons per acre-foot
        #[test]
        fn prop_history_volumes(
            gpm in (1u32..=5000u32).prop_map(Decimal::from),
            minutes in (0u32..=100_000u32).prop_map(|v| Decimal::from(v) / Decimal::from(100)),
        ) {
            let volumes = derive_history_volumes(&block(gpm), minutes).unwrap();

            prop_assert_eq!(volumes.gallons_used, gpm * minutes);
            prop_assert_eq!(volumes.acre_feet_used, volumes.gallons_used / GAL_PER_ACRE_FOOT);
        }
    }
}
