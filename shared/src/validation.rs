//! Validation utilities for the Ranch Irrigation Scheduler

use rust_decimal::Decimal;

use crate::models::BlockParameters;
use crate::types::DateRange;

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a display name (ranch, well, block, variety)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.len() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a ranch allocation in acre-feet
pub fn validate_allocation(allocation: Decimal) -> Result<(), &'static str> {
    if allocation < Decimal::ZERO {
        return Err("Allocation cannot be negative");
    }
    Ok(())
}

/// Validate an irrigation set number
pub fn validate_set_number(number: i32) -> Result<(), &'static str> {
    if number <= 0 {
        return Err("Set number must be positive");
    }
    Ok(())
}

/// Validate a well's rated flow
pub fn validate_well_gpm(gpm: Decimal) -> Result<(), &'static str> {
    if gpm < Decimal::ZERO {
        return Err("Well GPM cannot be negative");
    }
    Ok(())
}

/// Validate a percentage field (leaching factor, distribution uniformity)
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

// ============================================================================
// Block Validations
// ============================================================================

/// Validate block attributes, returning the offending field on failure
pub fn validate_block_parameters(
    block: &BlockParameters,
) -> Result<(), (&'static str, &'static str)> {
    if block.acreage <= Decimal::ZERO {
        return Err(("acreage", "Acreage must be positive"));
    }
    if block.gpm <= Decimal::ZERO {
        return Err(("gpm", "GPM must be positive"));
    }

    let optional = [
        ("tree_spacing", block.tree_spacing),
        ("emitter_output", block.emitter_output),
        ("et_crop_coefficient", block.et_crop_coefficient),
        ("water_quality", block.water_quality),
    ];
    for (field, value) in optional {
        if value.is_some_and(|v| v < Decimal::ZERO) {
            return Err((field, "Value cannot be negative"));
        }
    }

    let days = [
        ("days_between_irrigations", block.days_between_irrigations),
        ("interval_between_irrigations", block.interval_between_irrigations),
    ];
    for (field, value) in days {
        if value.is_some_and(|v| v < 0) {
            return Err((field, "Value cannot be negative"));
        }
    }

    Ok(())
}

// ============================================================================
// Query Validations
// ============================================================================

/// Validate that a date range runs forward
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.start > range.end {
        return Err("From date must not be after to date");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn block() -> BlockParameters {
        BlockParameters {
            acreage: Decimal::new(25, 1),
            gpm: Decimal::from(40),
            tree_spacing: Some(Decimal::from(20)),
            emitter_output: Some(Decimal::from(2)),
            has_crop_x: false,
            et_crop_coefficient: Some(Decimal::new(65, 2)),
            water_quality: None,
            days_between_irrigations: Some(7),
            interval_between_irrigations: None,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("North Ranch").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_allocation() {
        assert!(validate_allocation(Decimal::ZERO).is_ok());
        assert!(validate_allocation(Decimal::from(120)).is_ok());
        assert!(validate_allocation(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_set_number() {
        assert!(validate_set_number(1).is_ok());
        assert!(validate_set_number(0).is_err());
        assert!(validate_set_number(-3).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(Decimal::ZERO).is_ok());
        assert!(validate_percentage(Decimal::from(85)).is_ok());
        assert!(validate_percentage(Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_percentage(Decimal::from(101)).is_err());
        assert!(validate_percentage(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_block_parameters_valid() {
        assert!(validate_block_parameters(&block()).is_ok());
    }

    #[test]
    fn test_validate_block_zero_acreage() {
        let mut b = block();
        b.acreage = Decimal::ZERO;
        assert_eq!(validate_block_parameters(&b).unwrap_err().0, "acreage");
    }

    #[test]
    fn test_validate_block_zero_gpm() {
        let mut b = block();
        b.gpm = Decimal::ZERO;
        assert_eq!(validate_block_parameters(&b).unwrap_err().0, "gpm");
    }

    #[test]
    fn test_validate_block_negative_optional() {
        let mut b = block();
        b.tree_spacing = Some(Decimal::from(-20));
        assert_eq!(validate_block_parameters(&b).unwrap_err().0, "tree_spacing");

        let mut b = block();
        b.days_between_irrigations = Some(-1);
        assert_eq!(
            validate_block_parameters(&b).unwrap_err().0,
            "days_between_irrigations"
        );
    }

    #[test]
    fn test_validate_date_range() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
        assert!(validate_date_range(&DateRange::new(d(1), d(7))).is_ok());
        assert!(validate_date_range(&DateRange::new(d(7), d(7))).is_ok());
        assert!(validate_date_range(&DateRange::new(d(8), d(7))).is_err());
    }
}
