//! Irrigation time calculator
//!
//! Turns a block's hydraulic attributes and a schedule's inputs into the
//! number of minutes the block must run. Two formulas exist:
//!
//! - blocks with crop x request a water depth in inches directly;
//! - all other blocks derive their demand from reference evapotranspiration,
//!   the crop coefficient, distribution uniformity and leaching requirement,
//!   sized per tree from the tree spacing and emitter output.
//!
//! A supplied `minutes_needed` always wins over either formula.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, CalculationResult};
use crate::models::{BlockParameters, CalculationBranch, IrrigationTiming, ScheduleInput};
use crate::types::resolve_numeric;

/// Gallons of water covering one acre to a depth of one inch
pub const GAL_PER_ACRE_INCH: Decimal = Decimal::from_parts(27154, 0, 0, false, 0);

/// Square feet in one acre
pub const SQ_FT_PER_ACRE: Decimal = Decimal::from_parts(43560, 0, 0, false, 0);

/// Fraction of ground shaded by canopy; fixed at full coverage
pub const CANOPY_COVERAGE: Decimal = Decimal::ONE;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// How a depth request is converted into gallons for crop-x blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthFormula {
    /// `inches * 27154 / gpm`: the block's flow is taken to serve one acre
    #[default]
    PerBlockFlow,
    /// `acreage * 27154 * inches / gpm`: scales the depth by the block's area
    AcreageScaled,
}

/// Intermediate values of the evapotranspiration formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvapotranspirationDemand {
    /// ET₀ × Kc
    pub et_crop: Decimal,
    /// Crop demand adjusted for distribution uniformity
    pub et_adjusted: Decimal,
    pub trees_per_acre: Decimal,
    /// Gallons per tree including the leaching requirement
    pub gallons_per_tree: Decimal,
    /// Run time per tree, rounded to hundredths of an hour
    pub hours_per_tree: Decimal,
}

impl EvapotranspirationDemand {
    pub fn minutes(&self) -> CalculationResult<Decimal> {
        multiply(self.hours_per_tree, MINUTES_PER_HOUR, "reference_evapotranspiration")
    }
}

/// Irrigation time calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct IrrigationCalculator {
    depth_formula: DepthFormula,
}

impl IrrigationCalculator {
    pub fn new(depth_formula: DepthFormula) -> Self {
        Self { depth_formula }
    }

    pub fn depth_formula(&self) -> DepthFormula {
        self.depth_formula
    }

    /// Minutes a block must run for the given schedule inputs
    pub fn compute_minutes(
        &self,
        block: &BlockParameters,
        input: &ScheduleInput,
    ) -> CalculationResult<Decimal> {
        if let Some(minutes) = resolve_numeric(&input.minutes_needed, "minutes_needed")? {
            if minutes.is_sign_negative() && !minutes.is_zero() {
                return Err(CalculationError::invalid_input(
                    "minutes_needed",
                    "cannot be negative",
                ));
            }
            return Ok(minutes);
        }

        match block.branch() {
            CalculationBranch::DepthRequest => self.depth_request_minutes(block, input),
            CalculationBranch::Evapotranspiration => {
                evapotranspiration_demand(block, input)?.minutes()
            }
        }
    }

    /// Minutes plus the hours derived from them
    pub fn compute_timing(
        &self,
        block: &BlockParameters,
        input: &ScheduleInput,
    ) -> CalculationResult<IrrigationTiming> {
        self.compute_minutes(block, input)
            .map(IrrigationTiming::from_minutes)
    }

    fn depth_request_minutes(
        &self,
        block: &BlockParameters,
        input: &ScheduleInput,
    ) -> CalculationResult<Decimal> {
        let inches = resolve_numeric(&input.inches_needed, "inches_needed")?.ok_or_else(|| {
            CalculationError::invalid_input("inches_needed", "required for crop x blocks")
        })?;

        let gallons = match self.depth_formula {
            DepthFormula::PerBlockFlow => multiply(inches, GAL_PER_ACRE_INCH, "inches_needed")?,
            DepthFormula::AcreageScaled => {
                if block.acreage.is_zero() {
                    return Err(CalculationError::invalid_input(
                        "acreage",
                        "must be nonzero to scale a depth request",
                    ));
                }
                let per_inch = multiply(block.acreage, GAL_PER_ACRE_INCH, "acreage")?;
                multiply(per_inch, inches, "inches_needed")?
            }
        };

        divide(gallons, block.gpm, "gpm")
    }
}

/// Minutes for a block using the per-block-flow depth formula
pub fn compute_minutes(block: &BlockParameters, input: &ScheduleInput) -> CalculationResult<Decimal> {
    IrrigationCalculator::default().compute_minutes(block, input)
}

/// Evaluate the evapotranspiration formula for a block.
///
/// Missing ET₀, Kc and leaching factor count as zero, missing tree spacing
/// and emitter output as one. A missing distribution uniformity is zero and
/// therefore fails as a division by zero.
pub fn evapotranspiration_demand(
    block: &BlockParameters,
    input: &ScheduleInput,
) -> CalculationResult<EvapotranspirationDemand> {
    let hundred = Decimal::ONE_HUNDRED;

    let et0 = resolve_numeric(
        &input.reference_evapotranspiration,
        "reference_evapotranspiration",
    )?
    .unwrap_or(Decimal::ZERO);
    let kc = block.et_crop_coefficient.unwrap_or(Decimal::ZERO);
    let du = resolve_numeric(&input.distribution_uniformity, "distribution_uniformity")?
        .unwrap_or(Decimal::ZERO)
        / hundred;
    let lr = resolve_numeric(&input.leaching_factor, "leaching_factor")?.unwrap_or(Decimal::ZERO)
        / hundred;
    let spacing = block.tree_spacing.unwrap_or(Decimal::ONE);
    let emitter_output = block.emitter_output.unwrap_or(Decimal::ONE);

    let et_crop = multiply(et0, kc, "et_crop_coefficient")?;
    let et_adjusted = divide(et_crop, du, "distribution_uniformity")?;

    let spacing_area = multiply(spacing, spacing, "tree_spacing")?;
    let trees_per_acre = divide(SQ_FT_PER_ACRE, spacing_area, "tree_spacing")?;

    let acre_inch_gallons = multiply(
        multiply(et_adjusted, GAL_PER_ACRE_INCH, "reference_evapotranspiration")?,
        CANOPY_COVERAGE,
        "reference_evapotranspiration",
    )?;
    let gallons_per_tree = multiply(
        divide(acre_inch_gallons, trees_per_acre, "tree_spacing")?,
        Decimal::ONE + lr,
        "leaching_factor",
    )?;

    if emitter_output.is_zero() {
        return Err(CalculationError::division_by_zero("emitter_output"));
    }
    let delivery = multiply(emitter_output, block.gpm, "gpm")?;
    let hours_per_tree = round_hundredths(
        divide(gallons_per_tree, delivery, "gpm")?,
        "reference_evapotranspiration",
    )?;

    Ok(EvapotranspirationDemand {
        et_crop,
        et_adjusted,
        trees_per_acre,
        gallons_per_tree,
        hours_per_tree,
    })
}

/// `round(100 * x) / 100`, ties to even on the integer step
pub fn round_hundredths(value: Decimal, field: &str) -> CalculationResult<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    let scaled = multiply(value, hundred, field)?;
    Ok(scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) / hundred)
}

pub(crate) fn divide(
    numerator: Decimal,
    denominator: Decimal,
    field: &str,
) -> CalculationResult<Decimal> {
    if denominator.is_zero() {
        return Err(CalculationError::division_by_zero(field));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalculationError::invalid_input(field, "result is out of range"))
}

pub(crate) fn multiply(left: Decimal, right: Decimal, field: &str) -> CalculationResult<Decimal> {
    left.checked_mul(right)
        .ok_or_else(|| CalculationError::invalid_input(field, "result is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn num(s: &str) -> Option<NumericInput> {
        Some(NumericInput::Number(dec(s)))
    }

    fn crop_x_block(gpm: &str) -> BlockParameters {
        BlockParameters {
            acreage: dec("1"),
            gpm: dec(gpm),
            tree_spacing: None,
            emitter_output: None,
            has_crop_x: true,
            et_crop_coefficient: None,
            water_quality: None,
            days_between_irrigations: None,
            interval_between_irrigations: None,
        }
    }

    fn et_block() -> BlockParameters {
        BlockParameters {
            acreage: dec("1"),
            gpm: dec("5"),
            tree_spacing: Some(dec("10")),
            emitter_output: Some(dec("2")),
            has_crop_x: false,
            et_crop_coefficient: Some(dec("0.8")),
            water_quality: None,
            days_between_irrigations: Some(7),
            interval_between_irrigations: None,
        }
    }

    fn et_input() -> ScheduleInput {
        ScheduleInput {
            reference_evapotranspiration: num("0.2"),
            distribution_uniformity: num("80"),
            leaching_factor: num("10"),
            ..Default::default()
        }
    }

    #[test]
    fn test_depth_request_one_inch() {
        let input = ScheduleInput {
            inches_needed: num("1"),
            ..Default::default()
        };
        let timing = IrrigationCalculator::default()
            .compute_timing(&crop_x_block("50"), &input)
            .unwrap();

        assert_eq!(timing.minutes_needed(), dec("543.08"));
        assert!((timing.hours_needed() - dec("9.0513")).abs() < dec("0.0001"));
    }

    #[test]
    fn test_depth_request_zero_gpm() {
        let input = ScheduleInput {
            inches_needed: num("1"),
            ..Default::default()
        };
        let err = compute_minutes(&crop_x_block("0"), &input).unwrap_err();
        assert_eq!(err, CalculationError::division_by_zero("gpm"));
    }

    #[test]
    fn test_depth_request_requires_inches() {
        let err = compute_minutes(&crop_x_block("50"), &ScheduleInput::default()).unwrap_err();
        assert_eq!(err.field(), Some("inches_needed"));
        assert!(matches!(err, CalculationError::InvalidInput { .. }));
    }

    #[test]
    fn test_acreage_scaled_depth_formula() {
        let mut block = crop_x_block("50");
        block.acreage = dec("2.5");
        let input = ScheduleInput {
            inches_needed: num("1"),
            ..Default::default()
        };
        let calculator = IrrigationCalculator::new(DepthFormula::AcreageScaled);

        assert_eq!(calculator.compute_minutes(&block, &input).unwrap(), dec("1357.7"));

        block.acreage = Decimal::ZERO;
        assert!(calculator.compute_minutes(&block, &input).is_err());
    }

    #[test]
    fn test_supplied_minutes_are_authoritative() {
        let input = ScheduleInput {
            minutes_needed: num("45"),
            inches_needed: num("3"),
            ..Default::default()
        };
        // gpm of zero would fail if the formula ran
        let timing = IrrigationCalculator::default()
            .compute_timing(&crop_x_block("0"), &input)
            .unwrap();
        assert_eq!(timing.minutes_needed(), dec("45"));
        assert_eq!(timing.hours_needed(), dec("0.75"));
    }

    #[test]
    fn test_negative_minutes_rejected() {
        let input = ScheduleInput {
            minutes_needed: num("-5"),
            ..Default::default()
        };
        assert!(compute_minutes(&crop_x_block("50"), &input).is_err());
    }

    #[test]
    fn test_evapotranspiration_golden_value() {
        let demand = evapotranspiration_demand(&et_block(), &et_input()).unwrap();

        assert_eq!(demand.et_crop, dec("0.16"));
        assert_eq!(demand.et_adjusted, dec("0.2"));
        assert_eq!(demand.trees_per_acre, dec("435.6"));
        assert_eq!(demand.hours_per_tree, dec("1.37"));
        assert_eq!(compute_minutes(&et_block(), &et_input()).unwrap(), dec("82.2"));
    }

    #[test]
    fn test_evapotranspiration_missing_du_is_division_by_zero() {
        let input = ScheduleInput {
            distribution_uniformity: None,
            ..et_input()
        };
        let err = compute_minutes(&et_block(), &input).unwrap_err();
        assert_eq!(err, CalculationError::division_by_zero("distribution_uniformity"));
    }

    #[test]
    fn test_evapotranspiration_zero_emitter_output() {
        let mut block = et_block();
        block.emitter_output = Some(Decimal::ZERO);
        let err = compute_minutes(&block, &et_input()).unwrap_err();
        assert_eq!(err, CalculationError::division_by_zero("emitter_output"));
    }

    #[test]
    fn test_evapotranspiration_zero_gpm() {
        let mut block = et_block();
        block.gpm = Decimal::ZERO;
        let err = compute_minutes(&block, &et_input()).unwrap_err();
        assert_eq!(err, CalculationError::division_by_zero("gpm"));
    }

    #[test]
    fn test_evapotranspiration_defaults_for_missing_block_fields() {
        let mut block = et_block();
        block.tree_spacing = None;
        block.emitter_output = None;
        block.et_crop_coefficient = None;

        // Kc defaults to zero so no water is needed
        assert_eq!(compute_minutes(&block, &et_input()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_input_is_not_defaulted() {
        let input = ScheduleInput {
            leaching_factor: Some(NumericInput::Text("ten".to_string())),
            ..et_input()
        };
        let err = compute_minutes(&et_block(), &input).unwrap_err();
        assert_eq!(err.field(), Some("leaching_factor"));
    }

    #[test]
    fn test_blank_input_uses_default() {
        let input = ScheduleInput {
            leaching_factor: Some(NumericInput::Text(String::new())),
            ..et_input()
        };
        // Without leaching: 12.4674.. gallons / 10 gph = 1.25 hours
        assert_eq!(compute_minutes(&et_block(), &input).unwrap(), dec("75"));
    }

    #[test]
    fn test_round_hundredths_ties_to_even() {
        let round = |s| round_hundredths(dec(s), "value").unwrap();
        assert_eq!(round("1.3714"), dec("1.37"));
        assert_eq!(round("0.125"), dec("0.12"));
        assert_eq!(round("0.135"), dec("0.14"));
    }

    #[test]
    fn test_round_hundredths_out_of_range() {
        let err = round_hundredths(Decimal::MAX, "value").unwrap_err();
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn test_huge_reference_evapotranspiration_is_out_of_range() {
        let block = BlockParameters {
            tree_spacing: Some(dec("100")),
            emitter_output: Some(dec("1")),
            gpm: dec("1"),
            et_crop_coefficient: Some(dec("1")),
            ..et_block()
        };
        let input = ScheduleInput {
            reference_evapotranspiration: num("1000000000000000000000000"),
            distribution_uniformity: num("100"),
            leaching_factor: None,
            ..Default::default()
        };

        let err = compute_minutes(&block, &input).unwrap_err();
        assert!(matches!(err, CalculationError::InvalidInput { .. }));
    }
}
