//! WebAssembly module for the Ranch Irrigation Scheduler
//!
//! Runs the irrigation calculator in the browser so schedule forms can show
//! run times and water use before anything is submitted. Numbers cross the
//! boundary as decimal strings and results as JSON.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::{
    convert_volume, derive_history_volumes, resolve_numeric, BlockParameters, CalculationError,
    DepthFormula, IrrigationCalculator, NumericInput, ScheduleInput,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Irrigation timing for a block as JSON `{minutes_needed, hours_needed}`.
///
/// `depth_formula` is `"per_block_flow"` or `"acreage_scaled"` and should
/// match the server's setting; `undefined` uses `per_block_flow`.
#[wasm_bindgen]
pub fn calculate_irrigation_minutes(
    block_json: &str,
    schedule_json: &str,
    depth_formula: Option<String>,
) -> Result<String, JsValue> {
    irrigation_timing_json(block_json, schedule_json, depth_formula.as_deref()).map_err(to_js_error)
}

/// Fill in the missing volume of a meter reading; pass `undefined` for the unknown one
#[wasm_bindgen]
pub fn convert_meter_volume(
    gallons: Option<String>,
    acre_feet: Option<String>,
) -> Result<String, JsValue> {
    meter_volume_json(gallons.as_deref(), acre_feet.as_deref()).map_err(to_js_error)
}

/// Gallons and acre-feet drawn by running at `gpm` for `minutes`
#[wasm_bindgen]
pub fn calculate_history_volumes(gpm: &str, minutes: &str) -> Result<String, JsValue> {
    history_volumes_json(gpm, minutes).map_err(to_js_error)
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn irrigation_timing_json(
    block_json: &str,
    schedule_json: &str,
    depth_formula: Option<&str>,
) -> Result<String, String> {
    let depth_formula = parse_depth_formula(depth_formula)?;
    let block: BlockParameters =
        serde_json::from_str(block_json).map_err(|e| format!("Invalid block JSON: {}", e))?;
    let schedule: ScheduleInput = serde_json::from_str(schedule_json)
        .map_err(|e| format!("Invalid schedule JSON: {}", e))?;

    let timing = IrrigationCalculator::new(depth_formula)
        .compute_timing(&block, &schedule)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&timing).map_err(|e| e.to_string())
}

fn parse_depth_formula(value: Option<&str>) -> Result<DepthFormula, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(DepthFormula::default()),
        Some(name) => serde_json::from_value(serde_json::Value::String(name.to_string()))
            .map_err(|_| format!("Unknown depth formula: {}", name)),
    }
}

fn meter_volume_json(gallons: Option<&str>, acre_feet: Option<&str>) -> Result<String, String> {
    let gallons = parse_optional(gallons, "gallons")?;
    let acre_feet = parse_optional(acre_feet, "acre_feet")?;

    let volume = convert_volume(gallons, acre_feet).map_err(|e| e.to_string())?;
    serde_json::to_string(&volume).map_err(|e| e.to_string())
}

fn history_volumes_json(gpm: &str, minutes: &str) -> Result<String, String> {
    let gpm = parse_required(gpm, "gpm")?;
    let minutes = parse_required(minutes, "minutes_needed")?;

    // Only the flow matters for volume
    let block = BlockParameters {
        acreage: Decimal::ONE,
        gpm,
        tree_spacing: None,
        emitter_output: None,
        has_crop_x: true,
        et_crop_coefficient: None,
        water_quality: None,
        days_between_irrigations: None,
        interval_between_irrigations: None,
    };

    let volumes = derive_history_volumes(&block, minutes).map_err(|e| e.to_string())?;
    serde_json::to_string(&volumes).map_err(|e| e.to_string())
}

fn parse_optional(value: Option<&str>, field: &str) -> Result<Option<Decimal>, String> {
    let input = value.map(|text| NumericInput::Text(text.to_string()));
    resolve_numeric(&input, field).map_err(|e| e.to_string())
}

fn parse_required(value: &str, field: &str) -> Result<Decimal, String> {
    parse_optional(Some(value), field)?
        .ok_or_else(|| CalculationError::invalid_input(field, "is required").to_string())
}
