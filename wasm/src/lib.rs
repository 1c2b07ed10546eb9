//! WebAssembly module for Bloom Climate
//!
//! Provides browser-side computation for:
//! - Monthly aggregation of daily series
//! - Seasonal averages
//! - Demo series when the relay is unreachable
//! - Marker colours and CSV export of saved locations

use shared::{
    parse_coordinates, synthesize_demo, to_monthly, to_seasonal, DailyValue, MarkerTier,
    MonthlySeries, ParamId, SavedLocation, Season, BUCKET_COUNT,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("bloom-climate wasm loaded"));
}

/// Aggregate a JSON array of daily values (`number|null`) into 10 buckets
#[wasm_bindgen]
pub fn monthly_from_daily(daily_json: &str, param: &str) -> Result<Vec<f64>, JsValue> {
    monthly_values(daily_json, param).map_err(|e| JsValue::from_str(&e))
}

/// Mean of a 10-bucket series over a season (winter, spring, summer, autumn)
#[wasm_bindgen]
pub fn seasonal_average(monthly: &[f64], season: &str) -> Result<f64, JsValue> {
    season_mean(monthly, season).map_err(|e| JsValue::from_str(&e))
}

/// Deterministic demo series for a latitude
#[wasm_bindgen]
pub fn demo_series(latitude: f64, param: &str) -> Result<Vec<f64>, JsValue> {
    demo_values(latitude, param).map_err(|e| JsValue::from_str(&e))
}

/// Marker fill colour for the latest NDVI bucket
#[wasm_bindgen]
pub fn marker_color(latest_ndvi: f64) -> String {
    MarkerTier::from_ndvi(latest_ndvi).color().to_string()
}

/// Check raw form input (lat: -90..90, lon: -180..180)
#[wasm_bindgen]
pub fn is_valid_coordinate(latitude: &str, longitude: &str) -> bool {
    parse_coordinates(latitude, longitude).is_ok()
}

/// CSV export of a JSON array of saved locations
#[wasm_bindgen]
pub fn export_csv(locations_json: &str) -> Result<String, JsValue> {
    csv_from_json(locations_json).map_err(|e| JsValue::from_str(&e))
}

fn monthly_values(daily_json: &str, param: &str) -> Result<Vec<f64>, String> {
    let param: ParamId = param.parse().map_err(|e| format!("{}", e))?;
    let daily: Vec<DailyValue> = serde_json::from_str(daily_json)
        .map_err(|e| format!("Invalid daily JSON: {}", e))?;
    Ok(to_monthly(&daily, param).values().to_vec())
}

fn season_mean(monthly: &[f64], season: &str) -> Result<f64, String> {
    let season: Season = season.parse().map_err(|e| format!("{}", e))?;
    let values: [f64; BUCKET_COUNT] = monthly.try_into().map_err(|_| {
        format!("Expected {} monthly values, got {}", BUCKET_COUNT, monthly.len())
    })?;
    Ok(to_seasonal(&MonthlySeries::new(values), season))
}

fn demo_values(latitude: f64, param: &str) -> Result<Vec<f64>, String> {
    let param: ParamId = param.parse().map_err(|e| format!("{}", e))?;
    let demo = synthesize_demo(latitude, &[param]);
    Ok(demo
        .get(&param)
        .map(|series| series.values().to_vec())
        .unwrap_or_default())
}

fn csv_from_json(locations_json: &str) -> Result<String, String> {
    let locations: Vec<SavedLocation> = serde_json::from_str(locations_json)
        .map_err(|e| format!("Invalid locations JSON: {}", e))?;
    shared::export_locations_csv(&locations).map_err(|e| e.to_string())
}
