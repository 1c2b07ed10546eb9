//! Series aggregation: daily readings to monthly buckets and seasonal means
//!
//! All functions here are pure. The bucket partition is a fixed 10-way split
//! of the valid readings; when the valid count is not a multiple of 10 the
//! trailing remainder is dropped. Downstream numbers depend on this, so it
//! must stay as is.

use std::collections::BTreeMap;

use crate::models::{DailyValue, MonthlySeries, ParamId, Season, BUCKET_COUNT};

/// Seasonal temperature shape (°C offset from the latitude base)
const DEMO_TEMPERATURE: [f64; BUCKET_COUNT] = [0.0, 2.0, 10.0, 15.0, 20.0, 25.0, 28.0, 25.0, 18.0, 10.0];

/// Seasonal relative humidity (%)
const DEMO_HUMIDITY: [f64; BUCKET_COUNT] = [70.0, 65.0, 60.0, 55.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0];

/// Seasonal precipitation (mm/day)
const DEMO_PRECIPITATION: [f64; BUCKET_COUNT] =
    [50.0, 40.0, 60.0, 70.0, 80.0, 90.0, 100.0, 90.0, 70.0, 60.0];

/// Seasonal wind speed (m/s)
const DEMO_WIND: [f64; BUCKET_COUNT] = [3.0, 4.0, 5.0, 4.0, 3.0, 3.0, 4.0, 5.0, 4.0, 3.0];

/// Seasonal NDVI shape, scaled by the latitude base
const DEMO_NDVI: [f64; BUCKET_COUNT] = [0.2, 0.25, 0.4, 0.6, 0.8, 0.85, 0.8, 0.7, 0.5, 0.3];

/// Southern-hemisphere damping of the demo NDVI shape
const SOUTHERN_NDVI_FACTOR: f64 = 0.9;

/// Valid readings in order, with every missing marker removed
pub fn valid_readings(daily: &[DailyValue]) -> Vec<f64> {
    daily.iter().filter_map(DailyValue::valid).collect()
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Reduce a daily series to 10 buckets.
///
/// `bucket_size = valid / 10` (truncating). With fewer than 10 valid readings
/// every bucket is 0. Vegetation-index buckets are clamped to [0,1].
pub fn to_monthly(daily: &[DailyValue], param: ParamId) -> MonthlySeries {
    let valid = valid_readings(daily);
    let bucket_size = valid.len() / BUCKET_COUNT;

    let mut buckets = [0.0; BUCKET_COUNT];
    for (i, bucket) in buckets.iter_mut().enumerate() {
        let avg = mean(&valid[i * bucket_size..(i + 1) * bucket_size]);
        *bucket = if param.is_vegetation_index() {
            clamp_unit(avg)
        } else {
            avg
        };
    }

    MonthlySeries::new(buckets)
}

/// Mean of the buckets belonging to `season`. No clamping.
pub fn to_seasonal(monthly: &MonthlySeries, season: Season) -> f64 {
    let indices = season.indices();
    let total: f64 = indices.iter().map(|&i| monthly[i]).sum();
    total / indices.len() as f64
}

/// Seasonal average for every parameter, in parameter order
pub fn seasonal_averages(
    monthly: &BTreeMap<ParamId, MonthlySeries>,
    season: Season,
) -> Vec<(ParamId, f64)> {
    monthly
        .iter()
        .map(|(param, series)| (*param, to_seasonal(series, season)))
        .collect()
}

/// Deterministic stand-in series used when live data is unavailable.
///
/// A heuristic, not a model: temperature is shifted by `15 - |lat|/3`,
/// humidity/precipitation/wind are fixed shapes, and NDVI is a fixed shape
/// scaled by `clamp(0.8 - |lat - 45|/30, 0.1, 1)`.
pub fn synthesize_demo(latitude: f64, params: &[ParamId]) -> BTreeMap<ParamId, MonthlySeries> {
    params
        .iter()
        .map(|&param| (param, demo_series(latitude, param)))
        .collect()
}

fn demo_series(latitude: f64, param: ParamId) -> MonthlySeries {
    match param {
        ParamId::T2m => {
            let base_temp = 15.0 - latitude.abs() / 3.0;
            MonthlySeries::new(DEMO_TEMPERATURE.map(|v| v + base_temp))
        }
        ParamId::Rh2m => MonthlySeries::new(DEMO_HUMIDITY),
        ParamId::PrecTotCorr => MonthlySeries::new(DEMO_PRECIPITATION),
        ParamId::Ws10m => MonthlySeries::new(DEMO_WIND),
        ParamId::Ndvi => demo_ndvi(latitude),
    }
}

fn demo_ndvi(latitude: f64) -> MonthlySeries {
    let base = (0.8 - (latitude - 45.0).abs() / 30.0).clamp(0.1, 1.0);
    let hemisphere = if latitude > 0.0 {
        1.0
    } else {
        SOUTHERN_NDVI_FACTOR
    };
    MonthlySeries::new(DEMO_NDVI.map(|v| clamp_unit(v * base * hemisphere)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamFamily;

    fn daily(values: &[f64]) -> Vec<DailyValue> {
        values.iter().copied().map(DailyValue::reading).collect()
    }

    #[test]
    fn test_sentinels_dropped_before_bucketing() {
        let input = daily(&[5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, -9999.0, -9999.0]);
        let monthly = to_monthly(&input, ParamId::T2m);
        assert_eq!(monthly.values(), &[5.0; BUCKET_COUNT]);
    }

    #[test]
    fn test_empty_input_is_all_zeros() {
        assert_eq!(to_monthly(&[], ParamId::Ndvi).values(), &[0.0; BUCKET_COUNT]);
        let missing = vec![DailyValue::missing(); 30];
        assert_eq!(to_monthly(&missing, ParamId::T2m).values(), &[0.0; BUCKET_COUNT]);
    }

    #[test]
    fn test_fewer_than_ten_valid_is_all_zeros() {
        let input = daily(&[1.0, 2.0, 3.0]);
        assert_eq!(to_monthly(&input, ParamId::T2m).values(), &[0.0; BUCKET_COUNT]);
    }

    #[test]
    fn test_remainder_days_dropped() {
        // 23 valid readings: bucket size 2, the last 3 readings are ignored
        let mut values: Vec<f64> = (0..20).map(|i| (i / 2) as f64).collect();
        values.extend([100.0, 100.0, 100.0]);
        let monthly = to_monthly(&daily(&values), ParamId::Ws10m);
        assert_eq!(monthly[0], 0.0);
        assert_eq!(monthly[9], 9.0);
    }

    #[test]
    fn test_vegetation_clamped_climate_not() {
        let input = daily(&[1.5; 10]);
        assert_eq!(to_monthly(&input, ParamId::Ndvi)[0], 1.0);
        assert_eq!(to_monthly(&input, ParamId::PrecTotCorr)[0], 1.5);

        let negative = daily(&[-0.5; 10]);
        assert_eq!(to_monthly(&negative, ParamId::Ndvi)[3], 0.0);
        assert_eq!(to_monthly(&negative, ParamId::T2m)[3], -0.5);
    }

    #[test]
    fn test_seasonal_means() {
        let monthly = MonthlySeries::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(to_seasonal(&monthly, Season::Winter), 1.5);
        assert_eq!(to_seasonal(&monthly, Season::Spring), 4.0);
        assert_eq!(to_seasonal(&monthly, Season::Summer), 7.0);
        assert_eq!(to_seasonal(&monthly, Season::Autumn), 9.5);
    }

    #[test]
    fn test_demo_ndvi_at_45_north() {
        let demo = synthesize_demo(45.0, &[ParamId::Ndvi]);
        let ndvi = demo[&ParamId::Ndvi];
        assert_eq!(ndvi[0], 0.2 * 0.8);
        assert!((ndvi[0] - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_demo_ndvi_southern_factor() {
        let north = synthesize_demo(15.0, &[ParamId::Ndvi])[&ParamId::Ndvi];
        let south = synthesize_demo(-15.0, &[ParamId::Ndvi])[&ParamId::Ndvi];
        // base at 15N = 0.8 - 1.0 = clamped 0.1; at 15S also clamped 0.1
        assert_eq!(north[5], 0.85 * 0.1);
        assert_eq!(south[5], 0.85 * 0.1 * 0.9);
    }

    #[test]
    fn test_demo_ndvi_equator_gets_southern_factor() {
        let equator = synthesize_demo(0.0, &[ParamId::Ndvi])[&ParamId::Ndvi];
        assert_eq!(equator[0], 0.2 * 0.1 * 0.9);
    }

    #[test]
    fn test_demo_climate_tables() {
        let demo = synthesize_demo(-30.0, ParamFamily::Climate.params());
        assert_eq!(demo[&ParamId::T2m][0], 5.0);
        assert_eq!(demo[&ParamId::T2m][6], 33.0);
        assert_eq!(demo[&ParamId::Rh2m].values(), &DEMO_HUMIDITY);
        assert_eq!(demo[&ParamId::PrecTotCorr].values(), &DEMO_PRECIPITATION);
        assert_eq!(demo[&ParamId::Ws10m].values(), &DEMO_WIND);
        assert!(!demo.contains_key(&ParamId::Ndvi));
    }

    #[test]
    fn test_seasonal_averages_in_param_order() {
        let demo = synthesize_demo(45.0, &[ParamId::Ws10m, ParamId::T2m]);
        let averages = seasonal_averages(&demo, Season::Winter);
        assert_eq!(averages[0].0, ParamId::T2m);
        assert_eq!(averages[1], (ParamId::Ws10m, 3.5));
    }
}
