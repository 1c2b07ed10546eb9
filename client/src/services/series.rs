//! Series service: fetch, aggregate and fall back to demo data
//!
//! Network-shaped failures never surface to the caller. The service
//! substitutes the latitude-based demo series and tags the result as
//! [`Provenance::Demo`] instead.

use shared::{
    synthesize_demo, to_monthly, valid_readings, Coordinate, DateRange, MonthlySeries, ParamId,
    Provenance,
};
use std::collections::BTreeMap;

use crate::error::{ClientError, ClientResult};
use crate::fetcher::SeriesFetcher;

/// Monthly series per parameter
pub type MonthlyByParam = BTreeMap<ParamId, MonthlySeries>;

/// Aggregated series with demo fallback
#[derive(Clone)]
pub struct SeriesService {
    fetcher: SeriesFetcher,
    range: DateRange,
}

impl SeriesService {
    pub fn new(fetcher: SeriesFetcher, range: DateRange) -> Self {
        Self { fetcher, range }
    }

    /// Monthly series for every parameter, live when possible
    pub async fn monthly_series(
        &self,
        coordinate: Coordinate,
        params: &[ParamId],
    ) -> ClientResult<Provenance<MonthlyByParam>> {
        match self.live_monthly(coordinate, params).await {
            Ok(monthly) => Ok(Provenance::live(monthly)),
            Err(err) => {
                let reason = err.into_demo_reason()?;
                tracing::warn!(
                    "Using demo data for ({}, {}): {}",
                    coordinate.latitude(),
                    coordinate.longitude(),
                    reason
                );
                Ok(Provenance::demo(
                    synthesize_demo(coordinate.latitude(), params),
                    reason,
                ))
            }
        }
    }

    /// NDVI monthly series, live when possible
    pub async fn ndvi_series(&self, coordinate: Coordinate) -> ClientResult<Provenance<MonthlySeries>> {
        let result = self.monthly_series(coordinate, &[ParamId::Ndvi]).await?;
        Ok(result.map(|mut monthly| monthly.remove(&ParamId::Ndvi).unwrap_or_default()))
    }

    async fn live_monthly(
        &self,
        coordinate: Coordinate,
        params: &[ParamId],
    ) -> ClientResult<MonthlyByParam> {
        let daily = self.fetcher.fetch_daily(coordinate, params, self.range).await?;

        let mut monthly = BTreeMap::new();
        for (param, values) in daily {
            if valid_readings(&values).is_empty() {
                return Err(ClientError::EmptySeries(param));
            }
            monthly.insert(param, to_monthly(&values, param));
        }
        Ok(monthly)
    }
}
