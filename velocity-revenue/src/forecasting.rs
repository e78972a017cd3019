use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;
use velocity_shared::{DemandForecast, RoomType};
use velocity_store::app_config::ForecastingConfig;

use crate::aggregation::{DailyDemandPoint, DemandSeries};
use crate::regression::LinearTrend;
use crate::round2;

/// Model output for one day before seasonality and rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendProjection {
    pub demand: f64,
    pub rate: f64,
}

/// Projects demand and ADR per room type from its daily history
pub struct DemandForecaster {
    config: ForecastingConfig,
}

impl DemandForecaster {
    pub fn new(config: ForecastingConfig) -> Self {
        Self { config }
    }

    /// Multiplier applied on Saturdays and Sundays
    pub fn seasonality(&self, date: DateTime<Utc>) -> f64 {
        if date.weekday().num_days_from_monday() >= 5 {
            self.config.weekend_multiplier
        } else {
            1.0
        }
    }

    /// Linear decay from the starting confidence, never below the floor
    pub fn confidence(&self, offset: u32) -> f64 {
        (self.config.confidence_start - self.config.confidence_decay * offset as f64)
            .max(self.config.confidence_floor)
    }

    /// Fit both trend lines for one room type and evaluate them past the
    /// end of the observed series, clamped to the demand and rate floors.
    pub fn project(&self, points: &[DailyDemandPoint], days_ahead: u32) -> Vec<TrendProjection> {
        let demand: Vec<f64> = points.iter().map(|p| p.demand as f64).collect();
        let rates: Vec<f64> = points.iter().map(|p| p.avg_rate).collect();

        let demand_model = LinearTrend::fit(&demand);
        let rate_model = LinearTrend::fit(&rates);

        (0..days_ahead)
            .map(|offset| {
                let x = (points.len() + offset as usize) as f64;
                TrendProjection {
                    demand: demand_model.predict(x).max(0.0),
                    rate: rate_model.predict(x).max(self.config.min_rate),
                }
            })
            .collect()
    }

    /// Produce the forecast batch for a hotel. Room types with fewer than the
    /// minimum number of daily points are skipped without error.
    pub fn forecast(
        &self,
        hotel_id: Uuid,
        series: &DemandSeries,
        now: DateTime<Utc>,
        days_ahead: u32,
    ) -> Vec<DemandForecast> {
        let mut forecasts = Vec::new();

        for room_type in RoomType::ALL {
            let points = match series.get(&room_type) {
                Some(points) if points.len() >= self.config.min_series_points => points,
                other => {
                    debug!(
                        "Skipping {} for hotel {}: {} daily points",
                        room_type,
                        hotel_id,
                        other.map_or(0, |p| p.len())
                    );
                    continue;
                }
            };

            for (offset, projection) in self.project(points, days_ahead).into_iter().enumerate() {
                let offset = offset as u32;
                let Some(date) = now.checked_add_signed(Duration::days(offset as i64)) else {
                    break;
                };
                let multiplier = self.seasonality(date);

                forecasts.push(DemandForecast::new(
                    hotel_id,
                    date,
                    room_type,
                    round2(projection.demand * multiplier),
                    round2(projection.rate * multiplier),
                    self.confidence(offset),
                    now,
                ));
            }
        }

        info!("Generated {} demand forecasts for hotel {}", forecasts.len(), hotel_id);
        forecasts
    }
}
