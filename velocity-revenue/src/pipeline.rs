use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;
use velocity_core::repository::Repositories;
use velocity_core::{check_horizon, DateWindow, RevenueError, RevenueResult};
use velocity_shared::{DemandForecast, Hotel, InventoryAllocation, RateRecommendation};
use velocity_store::app_config::{AllocationConfig, ForecastingConfig, RateConfig};

use crate::aggregation::HistoryAggregator;
use crate::allocation::ChannelAllocator;
use crate::analytics::RevenueDashboard;
use crate::forecasting::DemandForecaster;
use crate::pricing::RateOptimizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Forecast,
    Allocation,
    RateOptimization,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Forecast => "forecast",
            PipelineStage::Allocation => "allocation",
            PipelineStage::RateOptimization => "rate_optimization",
        };
        f.write_str(name)
    }
}

/// What one stage run appended to storage
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<T> {
    pub stage: PipelineStage,
    pub hotel_id: Uuid,
    pub produced: Vec<T>,
}

impl<T> RunSummary<T> {
    pub fn count(&self) -> usize {
        self.produced.len()
    }

    pub fn message(&self) -> String {
        match self.stage {
            PipelineStage::Forecast => format!("Generated {} demand forecasts", self.count()),
            PipelineStage::Allocation => {
                format!("Optimized inventory allocation for {} entries", self.count())
            }
            PipelineStage::RateOptimization => {
                format!("Generated {} rate recommendations", self.count())
            }
        }
    }
}

/// Runs the revenue stages for one hotel at a time over the shared
/// repositories. Every run takes its reference time from the caller and
/// only appends; nothing is updated or removed.
pub struct RevenuePipeline {
    repos: Repositories,
    aggregator: HistoryAggregator,
    forecaster: DemandForecaster,
    allocator: ChannelAllocator,
    optimizer: RateOptimizer,
    forecast_days: u32,
    allocation_days: u32,
    rate_days: u32,
}

impl RevenuePipeline {
    pub fn new(
        repos: Repositories,
        forecasting: ForecastingConfig,
        allocation: AllocationConfig,
        rates: RateConfig,
    ) -> Self {
        Self {
            repos,
            aggregator: HistoryAggregator::new(&forecasting),
            forecast_days: forecasting.default_days_ahead,
            forecaster: DemandForecaster::new(forecasting),
            allocator: ChannelAllocator::default(),
            allocation_days: allocation.default_days_ahead,
            rate_days: rates.default_days_ahead,
            optimizer: RateOptimizer::new(rates),
        }
    }

    pub fn default_forecast_days(&self) -> u32 {
        self.forecast_days
    }

    pub fn default_allocation_days(&self) -> u32 {
        self.allocation_days
    }

    pub fn default_rate_days(&self) -> u32 {
        self.rate_days
    }

    pub async fn require_hotel(&self, hotel_id: Uuid) -> RevenueResult<Hotel> {
        self.repos
            .hotels
            .get_hotel(hotel_id)
            .await?
            .ok_or(RevenueError::HotelNotFound(hotel_id))
    }

    async fn forecasts_ahead(
        &self,
        hotel_id: Uuid,
        now: DateTime<Utc>,
        days_ahead: u32,
    ) -> RevenueResult<Vec<DemandForecast>> {
        let window = DateWindow::ahead(now, days_ahead)?;
        let forecasts = self.repos.forecasts.forecasts_in_window(hotel_id, window).await?;
        if forecasts.is_empty() {
            warn!("No forecasts between {} and {} for hotel {}", window.start, window.end, hotel_id);
            return Err(RevenueError::NoForecast(hotel_id));
        }
        Ok(forecasts)
    }

    /// Aggregate recent history and append a fresh forecast batch
    pub async fn run_forecast(
        &self,
        hotel_id: Uuid,
        days_ahead: Option<u32>,
        now: DateTime<Utc>,
    ) -> RevenueResult<RunSummary<DemandForecast>> {
        let days_ahead = check_horizon(days_ahead.unwrap_or(self.forecast_days))?;
        info!("Forecasting {} days for hotel {}", days_ahead, hotel_id);

        let history = self
            .repos
            .bookings
            .bookings_since(hotel_id, self.aggregator.window_start(now))
            .await?;
        let series = self.aggregator.aggregate(&history)?;
        let forecasts = self.forecaster.forecast(hotel_id, &series, now, days_ahead);

        if !forecasts.is_empty() {
            self.repos.forecasts.insert_forecasts(&forecasts).await?;
        }

        let summary = RunSummary { stage: PipelineStage::Forecast, hotel_id, produced: forecasts };
        info!("{} for hotel {}", summary.message(), hotel_id);
        Ok(summary)
    }

    /// Split forecast demand across channels for every forecast in the horizon
    pub async fn run_allocation(
        &self,
        hotel_id: Uuid,
        days_ahead: Option<u32>,
        now: DateTime<Utc>,
    ) -> RevenueResult<RunSummary<InventoryAllocation>> {
        let days_ahead = days_ahead.unwrap_or(self.allocation_days);
        let hotel = self.require_hotel(hotel_id).await?;
        let forecasts = self.forecasts_ahead(hotel_id, now, days_ahead).await?;

        let allocations = self.allocator.allocate_all(&hotel, &forecasts, now);
        if !allocations.is_empty() {
            self.repos.allocations.insert_allocations(&allocations).await?;
        }

        let summary = RunSummary { stage: PipelineStage::Allocation, hotel_id, produced: allocations };
        info!("{} for hotel {}", summary.message(), hotel_id);
        Ok(summary)
    }

    /// Price every forecast in the horizon against the rooms' base rates
    pub async fn run_rate_optimization(
        &self,
        hotel_id: Uuid,
        days_ahead: Option<u32>,
        now: DateTime<Utc>,
    ) -> RevenueResult<RunSummary<RateRecommendation>> {
        let days_ahead = days_ahead.unwrap_or(self.rate_days);
        let forecasts = self.forecasts_ahead(hotel_id, now, days_ahead).await?;

        let rooms = self.repos.hotels.list_rooms(hotel_id).await?;
        let rates = RateOptimizer::current_rates(&rooms);
        let recommendations = self.optimizer.optimize(&forecasts, &rates, now);

        self.repos
            .recommendations
            .insert_recommendations(&recommendations)
            .await?;

        let summary = RunSummary {
            stage: PipelineStage::RateOptimization,
            hotel_id,
            produced: recommendations,
        };
        info!("{} for hotel {}", summary.message(), hotel_id);
        Ok(summary)
    }

    /// Revenue snapshot over bookings checking in from the start of today (UTC)
    pub async fn dashboard(&self, hotel_id: Uuid, now: DateTime<Utc>) -> RevenueResult<RevenueDashboard> {
        let hotel = self.require_hotel(hotel_id).await?;
        let start_of_day = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);

        let bookings = self.repos.bookings.bookings_since(hotel_id, start_of_day).await?;
        Ok(RevenueDashboard::build(&hotel, &bookings, now))
    }
}
