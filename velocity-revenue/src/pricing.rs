use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;
use velocity_shared::{DemandForecast, RateRecommendation, Room, RoomType};
use velocity_store::app_config::RateConfig;

use crate::round2;

const HIGH_DEMAND: f64 = 8.0;
const MEDIUM_DEMAND: f64 = 5.0;
const LOW_DEMAND: f64 = 2.0;

/// Demand-tiered rate adjustment applied to a forecast
#[derive(Debug, Clone, Copy, PartialEq)]
struct RateRule {
    multiplier: f64,
    reason: &'static str,
}

impl RateRule {
    fn for_demand(demand: f64) -> Self {
        if demand > HIGH_DEMAND {
            Self { multiplier: 1.2, reason: "High demand predicted - increase rate by 20%" }
        } else if demand > MEDIUM_DEMAND {
            Self { multiplier: 1.1, reason: "Medium demand predicted - increase rate by 10%" }
        } else if demand < LOW_DEMAND {
            Self { multiplier: 0.9, reason: "Low demand predicted - decrease rate by 10%" }
        } else {
            Self { multiplier: 1.0, reason: "Maintain current rate" }
        }
    }
}

/// Turns demand forecasts into per-day rate recommendations
pub struct RateOptimizer {
    config: RateConfig,
}

impl RateOptimizer {
    pub fn new(config: RateConfig) -> Self {
        Self { config }
    }

    /// Base rate per room type. When several rooms share a type the last
    /// one in storage order wins.
    pub fn current_rates(rooms: &[Room]) -> HashMap<RoomType, f64> {
        rooms.iter().map(|room| (room.room_type, room.base_rate)).collect()
    }

    pub fn current_rate_for(&self, rates: &HashMap<RoomType, f64>, room_type: RoomType) -> f64 {
        rates
            .get(&room_type)
            .copied()
            .unwrap_or(self.config.default_current_rate)
    }

    pub fn recommend(
        &self,
        forecast: &DemandForecast,
        current_rate: f64,
        now: DateTime<Utc>,
    ) -> RateRecommendation {
        let rule = RateRule::for_demand(forecast.predicted_demand);
        let recommended_rate = round2(current_rate * rule.multiplier);

        RateRecommendation {
            id: Uuid::new_v4(),
            hotel_id: forecast.hotel_id,
            room_type: forecast.room_type,
            date: forecast.date,
            current_rate,
            recommended_rate,
            expected_revenue_lift: round2((recommended_rate - current_rate) * forecast.predicted_demand),
            reason: rule.reason.to_string(),
            created_at: now,
        }
    }

    /// One recommendation per forecast, in forecast order
    pub fn optimize(
        &self,
        forecasts: &[DemandForecast],
        rates: &HashMap<RoomType, f64>,
        now: DateTime<Utc>,
    ) -> Vec<RateRecommendation> {
        let recommendations: Vec<RateRecommendation> = forecasts
            .iter()
            .map(|f| self.recommend(f, self.current_rate_for(rates, f.room_type), now))
            .collect();

        debug!(
            "Priced {} forecasts across {} known room rates",
            recommendations.len(),
            rates.len()
        );
        recommendations
    }
}
