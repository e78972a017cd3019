use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use super::booking::BookingChannel;
use super::hotel::RoomType;

/// Projected demand and ADR for one room type on one future day.
///
/// Forecast runs only ever append; several records may exist for the same
/// (hotel, date, room type) and readers pick what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub date: DateTime<Utc>,
    pub room_type: RoomType,
    pub predicted_demand: f64,
    /// Average Daily Rate
    pub predicted_adr: f64,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

impl DemandForecast {
    pub fn new(
        hotel_id: Uuid,
        date: DateTime<Utc>,
        room_type: RoomType,
        predicted_demand: f64,
        predicted_adr: f64,
        confidence_score: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            date,
            room_type,
            predicted_demand,
            predicted_adr,
            confidence_score,
            created_at,
        }
    }
}

/// Rooms of one type held back for one sales channel on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAllocation {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: RoomType,
    pub date: DateTime<Utc>,
    pub channel: BookingChannel,
    pub allocated_rooms: i32,
    pub rate: f64,
    pub created_at: DateTime<Utc>,
}

impl InventoryAllocation {
    pub fn new(request: NewAllocation, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id: request.hotel_id,
            room_type: request.room_type,
            date: request.date,
            channel: request.channel,
            allocated_rooms: request.allocated_rooms,
            rate: request.rate,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAllocation {
    pub hotel_id: Uuid,
    pub room_type: RoomType,
    pub date: DateTime<Utc>,
    pub channel: BookingChannel,
    pub allocated_rooms: i32,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecommendation {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: RoomType,
    pub date: DateTime<Utc>,
    pub current_rate: f64,
    pub recommended_rate: f64,
    /// Negative when the recommendation is a discount
    pub expected_revenue_lift: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
