use async_trait::async_trait;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use velocity_shared::{Booking, DemandForecast, Hotel, InventoryAllocation, RateRecommendation, Room};

use crate::window::DateWindow;

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for hotels and their room inventory
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Persist a hotel together with its provisioned rooms
    async fn create_hotel(&self, hotel: &Hotel, rooms: &[Room]) -> RepoResult<()>;

    async fn get_hotel(&self, id: Uuid) -> RepoResult<Option<Hotel>>;

    async fn list_hotels(&self) -> RepoResult<Vec<Hotel>>;

    /// Rooms in the order they were stored
    async fn list_rooms(&self, hotel_id: Uuid) -> RepoResult<Vec<Room>>;
}

/// Repository trait for booking history
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &Booking) -> RepoResult<()>;

    /// Bookings of a hotel whose check-in is at or after `since`
    async fn bookings_since(
        &self,
        hotel_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>>;

    /// Bookings whose check-in is at or before `until`, optionally for a single hotel
    async fn bookings_until(
        &self,
        hotel_id: Option<Uuid>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>>;
}

/// Append-only log of demand forecasts
#[async_trait]
pub trait ForecastRepository: Send + Sync {
    async fn insert_forecasts(&self, forecasts: &[DemandForecast]) -> RepoResult<()>;

    /// Forecasts whose target date falls in the window, in insertion order
    async fn forecasts_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<DemandForecast>>;
}

/// Append-only log of channel allocations
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    async fn insert_allocations(&self, allocations: &[InventoryAllocation]) -> RepoResult<()>;

    async fn allocations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<InventoryAllocation>>;
}

/// Append-only log of rate recommendations
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn insert_recommendations(&self, recommendations: &[RateRecommendation]) -> RepoResult<()>;

    async fn recommendations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<RateRecommendation>>;
}

/// The storage collaborator as seen by the revenue pipeline and the API:
/// one handle per collection.
#[derive(Clone)]
pub struct Repositories {
    pub hotels: Arc<dyn HotelRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub forecasts: Arc<dyn ForecastRepository>,
    pub allocations: Arc<dyn AllocationRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
}
