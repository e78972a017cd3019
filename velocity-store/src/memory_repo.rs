use async_trait::async_trait;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use velocity_core::repository::{
    AllocationRepository, BookingRepository, ForecastRepository, HotelRepository,
    RecommendationRepository, RepoResult, Repositories,
};
use velocity_core::DateWindow;
use velocity_shared::{Booking, DemandForecast, Hotel, InventoryAllocation, RateRecommendation, Room};

/// Process-local storage backend. Every collection is an append-only `Vec`
/// so reads come back in insertion order, like the `seq` ordering of the
/// Postgres tables.
#[derive(Default)]
pub struct InMemoryStore {
    hotels: RwLock<Vec<Hotel>>,
    rooms: RwLock<Vec<Room>>,
    bookings: RwLock<Vec<Booking>>,
    forecasts: RwLock<Vec<DemandForecast>>,
    allocations: RwLock<Vec<InventoryAllocation>>,
    recommendations: RwLock<Vec<RateRecommendation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out every collection backed by this one store
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            hotels: self.clone(),
            bookings: self.clone(),
            forecasts: self.clone(),
            allocations: self.clone(),
            recommendations: self.clone(),
        }
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn create_hotel(&self, hotel: &Hotel, rooms: &[Room]) -> RepoResult<()> {
        self.hotels.write().await.push(hotel.clone());
        self.rooms.write().await.extend_from_slice(rooms);
        Ok(())
    }

    async fn get_hotel(&self, id: Uuid) -> RepoResult<Option<Hotel>> {
        Ok(self.hotels.read().await.iter().find(|h| h.id == id).cloned())
    }

    async fn list_hotels(&self) -> RepoResult<Vec<Hotel>> {
        Ok(self.hotels.read().await.clone())
    }

    async fn list_rooms(&self, hotel_id: Uuid) -> RepoResult<Vec<Room>> {
        Ok(self
            .rooms
            .read()
            .await
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: &Booking) -> RepoResult<()> {
        self.bookings.write().await.push(booking.clone());
        Ok(())
    }

    async fn bookings_since(
        &self,
        hotel_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| b.hotel_id == hotel_id && b.check_in_date >= since)
            .cloned()
            .collect())
    }

    async fn bookings_until(
        &self,
        hotel_id: Option<Uuid>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| hotel_id.map_or(true, |id| b.hotel_id == id))
            .filter(|b| b.check_in_date <= until)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ForecastRepository for InMemoryStore {
    async fn insert_forecasts(&self, forecasts: &[DemandForecast]) -> RepoResult<()> {
        self.forecasts.write().await.extend_from_slice(forecasts);
        Ok(())
    }

    async fn forecasts_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<DemandForecast>> {
        Ok(self
            .forecasts
            .read()
            .await
            .iter()
            .filter(|f| f.hotel_id == hotel_id && window.contains(f.date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AllocationRepository for InMemoryStore {
    async fn insert_allocations(&self, allocations: &[InventoryAllocation]) -> RepoResult<()> {
        self.allocations.write().await.extend_from_slice(allocations);
        Ok(())
    }

    async fn allocations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<InventoryAllocation>> {
        Ok(self
            .allocations
            .read()
            .await
            .iter()
            .filter(|a| a.hotel_id == hotel_id && window.contains(a.date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryStore {
    async fn insert_recommendations(&self, recommendations: &[RateRecommendation]) -> RepoResult<()> {
        self.recommendations.write().await.extend_from_slice(recommendations);
        Ok(())
    }

    async fn recommendations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<RateRecommendation>> {
        Ok(self
            .recommendations
            .read()
            .await
            .iter()
            .filter(|r| r.hotel_id == hotel_id && window.contains(r.date))
            .cloned()
            .collect())
    }
}
