use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use velocity_core::repository::Repositories;

use crate::booking_repo::PgBookingRepository;
use crate::hotel_repo::PgHotelRepository;
use crate::revenue_repo::{PgAllocationRepository, PgForecastRepository, PgRecommendationRepository};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Postgres-backed handles for every collection, sharing this pool
    pub fn repositories(&self) -> Repositories {
        Repositories {
            hotels: Arc::new(PgHotelRepository::new(self.pool.clone())),
            bookings: Arc::new(PgBookingRepository::new(self.pool.clone())),
            forecasts: Arc::new(PgForecastRepository::new(self.pool.clone())),
            allocations: Arc::new(PgAllocationRepository::new(self.pool.clone())),
            recommendations: Arc::new(PgRecommendationRepository::new(self.pool.clone())),
        }
    }
}
