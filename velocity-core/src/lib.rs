pub mod repository;
pub mod window;

use uuid::Uuid;

pub use window::{check_horizon, DateWindow, MAX_HORIZON_DAYS};

#[derive(Debug, thiserror::Error)]
pub enum RevenueError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(Uuid),
    #[error("Insufficient historical data for forecasting: found {found} bookings, need at least {required}")]
    InsufficientData { found: usize, required: usize },
    #[error("No demand forecasts available for hotel {0}. Generate forecasts first.")]
    NoForecast(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RevenueError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        tracing::error!("Storage collaborator failed: {}", err);
        RevenueError::Storage(err.to_string())
    }
}

impl From<velocity_shared::ParseEnumError> for RevenueError {
    fn from(err: velocity_shared::ParseEnumError) -> Self {
        RevenueError::Validation(err.to_string())
    }
}

pub type RevenueResult<T> = Result<T, RevenueError>;
