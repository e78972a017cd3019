use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use velocity_core::{DateWindow, RevenueError};
use velocity_shared::{Booking, NewBooking};

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_BOOKING_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub hotel_id: Option<Uuid>,
    pub days_ahead: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<NewBooking>,
) -> Result<Json<Booking>, AppError> {
    if req.check_out_date < req.check_in_date {
        return Err(RevenueError::Validation("check_out_date is before check_in_date".to_string()).into());
    }

    let booking = Booking::new(req);
    state.repos.bookings.create_booking(&booking).await?;

    info!(
        "Booking {} for hotel {} via {} at {:.2}",
        booking.id, booking.hotel_id, booking.channel, booking.rate
    );
    Ok(Json(booking))
}

/// GET /api/bookings?hotel_id=&days_ahead=
/// Bookings checking in up to `days_ahead` days from now
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let days_ahead = query.days_ahead.unwrap_or(DEFAULT_BOOKING_DAYS);
    let until = DateWindow::ahead(Utc::now(), days_ahead)?.end;

    let bookings = state.repos.bookings.bookings_until(query.hotel_id, until).await?;
    Ok(Json(bookings))
}
