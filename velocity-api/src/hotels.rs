use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;
use velocity_core::RevenueError;
use velocity_shared::{Hotel, NewHotel, Room, RoomType};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Room type keys arrive as plain strings so unknown ones surface as a
/// validation error instead of a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateHotelRequest {
    pub name: String,
    pub location: String,
    pub total_rooms: i32,
    pub room_types: BTreeMap<String, i32>,
}

impl CreateHotelRequest {
    fn into_new_hotel(self) -> Result<NewHotel, RevenueError> {
        if self.total_rooms < 0 {
            return Err(RevenueError::Validation("total_rooms must not be negative".to_string()));
        }

        let mut room_types = BTreeMap::new();
        for (key, count) in self.room_types {
            let room_type: RoomType = key.parse()?;
            if count < 0 {
                return Err(RevenueError::Validation(format!("Negative room count for {}", room_type)));
            }
            room_types.insert(room_type, count);
        }

        Ok(NewHotel {
            name: self.name,
            location: self.location,
            total_rooms: self.total_rooms,
            room_types,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route("/hotels/{hotel_id}", get(get_hotel))
        .route("/hotels/{hotel_id}/rooms", get(list_rooms))
}

/// POST /api/hotels
/// Create a hotel and provision its rooms
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(req): Json<CreateHotelRequest>,
) -> Result<Json<Hotel>, AppError> {
    let hotel = Hotel::new(req.into_new_hotel()?);
    let rooms = hotel.provision_rooms();

    state.repos.hotels.create_hotel(&hotel, &rooms).await?;

    info!("Created hotel {} ({}) with {} rooms", hotel.name, hotel.id, rooms.len());
    Ok(Json(hotel))
}

/// GET /api/hotels
pub async fn list_hotels(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>, AppError> {
    Ok(Json(state.repos.hotels.list_hotels().await?))
}

/// GET /api/hotels/{hotel_id}
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<Hotel>, AppError> {
    Ok(Json(state.pipeline.require_hotel(hotel_id).await?))
}

/// GET /api/hotels/{hotel_id}/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.repos.hotels.list_rooms(hotel_id).await?))
}
