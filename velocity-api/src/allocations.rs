use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use velocity_core::{DateWindow, RevenueError};
use velocity_shared::{InventoryAllocation, NewAllocation};

use crate::error::AppError;
use crate::state::AppState;
use crate::HorizonQuery;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/allocations", post(create_allocation))
        .route("/allocations/{hotel_id}", get(list_allocations))
        .route("/allocations/{hotel_id}/optimize", post(optimize_allocations))
}

/// POST /api/allocations
/// Record a manual allocation alongside the generated ones
pub async fn create_allocation(
    State(state): State<AppState>,
    Json(req): Json<NewAllocation>,
) -> Result<Json<InventoryAllocation>, AppError> {
    if req.allocated_rooms < 0 {
        return Err(RevenueError::Validation("allocated_rooms must not be negative".to_string()).into());
    }

    let allocation = InventoryAllocation::new(req, Utc::now());
    state
        .repos
        .allocations
        .insert_allocations(std::slice::from_ref(&allocation))
        .await?;

    info!(
        "Manual allocation of {} {} rooms to {} for hotel {}",
        allocation.allocated_rooms, allocation.room_type, allocation.channel, allocation.hotel_id
    );
    Ok(Json(allocation))
}

/// GET /api/allocations/{hotel_id}?days_ahead=
pub async fn list_allocations(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Vec<InventoryAllocation>>, AppError> {
    let days_ahead = query.days_ahead.unwrap_or(state.pipeline.default_allocation_days());
    let window = DateWindow::ahead(Utc::now(), days_ahead)?;

    Ok(Json(state.repos.allocations.allocations_in_window(hotel_id, window).await?))
}

/// POST /api/allocations/{hotel_id}/optimize?days_ahead=
pub async fn optimize_allocations(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Value>, AppError> {
    let summary = state
        .pipeline
        .run_allocation(hotel_id, query.days_ahead, Utc::now())
        .await?;

    Ok(Json(json!({
        "message": summary.message(),
        "allocations": summary.count(),
    })))
}
