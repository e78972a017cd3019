use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use velocity_revenue::RevenueDashboard;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics/{hotel_id}/dashboard", get(dashboard))
}

/// GET /api/analytics/{hotel_id}/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<RevenueDashboard>, AppError> {
    Ok(Json(state.pipeline.dashboard(hotel_id, Utc::now()).await?))
}
