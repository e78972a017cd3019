use axum::{
    extract::{Path, Query, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use velocity_core::DateWindow;
use velocity_shared::DemandForecast;

use crate::error::AppError;
use crate::state::AppState;
use crate::HorizonQuery;

pub fn routes() -> Router<AppState> {
    Router::new().route("/forecast/{hotel_id}", post(generate_forecast).get(list_forecasts))
}

/// POST /api/forecast/{hotel_id}?days_ahead=
/// Run the forecaster over the last 90 days of bookings
pub async fn generate_forecast(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Value>, AppError> {
    let summary = state
        .pipeline
        .run_forecast(hotel_id, query.days_ahead, Utc::now())
        .await?;

    Ok(Json(json!({
        "message": summary.message(),
        "forecasts": summary.count(),
    })))
}

/// GET /api/forecast/{hotel_id}?days_ahead=
pub async fn list_forecasts(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Vec<DemandForecast>>, AppError> {
    let days_ahead = query.days_ahead.unwrap_or(state.pipeline.default_forecast_days());
    let window = DateWindow::ahead(Utc::now(), days_ahead)?;

    Ok(Json(state.repos.forecasts.forecasts_in_window(hotel_id, window).await?))
}
