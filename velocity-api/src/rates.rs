use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use velocity_core::DateWindow;
use velocity_shared::RateRecommendation;

use crate::error::AppError;
use crate::state::AppState;
use crate::HorizonQuery;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rates/{hotel_id}/optimize", post(optimize_rates))
        .route("/rates/{hotel_id}/recommendations", get(list_recommendations))
}

/// POST /api/rates/{hotel_id}/optimize?days_ahead=
pub async fn optimize_rates(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Value>, AppError> {
    let summary = state
        .pipeline
        .run_rate_optimization(hotel_id, query.days_ahead, Utc::now())
        .await?;

    Ok(Json(json!({
        "message": summary.message(),
        "recommendations": summary.count(),
    })))
}

/// GET /api/rates/{hotel_id}/recommendations?days_ahead=
pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Vec<RateRecommendation>>, AppError> {
    let days_ahead = query.days_ahead.unwrap_or(state.pipeline.default_rate_days());
    let window = DateWindow::ahead(Utc::now(), days_ahead)?;

    Ok(Json(
        state
            .repos
            .recommendations
            .recommendations_in_window(hotel_id, window)
            .await?,
    ))
}
