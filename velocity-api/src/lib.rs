use axum::{
    http::Method,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod error;
pub mod hotels;
pub mod bookings;
pub mod forecasts;
pub mod allocations;
pub mod analytics;
pub mod rates;

pub use state::AppState;

/// `?days_ahead=` on run and listing routes; each stage falls back to its
/// configured horizon when absent.
#[derive(Debug, Default, serde::Deserialize)]
pub struct HorizonQuery {
    pub days_ahead: Option<u32>,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let api = Router::new()
        .merge(hotels::routes())
        .merge(bookings::routes())
        .merge(forecasts::routes())
        .merge(allocations::routes())
        .merge(analytics::routes())
        .merge(rates::routes());

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
