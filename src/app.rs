use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/attendance", get(handlers::attendance_page))
        .route("/attendance/download", get(handlers::download_report))
        .route("/api/attendance/charts", get(handlers::get_charts))
        .route("/api/attendance/stats", get(handlers::get_stats))
        .with_state(state)
}
