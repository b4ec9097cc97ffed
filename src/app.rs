use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/month", get(handlers::get_month).delete(handlers::clear_month))
        .route(
            "/api/day/:date",
            get(handlers::get_day)
                .put(handlers::put_day)
                .delete(handlers::delete_day),
        )
        .route("/api/calculate", post(handlers::calculate))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .with_state(state)
}
