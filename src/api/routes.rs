use axum::http::{header, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::api::handlers::{self, AppState};

const MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Create the router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/recipes/search", get(handlers::search_recipes))
        .route("/recipes/import", post(handlers::import_recipes))
        .route("/recipes/:id", get(handlers::get_recipe_detail))
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .layer(
            // Request body size limit - import batches can be large but bounded
            RequestBodyLimitLayer::new(MAX_REQUEST_BODY_SIZE),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(TraceLayer::new_for_http())
}
