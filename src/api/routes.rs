//! API Routes
//!
//! Configures the Axum router with all inventory API endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item_handler, delete_item_handler, get_item_handler, health_handler,
    list_items_handler, obtain_token_handler, refresh_token_handler, update_item_handler,
    AppState,
};
use crate::auth::require_bearer;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /items/`, `POST /items/` - List and create items (bearer token required)
/// - `GET|PUT|DELETE /items/:id/` - Read, replace and delete an item (bearer token required)
/// - `POST /token/` - Obtain an access/refresh token pair
/// - `POST /token/refresh/` - Obtain a new access token
/// - `GET /health` - Health check with cache statistics
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let items = Router::new()
        .route("/items/", get(list_items_handler).post(create_item_handler))
        .route(
            "/items/:id/",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ));

    Router::new()
        .merge(items)
        .route("/token/", post(obtain_token_handler))
        .route("/token/refresh/", post(refresh_token_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
