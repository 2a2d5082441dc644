use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Grid view
        .route("/view", get(handlers::get_view))
        .route("/view/mode", put(handlers::set_mode))
        .route("/view/category", put(handlers::set_category))
        // Brands
        .route("/brands", get(handlers::get_brands))
        .route("/brands/:id/select", post(handlers::select_brand))
        // Watchlist
        .route("/watchlist", get(handlers::get_watchlist))
        .route("/watchlist/:id/toggle", post(handlers::toggle_watchlist))
        // Home screen
        .route("/home", get(handlers::get_home))
        .route("/featured/:index", post(handlers::jump_featured))
        // Detail and playback
        .route(
            "/selection",
            get(handlers::get_selection).delete(handlers::clear_selection),
        )
        .route("/titles/:id/select", post(handlers::select_title))
        .route("/titles/:id/play", post(handlers::play_title))
        .route("/playback", delete(handlers::close_player))
        // AI search
        .route(
            "/search",
            get(handlers::get_search).post(handlers::search),
        )
        .route("/search/error", delete(handlers::dismiss_search_error))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
