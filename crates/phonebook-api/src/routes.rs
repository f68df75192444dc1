//! Route configuration for the phonebook API

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::logging::RequestLogLayer;
use crate::state::AppState;

/// Creates the router with all routes and middleware
///
/// # Example
///
/// ```rust,ignore
/// use phonebook_api::{AppState, create_router};
/// use phonebook_core::MemoryDirectoryStore;
///
/// let router = create_router(AppState::new(MemoryDirectoryStore::seeded()));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/info", get(handlers::info))
        .route(
            "/api/persons",
            get(handlers::list_persons).post(handlers::create_person),
        )
        .route(
            "/api/persons/{id}",
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        )
        .fallback(handlers::unknown_endpoint)
        .layer(RequestLogLayer::new())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
