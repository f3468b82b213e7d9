//! resman-server - REST API server for resman.
//!
//! Exposes every [`ResourceClient`](resman_core::ResourceClient) operation
//! over JSON `POST` routes. Callers open a session per alias with
//! `/validateMongoDB` or `/validateJSON` and name that alias in every later
//! request.
//!
//! # Example
//!
//! ```ignore
//! use resman_core::ManagerConfig;
//! use resman_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(ManagerConfig::default());
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
