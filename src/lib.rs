pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;
pub mod types;

use axum::Router;

/// The service router without transport layers.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .with_state(state)
}
