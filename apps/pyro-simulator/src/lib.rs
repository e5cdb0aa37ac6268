//! Stand-in for the pyrotechnic controller's REST API, for rehearsals and tests

pub mod error;
pub mod routes;
pub mod store;

pub use error::StoreError;
pub use routes::{sequence_routes, SharedStore};
pub use store::SequenceStore;

use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api";

/// Full simulator application with a fresh, empty store
pub fn app() -> Router {
	app_with(Arc::new(RwLock::new(SequenceStore::new())))
}

pub fn app_with(store: SharedStore) -> Router {
	Router::new()
		.nest(API_PREFIX, sequence_routes())
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(store)
}
