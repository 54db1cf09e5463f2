pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use std::path::Path;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Builds the full application. When `static_dir` is set, unmatched paths
/// are served from it.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = routes::routes();

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(routes::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
