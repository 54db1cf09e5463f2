use axum::{
    http::{header, Method},
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

mod health;
pub mod todos;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let todo_router = Router::new()
        .route("/", get(todos::routes::list).post(todos::routes::create))
        .route(
            "/{id}",
            patch(todos::routes::update).delete(todos::routes::delete),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/todos", todo_router)
}

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::HEAD,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}
