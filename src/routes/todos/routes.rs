use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::info;

use super::dto::{from_json_object, CreateTodo, UpdateTodo};
use super::model::{timestamp_now, TodoId};
use super::validation::{validate_create, validate_update, ValidationError};
use crate::error::ApiError;
use crate::state::AppState;

/// List every todo in store order
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let todos = state
        .store
        .find_all()
        .await
        .map_err(ApiError::store("failed to list todos"))?;

    Ok(Json(todos))
}

/// Create a new todo. It always starts out not completed.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: CreateTodo = decode(payload).map_err(ApiError::BadRequest)?;
    let new_todo = validate_create(payload, timestamp_now()).map_err(ApiError::BadRequest)?;

    let id = state
        .store
        .insert(&new_todo)
        .await
        .map_err(ApiError::store("failed to create todo"))?;

    info!(todo_id = %id, "todo created");

    Ok((StatusCode::CREATED, Json(new_todo.into_todo(id))))
}

/// Apply a partial update and return the stored result
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: TodoId = id.parse()?;
    let payload: UpdateTodo = decode(payload).map_err(ApiError::Validation)?;
    let changes = validate_update(payload, timestamp_now()).map_err(ApiError::Validation)?;

    let matched = state
        .store
        .update_by_id(id, &changes)
        .await
        .map_err(ApiError::store("failed to update todo"))?;

    if matched == 0 {
        return Err(ApiError::NotFound);
    }

    // Read back so the response reflects what was stored.
    let todo = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::store("failed to fetch updated todo"))?
        .ok_or(ApiError::NotFound)?;

    info!(todo_id = %id, "todo updated");

    Ok(Json(todo))
}

/// Permanently delete a todo
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: TodoId = id.parse()?;

    let deleted = state
        .store
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("failed to delete todo"))?;

    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    info!(todo_id = %id, "todo deleted");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "todo deleted"})),
    ))
}

fn decode<T: serde::de::DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ValidationError> {
    let Json(value) = payload.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    from_json_object(value)
}
