//! Structured error responses shared by every handler.
//!
//! Every failure renders as `{"error": ..., "details": ...}` with `details`
//! left out when there is nothing more to say.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::routes::todos::model::InvalidTodoId;
use crate::routes::todos::validation::ValidationError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected input on create.
    #[error("{0}")]
    BadRequest(ValidationError),

    /// Rejected input on update.
    #[error("{0}")]
    Validation(ValidationError),

    #[error("invalid todo id")]
    InvalidIdentifier(#[from] InvalidTodoId),

    #[error("todo not found")]
    NotFound,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wraps a store failure with the operation that hit it, and logs it.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| {
            tracing::error!(error = %source, "{context}");
            ApiError::Store { context, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) | Self::InvalidIdentifier(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::BadRequest(err) | Self::Validation(err) => err.details(),
            Self::InvalidIdentifier(err) => Some(err.to_string()),
            Self::NotFound => None,
            Self::Store { source, .. } => Some(source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::todos::model::TodoId;

    #[test]
    fn validation_status_depends_on_operation() {
        assert_eq!(
            ApiError::BadRequest(ValidationError::BodyRequired).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(ValidationError::NoFields).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn invalid_identifier_explains_itself() {
        let err: ApiError = "nope".parse::<TodoId>().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "invalid todo id");
        assert!(err.details().unwrap().contains("nope"));
    }

    #[test]
    fn store_errors_name_the_operation() {
        let err = ApiError::store("failed to list todos")(StoreError::Unavailable(
            "connection refused".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "failed to list todos");
        assert_eq!(
            err.details().as_deref(),
            Some("store unavailable: connection refused")
        );
    }

    #[test]
    fn error_body_omits_empty_details() {
        let body = ErrorBody {
            error: "todo not found".to_string(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"todo not found"}"#
        );
    }
}
