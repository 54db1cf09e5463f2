//! Turns raw request payloads into store-ready values.
//!
//! Nothing here touches the store or the clock; callers pass `now` in.

use chrono::{DateTime, Utc};

use super::dto::{CreateTodo, UpdateTodo};
use super::model::NewTodo;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no fields provided")]
    NoFields,

    #[error("body cannot be empty")]
    EmptyBody,

    #[error("body is required")]
    BodyRequired,

    #[error("invalid request body")]
    Malformed(String),
}

impl ValidationError {
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Malformed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

/// Field assignments for one partial update.
///
/// `None` leaves the stored value alone. `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub body: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

pub fn validate_update(
    payload: UpdateTodo,
    now: DateTime<Utc>,
) -> Result<TodoChanges, ValidationError> {
    if payload.body.is_absent() && payload.completed.is_absent() {
        return Err(ValidationError::NoFields);
    }

    let body = payload.body.into_option();
    if body.as_deref().is_some_and(str::is_empty) {
        return Err(ValidationError::EmptyBody);
    }

    Ok(TodoChanges {
        body,
        completed: payload.completed.into_option(),
        updated_at: now,
    })
}

/// Checks a create payload. `completed` from the caller is dropped.
pub fn validate_create(payload: CreateTodo, now: DateTime<Utc>) -> Result<NewTodo, ValidationError> {
    match payload.body {
        Some(body) if !body.is_empty() => Ok(NewTodo {
            body,
            completed: false,
            created_at: now,
        }),
        _ => Err(ValidationError::BodyRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::todos::dto::Field;
    use crate::routes::todos::model::timestamp_now;

    fn update(body: Field<&str>, completed: Field<bool>) -> UpdateTodo {
        UpdateTodo {
            body: body.into_option().map(str::to_string).into(),
            completed,
        }
    }

    #[test]
    fn rejects_payload_without_fields() {
        let err = validate_update(UpdateTodo::default(), timestamp_now()).unwrap_err();
        assert_eq!(err, ValidationError::NoFields);
        assert_eq!(err.to_string(), "no fields provided");
    }

    #[test]
    fn rejects_empty_body_whatever_completed_is() {
        for completed in [Field::Absent, Field::Present(true), Field::Present(false)] {
            let err = validate_update(update(Field::Present(""), completed), timestamp_now())
                .unwrap_err();
            assert_eq!(err, ValidationError::EmptyBody);
        }
    }

    #[test]
    fn completed_false_alone_is_an_assignment() {
        let now = timestamp_now();
        let changes = validate_update(update(Field::Absent, Field::Present(false)), now).unwrap();

        assert_eq!(changes.completed, Some(false));
        assert_eq!(changes.body, None);
        assert_eq!(changes.updated_at, now);
    }

    #[test]
    fn body_alone_leaves_completed_untouched() {
        let changes =
            validate_update(update(Field::Present("walk dog"), Field::Absent), timestamp_now())
                .unwrap();

        assert_eq!(changes.body.as_deref(), Some("walk dog"));
        assert_eq!(changes.completed, None);
    }

    #[test]
    fn whitespace_body_counts_as_non_empty() {
        let changes =
            validate_update(update(Field::Present(" "), Field::Absent), timestamp_now()).unwrap();
        assert_eq!(changes.body.as_deref(), Some(" "));
    }

    #[test]
    fn create_ignores_caller_completed() {
        let payload = CreateTodo {
            body: Some("buy milk".to_string()),
            completed: Some(true),
        };
        let now = timestamp_now();
        let todo = validate_create(payload, now).unwrap();

        assert!(!todo.completed);
        assert_eq!(todo.body, "buy milk");
        assert_eq!(todo.created_at, now);
    }

    #[test]
    fn create_requires_body() {
        for body in [None, Some(String::new())] {
            let payload = CreateTodo {
                body,
                completed: None,
            };
            assert_eq!(
                validate_create(payload, timestamp_now()).unwrap_err(),
                ValidationError::BodyRequired
            );
        }
    }

    #[test]
    fn malformed_carries_details() {
        let err = ValidationError::Malformed("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "invalid request body");
        assert_eq!(err.details().as_deref(), Some("expected value at line 1"));
        assert_eq!(ValidationError::NoFields.details(), None);
    }
}
