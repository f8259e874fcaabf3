use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

use crate::constants::MESSAGE_MAX_LENGTH;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {message}")]
    BadRequest { message: Cow<'static, str>, field: Option<&'static str> },
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: msg.into(), field: None }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            Error::BadRequest { message, field } => {
                res.json(ErrorBody { message: message.clone(), field: *field })
            }
            Error::NotFound(msg) => res.json(ErrorBody { message: msg.clone(), field: None }),
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into(), field: None })
            }
        }
    }
}

/// Rejection of caller-supplied data. Every variant names the offending field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message is required")]
    MissingMessage,
    #[error("Message text cannot be empty")]
    EmptyText,
    #[error("{field} must be positive, got {value}")]
    NonPositiveId { field: &'static str, value: i32 },
    #[error("Sender and receiver cannot be the same (user {user_id})")]
    SelfMessage { user_id: i32 },
    #[error("Message text is {length} characters, the limit is {max}", max = MESSAGE_MAX_LENGTH)]
    TextTooLong { length: usize },
    #[error("Message text cannot contain NUL characters")]
    NulInText,
    #[error("User IDs must be different (user {user_id})")]
    SameParticipants { user_id: i32 },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingMessage => "message",
            ValidationError::EmptyText
            | ValidationError::TextTooLong { .. }
            | ValidationError::NulInText => "text",
            ValidationError::NonPositiveId { field, .. } => *field,
            ValidationError::SelfMessage { .. } => "sender_id/receiver_id",
            ValidationError::SameParticipants { .. } => "user_a/user_b",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Database Error: {0}")]
    Persistence(#[source] sqlx::Error),
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            log::error!(
                "Database rejected statement (code {:?}, constraint {:?}): {}",
                db_err.code(),
                db_err.constraint(),
                db_err.message()
            );
        } else {
            log::error!("{:?}", err);
        }
        SystemError::Persistence(err)
    }
}

impl SystemError {
    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::Validation(err) => {
                Error::BadRequest { message: err.to_string().into(), field: Some(err.field()) }
            }
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Persistence(_) => Error::InternalServer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: Error) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_fields() {
        assert_eq!(ValidationError::MissingMessage.field(), "message");
        assert_eq!(ValidationError::EmptyText.field(), "text");
        assert_eq!(ValidationError::TextTooLong { length: 1001 }.field(), "text");
        assert_eq!(ValidationError::NulInText.field(), "text");
        assert_eq!(
            ValidationError::NonPositiveId { field: "receiver_id", value: 0 }.field(),
            "receiver_id"
        );
        assert_eq!(ValidationError::SelfMessage { user_id: 5 }.field(), "sender_id/receiver_id");
        assert_eq!(ValidationError::SameParticipants { user_id: 5 }.field(), "user_a/user_b");
    }

    #[test]
    fn test_status_codes() {
        let validation: Error = SystemError::from(ValidationError::EmptyText).into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let not_found: Error = SystemError::not_found("No messages found to delete").into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let persistence: Error = SystemError::from(sqlx::Error::PoolTimedOut).into();
        assert_eq!(persistence.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_bad_request_body_names_field() {
        let err: Error = SystemError::from(ValidationError::SelfMessage { user_id: 5 }).into();
        let body = body_json(err).await;
        assert_eq!(body["field"], "sender_id/receiver_id");
        assert_eq!(body["message"], "Sender and receiver cannot be the same (user 5)");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let err: Error = SystemError::from(sqlx::Error::PoolTimedOut).into();
        let body = body_json(err).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert!(body.get("field").is_none());
    }
}
