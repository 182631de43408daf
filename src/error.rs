use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_shared::Error;
use serde_json::json;

/// Handler error, renders a [`foodgram_shared::Error`] as a JSON body.
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self(Error::Unknown(value))
    }
}

// Malformed bodies and query strings are client errors with a readable detail,
// used through `axum_extra::extract::WithRejection`.
impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self(Error::Invalid(value.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self(Error::Invalid(value.body_text()))
    }
}

impl From<axum_extra::extract::QueryRejection> for AppError {
    fn from(value: axum_extra::extract::QueryRejection) -> Self {
        Self(Error::Invalid(value.to_string()))
    }
}

fn field_errors(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("invalid value ({})", err.code),
                })
                .collect();

            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Validate(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": field_errors(errors) }),
            ),
            Error::Invalid(_) | Error::InvalidArgument(_) | Error::Conflict(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": self.0.to_string() }),
            ),
            Error::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "detail": self.0.to_string() }),
            ),
            Error::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                json!({ "detail": self.0.to_string() }),
            ),
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": self.0.to_string() }),
            ),
            Error::Unknown(err) => {
                tracing::error!(err = ?err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "An unexpected error occurred. Please try again later." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
