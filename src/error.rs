use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const USER_EXISTS: &str = "User already exists";
pub const NO_TOKEN: &str = "No token, authorization denied";
pub const INVALID_TOKEN: &str = "Token is not valid";
pub const SERVER_ERROR: &str = "Server Error";

/// One entry of the `errors` array returned with a 400.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
}

impl FieldError {
    /// Error tied to a request body field.
    pub fn body(param: &'static str, value: Option<Value>, msg: impl Into<String>) -> Self {
        Self {
            value,
            msg: msg.into(),
            param: Some(param),
            location: Some("body"),
        }
    }

    /// Error that is not tied to a field, e.g. a failed login.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            value: None,
            msg: msg.into(),
            param: None,
            location: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed ({} errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// Unknown email and wrong password are deliberately the same error.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserExists,

    #[error("missing auth token")]
    MissingToken,

    #[error("invalid auth token")]
    InvalidToken,

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Server(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "unreadable request body");
        let msg = match rejection {
            JsonRejection::MissingJsonContentType(_) => "Request body must be JSON",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::JsonDataError(_) => "Request body has a field of the wrong type",
            _ => "Request body could not be read",
        };
        ApiError::Validation(vec![FieldError {
            location: Some("body"),
            ..FieldError::message(msg)
        }])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                debug!(count = errors.len(), "request validation failed");
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::InvalidCredentials => errors_body(INVALID_CREDENTIALS),
            ApiError::UserExists => errors_body(USER_EXISTS),
            ApiError::MissingToken => msg_body(StatusCode::UNAUTHORIZED, NO_TOKEN),
            ApiError::InvalidToken => msg_body(StatusCode::UNAUTHORIZED, INVALID_TOKEN),
            ApiError::NotFound(msg) => msg_body(StatusCode::BAD_REQUEST, msg),
            ApiError::Server(e) => {
                error!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response()
            }
        }
    }
}

fn errors_body(msg: &str) -> Response {
    warn!(msg, "request rejected");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": [FieldError::message(msg)] })),
    )
        .into_response()
}

fn msg_body(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "msg": msg }))).into_response()
}
