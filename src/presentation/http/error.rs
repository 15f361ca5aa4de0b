use crate::application::{ApplicationResult, error::ApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

const GENERIC_SERVER_MESSAGE: &str = "Internal server error";

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Development mode returns the real message and a `details` field for 5xx
/// errors; production hides them behind a generic message.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

fn expose_internal_errors() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<String>,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.code();

        if !err.is_server_error() {
            return Self::new(status, code, err.message(), None);
        }

        tracing::error!(code, error = %err, "request failed with server error");
        if expose_internal_errors() {
            Self::new(status, code, err.message(), Some(err.to_string()))
        } else {
            Self::new(status, code, GENERIC_SERVER_MESSAGE.to_string(), None)
        }
    }

    fn new(status: StatusCode, code: &'static str, message: String, details: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        Self::from_error(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            code: self.code.to_string(),
            message: self.message,
            details: self.details,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Canonical reason phrase of the status code.
    pub error: String,
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
