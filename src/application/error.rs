// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("authentication required: {0}")]
    Authentication(String),

    #[error("not authorized: {0}")]
    Authorization(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("external service {service} failed: {message}")]
    ExternalService { service: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn external(service: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Machine-readable error code returned to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Authentication(_) => "AUTHENTICATION_ERROR",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Authentication(_) => 401,
            Self::Authorization(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::ExternalService { .. } => 502,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Message safe to show a client: the detail for client errors, the
    /// variant payload otherwise.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Authentication(msg)
            | Self::Authorization(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::ExternalService { service, message } => format!("{service}: {message}"),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Database(msg),
            DomainError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_codes_and_statuses() {
        let cases = [
            (ApplicationError::validation("x"), "VALIDATION_ERROR", 400),
            (ApplicationError::authentication("x"), "AUTHENTICATION_ERROR", 401),
            (ApplicationError::authorization("x"), "AUTHORIZATION_ERROR", 403),
            (ApplicationError::not_found("x"), "NOT_FOUND", 404),
            (ApplicationError::conflict("x"), "CONFLICT", 409),
            (ApplicationError::database("x"), "DATABASE_ERROR", 500),
            (ApplicationError::external("smtp", "x"), "EXTERNAL_SERVICE_ERROR", 502),
            (ApplicationError::internal("x"), "INTERNAL_ERROR", 500),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn domain_errors_map_onto_taxonomy() {
        let err: ApplicationError = DomainError::Persistence("pool closed".into()).into();
        assert_eq!(err.code(), "DATABASE_ERROR");
        let err: ApplicationError = DomainError::Validation("bad".into()).into();
        assert_eq!(err.status_code(), 400);
    }
}
