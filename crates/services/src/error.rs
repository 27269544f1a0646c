//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Typed failure of a remote backend call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found")]
    NotFound,
    #[error("not signed in")]
    Unauthorized,
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("email is required")]
    EmptyEmail,
    #[error("password is required")]
    EmptyPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by `QuizGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("question generation returned an empty response")]
    EmptyResponse,
    #[error("question generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generated question is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Invalid service configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
