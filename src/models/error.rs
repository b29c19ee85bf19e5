//! Error types for the static file handler.
//!
//! Every failure the handler can hit is one variant of [`HandlerError`]. Whether a
//! failure becomes an HTTP error page or fails the whole invocation is decided in a
//! single place, [`HandlerError::response_status`].

use http::StatusCode;
use lambda_runtime::Diagnostic;
use thiserror::Error;

/// Error raised while constructing the handler or resolving a request.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler was constructed with an unusable configuration.
    #[error("{0}")]
    Configuration(String),
    /// The invocation carried no event at all.
    #[error("event object not specified.")]
    MissingEvent,
    /// The event has no usable `path`.
    #[error("Empty path.")]
    EmptyPath,
    /// The event's `path` field is present but is not a string.
    #[error("expected path to be string")]
    PathNotString,
    /// The event matched a proxy shape but one of its fields has the wrong type.
    #[error("malformed proxy event: {0}")]
    MalformedEvent(#[source] serde_json::Error),
    /// `pathParameters` did not hold exactly one greedy path variable.
    #[error("{0}")]
    PathParameter(String),
    /// The event matches neither proxy integration schema.
    #[error("{0}")]
    ProxyIntegration(String),
    /// The requested file does not exist. Carries only the base name of the file.
    #[error("File {file_name} does not exist")]
    NotFound {
        /// Base name of the missing file.
        file_name: String,
    },
    /// Any other failure while loading the requested file.
    #[error("Unable to read client file '{request_path}'. Error: {source}")]
    Io {
        /// Path as requested by the caller, never the resolved local path.
        request_path: String,
        #[source]
        source: std::io::Error,
    },
    /// Template rendering failed.
    #[error("failed to render template: {0}")]
    Render(#[source] mustache::Error),
}

impl HandlerError {
    /// Decides whether this error is answered with an error page.
    ///
    /// Returns the status code of the error response for errors that are recovered
    /// locally, and `None` for errors that must fail the invocation.
    #[must_use]
    pub const fn response_status(&self) -> Option<StatusCode> {
        match self {
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::Configuration(_)
            | Self::MissingEvent
            | Self::EmptyPath
            | Self::PathNotString
            | Self::MalformedEvent(_)
            | Self::PathParameter(_)
            | Self::ProxyIntegration(_)
            | Self::Io { .. }
            | Self::Render(_) => None,
        }
    }

    /// Returns the name of the error variant (e.g., `PathParameter`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::MissingEvent | Self::EmptyPath | Self::PathNotString | Self::MalformedEvent(_) => {
                "ValidationError"
            }
            Self::PathParameter(_) => "PathParameterError",
            Self::ProxyIntegration(_) => "ProxyIntegrationError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Io { .. } => "UnderlyingIOError",
            Self::Render(_) => "RenderError",
        }
    }
}

impl From<mustache::Error> for HandlerError {
    fn from(error: mustache::Error) -> Self {
        Self::Render(error)
    }
}

impl From<HandlerError> for Diagnostic {
    fn from(error: HandlerError) -> Self {
        Self {
            error_type: error.name().to_string(),
            error_message: error.to_string(),
        }
    }
}
