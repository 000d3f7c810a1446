use std::error::Error as StdError;

use crate::domain::{ApiErrorDetail, ValidationError};

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelnyxClient`](crate::TelnyxClient) and its services.
///
/// This error preserves:
/// - HTTP-level failures (transport failures and non-2xx responses, with the
///   decoded Telnyx `errors` array),
/// - parse failures of successful responses,
/// - validation/configuration failures raised before any request is sent.
pub enum TelnyxError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the API.
    #[error("API error: HTTP {status}{}", first_error_summary(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
        body: Option<String>,
    },

    /// Response body could not be parsed as the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The client could not be configured (bad base URL, missing API key, ...).
    #[error("configuration error: {0}")]
    Config(String),
}

fn first_error_summary(errors: &[ApiErrorDetail]) -> String {
    let Some(first) = errors.first() else {
        return String::new();
    };
    let code = first.code.as_deref().unwrap_or("?");
    match first.detail.as_deref().or(first.title.as_deref()) {
        Some(text) => format!(" [{code}] {text}"),
        None => format!(" [{code}]"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Coarse classification of [`TelnyxError::Api`] by HTTP status.
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    PaymentRequired,
    PermissionDenied,
    NotFound,
    Conflict,
    UnprocessableEntity,
    RateLimited,
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            402 => Self::PaymentRequired,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::UnprocessableEntity,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl TelnyxError {
    /// HTTP status for [`TelnyxError::Api`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ApiErrorKind> {
        self.status().map(ApiErrorKind::from_status)
    }

    /// Decoded `errors` array of an API error; empty for every other variant.
    pub fn api_errors(&self) -> &[ApiErrorDetail] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Whether the request may succeed if sent again unchanged.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => matches!(
                ApiErrorKind::from_status(*status),
                ApiErrorKind::RateLimited | ApiErrorKind::Server
            ),
            _ => false,
        }
    }
}
