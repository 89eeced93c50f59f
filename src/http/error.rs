//! Error taxonomy for backend API calls.

use reqwest::StatusCode;

/// Errors surfaced by the data-access layer.
///
/// Every failure a caller can observe is folded into one of these classes so
/// that page code can branch on the class instead of parsing messages.
#[derive(Debug)]
pub enum ApiError {
    /// Required input missing or malformed; raised before any network attempt.
    Validation(String),
    /// Upstream responded 404 for a singular-resource lookup.
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    /// The call did not complete within its deadline.
    Timeout(String),
    /// No response received at all (DNS or connection failure).
    Network(String),
    /// Upstream responded with a server error (HTTP 500 and above).
    Server { status: u16, message: String },
    /// Upstream responded with a client error other than 404.
    Client { status: u16, message: String },
}

impl ApiError {
    /// Whether the retry policy may re-attempt after this error.
    /// Only transient failure classes qualify; client errors never do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_) | ApiError::Network(_) | ApiError::Server { .. }
        )
    }

    /// The HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => {
                write!(f, "Invalid request: {}", msg)
            }
            ApiError::NotFound {
                resource,
                identifier,
            } => {
                write!(f, "No {} found for '{}'", resource, identifier)
            }
            ApiError::Timeout(msg) => {
                write!(f, "Request timed out: {}", msg)
            }
            ApiError::Network(msg) => {
                write!(f, "Network error: {}. The backend could not be reached.", msg)
            }
            ApiError::Server { status, message } => {
                write!(f, "Backend error (HTTP {}): {}", status, message)
            }
            ApiError::Client { status, message } => {
                write!(f, "Request rejected (HTTP {}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a reqwest error into the taxonomy.
///
/// Status-bearing errors (from `error_for_status`) map to Server/Client by
/// range; errors without a response map to Timeout or Network.
pub fn classify_error(error: &reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        let message = status
            .canonical_reason()
            .unwrap_or("unrecognized status")
            .to_string();
        if status.is_server_error() {
            return ApiError::Server {
                status: status.as_u16(),
                message,
            };
        }
        return ApiError::Client {
            status: status.as_u16(),
            message,
        };
    }

    if error.is_timeout() {
        return ApiError::Timeout(error.to_string());
    }

    ApiError::Network(error.to_string())
}

/// Adapter for `map_err`: folds a reqwest failure into the taxonomy so that
/// retry classification can downcast it later.
pub fn normalize(error: reqwest::Error) -> anyhow::Error {
    anyhow::Error::from(classify_error(&error))
}

/// Adapter for `map_err` on the body-read phase: a deadline that fires while
/// the response body is streaming surfaces from reqwest's decode call, so it
/// is folded into `Timeout` here. Genuine decode failures keep a decode
/// context instead.
pub fn normalize_decode(error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        normalize(error)
    } else {
        anyhow::Error::new(error).context("Failed to decode JSON response from backend")
    }
}

/// Rewrites a transport-level 404 into a domain-aware `NotFound` carrying the
/// resource type and the identifier the caller asked for. Any other error
/// passes through unchanged.
pub fn not_found_as(
    error: anyhow::Error,
    resource: &'static str,
    identifier: &str,
) -> anyhow::Error {
    match error.downcast_ref::<ApiError>() {
        Some(api) if api.status() == Some(StatusCode::NOT_FOUND.as_u16()) => {
            anyhow::Error::from(ApiError::NotFound {
                resource,
                identifier: identifier.to_string(),
            })
        }
        _ => error,
    }
}
