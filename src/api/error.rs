//! Typed errors for the extraction service client.

use thiserror::Error;

use crate::types::ApiErrorBody;

/// Errors surfaced by [`crate::api::ExtractionClient`].
///
/// None of these are fatal: the calling step sets the processing status to
/// `error`, shows the message with a retry affordance, and the user can
/// always fall back to entering items by hand.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The service answered with a non-2xx status and an error body.
    #[error("extraction failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// The request never completed (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered 2xx but the body did not decode.
    #[error("invalid response from extraction service: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build an `Http` error from a decoded service error body.
    pub fn from_body(status: u16, body: ApiErrorBody) -> Self {
        ApiError::Http {
            status,
            message: body.error,
            details: body.details,
        }
    }

    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::Http { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_status_and_details() {
        let err = ApiError::from_body(
            422,
            ApiErrorBody {
                error: "could not read receipt".into(),
                details: Some("image too blurry".into()),
            },
        );
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.details(), Some("image too blurry"));
        assert_eq!(
            err.to_string(),
            "extraction failed (422): could not read receipt"
        );
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.details(), None);
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
