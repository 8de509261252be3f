//! Error types for the SES relay.
//!
//! The error taxonomy is deliberately small. A send either fails to reach
//! the remote endpoint at all ([`RelayError::Transport`]), is rejected by
//! the service with a structured code and message
//! ([`RelayError::RemoteService`]), or returns a response body that matches
//! neither the success nor the error shape
//! ([`RelayError::UnknownResponse`]).
//!
//! Expected conditions inside the mail pipeline (missing optional header
//! fields, attachments that don't match the data-URI pattern) are defaulted
//! or dropped silently and never surface here.
//!
//! # Examples
//!
//! ```rust
//! use ses_relay::RelayError;
//!
//! fn describe(error: &RelayError) {
//!     if let Some(code) = error.error_code() {
//!         println!("service rejected the message: {}", code);
//!     } else if error.is_transport() {
//!         println!("never reached the endpoint");
//!     }
//! }
//! ```

use thiserror::Error;

/// Error code reported for responses that match neither the success nor
/// the error shape.
pub const UNKNOWN_ERROR_CODE: &str = "unknown";

/// Top-level error type for the SES relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Network or HTTP-layer failure reaching the SES endpoint.
    ///
    /// Propagated unchanged from the transport; never retried by this
    /// crate.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service returned a structured error inside the response body.
    ///
    /// The code and message are surfaced verbatim from the `<Error>`
    /// element of the XML response.
    #[error("SES error: {code} - {message}")]
    RemoteService {
        /// Error code reported by SES (e.g. "MessageRejected").
        code: String,
        /// Human-readable error message reported by SES.
        message: String,
    },

    /// The response parsed but matched neither the success nor the error
    /// shape.
    #[error("Unknown response from SES")]
    UnknownResponse,
}

impl RelayError {
    /// Returns the structured error code, if this failure carries one.
    ///
    /// [`RelayError::UnknownResponse`] reports the fixed
    /// [`UNKNOWN_ERROR_CODE`]; transport failures carry no code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ses_relay::RelayError;
    ///
    /// let error = RelayError::RemoteService {
    ///     code: "MessageRejected".to_string(),
    ///     message: "Email address is not verified".to_string(),
    /// };
    /// assert_eq!(error.error_code(), Some("MessageRejected"));
    /// assert_eq!(RelayError::UnknownResponse.error_code(), Some("unknown"));
    /// ```
    pub fn error_code(&self) -> Option<&str> {
        match self {
            RelayError::RemoteService { code, .. } => Some(code.as_str()),
            RelayError::UnknownResponse => Some(UNKNOWN_ERROR_CODE),
            RelayError::Transport { .. } => None,
        }
    }

    /// Returns true if the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, RelayError::Transport { .. })
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for relay operations.
pub type RelayResult<T> = std::result::Result<T, RelayError>;
