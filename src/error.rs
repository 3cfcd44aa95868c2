//! Unified error type for the notary client.
//!
//! Every public operation returns `Result<T, NotaryError>`; errors are values,
//! never panics. HTTP-class variants carry the status line, request URL and
//! raw body so callers can diagnose failures without re-issuing the request.

use thiserror::Error;

/// Tagged union covering every failure the client can surface.
///
/// A polling timeout is deliberately *not* represented here: reaching the
/// attempt bound is a terminal signal of [`crate::poll::PollOutcome`], not a
/// failure of any single call.
#[derive(Debug, Clone, Error)]
pub enum NotaryError {
    /// The private key file could not be found.
    #[error("private key file not found: {path}")]
    PrivateKeyNotFound { path: String },

    /// The key material could not be decoded into an EC private key.
    #[error("invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// Token signing failed for a reason other than bad key material.
    #[error("error creating signed token: {message}")]
    TokenCreation { message: String },

    /// HTTP 401 or 403. Insufficient authorization is indistinguishable from
    /// bad credentials at this layer, so both map here.
    #[error("authentication failed, check that the issuer id, key id and private key are correct")]
    Authentication,

    /// An identifier string that fails the fixed pattern, caught at
    /// construction time before any network call.
    #[error("malformed submission id: {invalid_id}")]
    MalformedSubmissionId { invalid_id: String },

    /// HTTP 404 with the vendor's structured error body: the id was
    /// syntactically valid but unknown to the service.
    #[error("{detail}")]
    InvalidSubmissionId { detail: String },

    /// Any other HTTP 4xx response.
    #[error("client error {status_code} from {request_url}")]
    ClientError4xx {
        status_code: u16,
        status_message: String,
        request_url: String,
        body: Option<String>,
    },

    /// HTTP 5xx response.
    #[error("server error {status_code} from {request_url}")]
    ServerError5xx {
        status_code: u16,
        status_message: String,
        request_url: String,
        body: Option<String>,
    },

    /// Any other non-2xx response.
    #[error("unexpected HTTP status {status_code} from {request_url}")]
    OtherHttpError {
        status_code: u16,
        status_message: String,
        request_url: String,
        body: Option<String>,
    },

    /// Transport-level failure: timeout, connection reset, premature stream
    /// end. The message text is passed through from the transport, not
    /// reinterpreted.
    #[error("connection error: {0}")]
    Connection(String),

    /// A body was present but structurally wrong for the expected schema.
    /// The raw string is retained for postmortem.
    #[error("error parsing response body: {message}")]
    JsonParse {
        message: String,
        raw: Option<String>,
    },

    /// Failure retrieving or saving the developer log from its temporary URL.
    #[error("submission log error: {0}")]
    SubmissionLog(String),

    /// Client construction or caller-input problem detected before any
    /// network call (bad base URL, unreadable software file).
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl NotaryError {
    /// Status code for HTTP-class variants, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NotaryError::ClientError4xx { status_code, .. }
            | NotaryError::ServerError5xx { status_code, .. }
            | NotaryError::OtherHttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Raw response body for HTTP-class variants, if one was captured.
    pub fn body(&self) -> Option<&str> {
        match self {
            NotaryError::ClientError4xx { body, .. }
            | NotaryError::ServerError5xx { body, .. }
            | NotaryError::OtherHttpError { body, .. } => body.as_deref(),
            NotaryError::JsonParse { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }
}
