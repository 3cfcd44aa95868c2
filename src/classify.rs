//! Maps a completed HTTP exchange onto the error taxonomy.
//!
//! Transport-level failures (timeout, reset, premature stream end) never
//! reach this module: they become [`NotaryError::Connection`] before a
//! [`ResponseMetadata`] exists.

use tracing::debug;

use crate::api::{self, ErrorResponseJson};
use crate::error::NotaryError;
use crate::response::ResponseMetadata;

/// Classify a non-2xx exchange into exactly one error.
pub(crate) fn classify_failure(meta: &ResponseMetadata) -> NotaryError {
    debug_assert!(!meta.is_success());
    match meta.status_code {
        401 | 403 => NotaryError::Authentication,
        404 => classify_not_found(meta),
        400..=499 => client_error(meta),
        500..=599 => NotaryError::ServerError5xx {
            status_code: meta.status_code,
            status_message: meta.status_message.clone(),
            request_url: meta.request_url.clone(),
            body: meta.raw_body.clone(),
        },
        _ => NotaryError::OtherHttpError {
            status_code: meta.status_code,
            status_message: meta.status_message.clone(),
            request_url: meta.request_url.clone(),
            body: meta.raw_body.clone(),
        },
    }
}

/// A 404 is either the service's structured "no such submission" answer or a
/// plain routing miss. The structured case carries the vendor error schema in
/// a JSON body; the plain case is text/plain or has no body at all.
fn classify_not_found(meta: &ResponseMetadata) -> NotaryError {
    debug!(
        content_type = meta.content_type.as_deref().unwrap_or(""),
        content_length = meta.content_length.unwrap_or(0),
        "classifying 404 response"
    );
    if !is_general_404(meta) {
        if let Ok(parsed) = api::parse_body::<ErrorResponseJson>(meta.raw_body.as_deref()) {
            if let Some(first) = parsed.errors.first() {
                return NotaryError::InvalidSubmissionId {
                    detail: first.detail.clone(),
                };
            }
        }
    }
    client_error(meta)
}

/// A general 404 has a text/plain content type or an empty body; the
/// structured variant always carries a JSON body.
fn is_general_404(meta: &ResponseMetadata) -> bool {
    let plain_text = meta
        .content_type
        .as_deref()
        .map(|ct| ct.to_ascii_lowercase().contains("text/plain"))
        .unwrap_or(false);
    let empty_body = meta.raw_body.as_deref().map_or(true, str::is_empty);
    plain_text || empty_body
}

fn client_error(meta: &ResponseMetadata) -> NotaryError {
    NotaryError::ClientError4xx {
        status_code: meta.status_code,
        status_message: meta.status_message.clone(),
        request_url: meta.request_url.clone(),
        body: meta.raw_body.clone(),
    }
}
