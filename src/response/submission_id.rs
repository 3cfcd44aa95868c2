//! Validated submission identifier.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::NotaryError;
use crate::Result;

static VALIDATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("submission id pattern is valid")
});

/// The opaque identifier the notary service assigns to a submission.
///
/// Construction through [`SubmissionId::parse`] is the only validation point;
/// the value is immutable afterwards and two ids are equal iff their
/// underlying strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Validate and wrap an identifier string. The string must match
    /// `[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}`.
    ///
    /// Use this when an id arrives from an external source (CLI argument,
    /// stored state). Ids inside service responses are wrapped without
    /// re-validation.
    pub fn parse(id: impl Into<String>) -> Result<SubmissionId> {
        let id = id.into();
        if VALIDATION_REGEX.is_match(&id) {
            Ok(SubmissionId(id))
        } else {
            Err(NotaryError::MalformedSubmissionId { invalid_id: id })
        }
    }

    /// Wrap an id the service itself returned, skipping validation.
    pub(crate) fn new_unchecked(id: impl Into<String>) -> SubmissionId {
        SubmissionId(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
