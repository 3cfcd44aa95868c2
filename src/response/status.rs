//! Submission status values.

use std::fmt;

/// Status of a submission as reported by the notary service.
///
/// Any status text that does not case-insensitively match a known value maps
/// to [`Status::Unknown`]; the raw text is preserved alongside it in
/// [`crate::response::SubmissionInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Accepted,
    InProgress,
    Invalid,
    Rejected,
    /// Fallback for status text the client does not recognize.
    Unknown,
}

impl Status {
    /// Parse status text case-insensitively. `"In-Progress"` is accepted as a
    /// synonym for `"In Progress"`.
    pub fn from_text(text: &str) -> Status {
        if text.eq_ignore_ascii_case("Accepted") {
            Status::Accepted
        } else if text.eq_ignore_ascii_case("In Progress") || text.eq_ignore_ascii_case("In-Progress") {
            Status::InProgress
        } else if text.eq_ignore_ascii_case("Invalid") {
            Status::Invalid
        } else if text.eq_ignore_ascii_case("Rejected") {
            Status::Rejected
        } else {
            Status::Unknown
        }
    }

    /// Whether no further state change is expected after this status.
    ///
    /// `Unknown` is treated as non-terminal: the service may still settle on
    /// a recognized value.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Accepted | Status::Invalid | Status::Rejected)
    }

    /// The display name the service uses for this status.
    pub fn display_name(self) -> &'static str {
        match self {
            Status::Accepted => "Accepted",
            Status::InProgress => "In Progress",
            Status::Invalid => "Invalid",
            Status::Rejected => "Rejected",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
