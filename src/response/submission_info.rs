//! Domain record for one submission.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::api::SubmissionDataJson;
use crate::response::{Status, SubmissionId};

/// Information about the status of a submission.
///
/// Built once per response entry and never mutated. Construction is total:
/// unrecognized status text degrades to [`Status::Unknown`] and an unparseable
/// `createdDate` leaves [`SubmissionInfo::created_date`] as `None`; in both
/// cases the raw text is preserved so callers can recover manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInfo {
    /// The unique identifier for this submission.
    pub id: SubmissionId,
    /// The name given when the submission was started, i.e. the file name.
    pub name: String,
    /// The status of the submission.
    pub status: Status,
    /// The status as text, exactly as returned by the service.
    pub status_text: String,
    /// When the submission process was started. `None` iff the raw text
    /// failed RFC 3339 parsing; use [`SubmissionInfo::created_date_text`]
    /// then.
    pub created_date: Option<DateTime<Utc>>,
    /// The creation date as text, exactly as returned by the service.
    pub created_date_text: String,
}

impl SubmissionInfo {
    pub(crate) fn from_wire(data: &SubmissionDataJson) -> SubmissionInfo {
        let created_date_text = data.attributes.created_date.clone();
        let created_date = match DateTime::parse_from_rfc3339(&created_date_text) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(e) => {
                warn!(
                    created_date = %created_date_text,
                    error = %e,
                    "could not parse 'createdDate' from response, use created_date_text instead"
                );
                None
            }
        };
        let status_text = data.attributes.status.clone();
        SubmissionInfo {
            id: SubmissionId::new_unchecked(&data.id),
            name: data.attributes.name.clone(),
            status: Status::from_text(&status_text),
            status_text,
            created_date,
            created_date_text,
        }
    }
}
