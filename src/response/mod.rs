//! Domain records and response envelopes built from service payloads.

pub(crate) mod envelopes;
pub(crate) mod metadata;
pub(crate) mod status;
pub(crate) mod submission_id;
pub(crate) mod submission_info;

pub use envelopes::{
    NewSubmissionResponse, SubmissionListResponse, SubmissionLogResponse, SubmissionStatusResponse,
};
pub use metadata::ResponseMetadata;
pub use status::Status;
pub use submission_id::SubmissionId;
pub use submission_info::SubmissionInfo;
