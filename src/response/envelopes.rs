//! Call-specific response envelopes.
//!
//! Each envelope pairs the parsed payload with the [`ResponseMetadata`] of the
//! exchange that produced it, so callers always have the status line, headers
//! and raw body for diagnostics.

use chrono::{DateTime, Utc};
use tracing::warn;
use url::Url;

use crate::api::{
    NewSubmissionResponseJson, SubmissionListResponseJson, SubmissionLogResponseJson,
    SubmissionResponseJson,
};
use crate::response::{ResponseMetadata, SubmissionId, SubmissionInfo};

/// Response from the `Submit Software` endpoint: the submission id plus the
/// temporary object-storage credentials for uploading the artifact.
#[derive(Debug, Clone)]
pub struct NewSubmissionResponse {
    pub metadata: ResponseMetadata,
    /// The unique identifier for this submission.
    pub id: SubmissionId,
    /// An access key for the object-storage upload call.
    pub aws_access_key_id: String,
    /// A secret key for the object-storage upload call.
    pub aws_secret_access_key: String,
    /// A session token for the object-storage upload call.
    pub aws_session_token: String,
    /// The bucket to upload the software into.
    pub bucket: String,
    /// The object key that identifies the upload within the bucket.
    pub object_key: String,
}

impl NewSubmissionResponse {
    pub(crate) fn new(metadata: ResponseMetadata, json: NewSubmissionResponseJson) -> Self {
        NewSubmissionResponse {
            metadata,
            id: SubmissionId::new_unchecked(json.data.id),
            aws_access_key_id: json.data.attributes.aws_access_key_id,
            aws_secret_access_key: json.data.attributes.aws_secret_access_key,
            aws_session_token: json.data.attributes.aws_session_token,
            bucket: json.data.attributes.bucket,
            object_key: json.data.attributes.object_key,
        }
    }

    /// When the client received the response.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.metadata.received_at
    }
}

/// Response from the `Get Submission Status` endpoint.
#[derive(Debug, Clone)]
pub struct SubmissionStatusResponse {
    pub metadata: ResponseMetadata,
    /// Information about the status of the submission.
    pub submission_info: SubmissionInfo,
}

impl SubmissionStatusResponse {
    pub(crate) fn new(metadata: ResponseMetadata, json: SubmissionResponseJson) -> Self {
        SubmissionStatusResponse {
            metadata,
            submission_info: SubmissionInfo::from_wire(&json.data),
        }
    }

    /// When the client received the response.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.metadata.received_at
    }
}

/// Response from the `Get Previous Submissions` endpoint. The service returns
/// at most the 100 most recent submissions; an empty list is valid.
#[derive(Debug, Clone)]
pub struct SubmissionListResponse {
    pub metadata: ResponseMetadata,
    /// One entry per submission, in the order the service returned them.
    pub submissions: Vec<SubmissionInfo>,
}

impl SubmissionListResponse {
    pub(crate) fn new(metadata: ResponseMetadata, json: SubmissionListResponseJson) -> Self {
        let submissions = json.data.iter().map(SubmissionInfo::from_wire).collect();
        SubmissionListResponse {
            metadata,
            submissions,
        }
    }

    /// When the client received the response.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.metadata.received_at
    }
}

/// Response from the `Get Submission Log` endpoint.
///
/// The URL the service returns is temporary; fetch the log promptly or ask
/// for the URL again later.
#[derive(Debug, Clone)]
pub struct SubmissionLogResponse {
    pub metadata: ResponseMetadata,
    /// The submission the log belongs to.
    pub id: SubmissionId,
    /// The log URL, if the text the service returned parses as a URL.
    pub developer_log_url: Option<Url>,
    /// The log URL as text, exactly as returned by the service.
    pub developer_log_url_text: String,
}

impl SubmissionLogResponse {
    pub(crate) fn new(metadata: ResponseMetadata, json: SubmissionLogResponseJson) -> Self {
        let developer_log_url_text = json.data.attributes.developer_log_url;
        let developer_log_url = match Url::parse(&developer_log_url_text) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    url = %developer_log_url_text,
                    error = %e,
                    "could not parse 'developerLogUrl' from response"
                );
                None
            }
        };
        SubmissionLogResponse {
            metadata,
            id: SubmissionId::new_unchecked(json.data.id),
            developer_log_url,
            developer_log_url_text,
        }
    }

    /// When the client received the response.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.metadata.received_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_body;
    use crate::response::metadata::metadata_for_test;
    use crate::response::Status;

    #[test]
    fn test_status_envelope() {
        let body = r#"{
          "data": {
            "attributes": {
              "createdDate": "2022-06-08T01:38:09.498Z",
              "name": "app.zip",
              "status": "In Progress"
            },
            "id": "2efe2717-52ef-43a5-96dc-0797e4ca1041",
            "type": "submissions"
          },
          "meta": {}
        }"#;
        let meta = metadata_for_test(200, Some("application/json"), Some(body));
        let json = parse_body(meta.raw_body.as_deref()).unwrap();
        let resp = SubmissionStatusResponse::new(meta, json);
        assert_eq!(resp.submission_info.status, Status::InProgress);
        assert_eq!(
            resp.submission_info.id.as_str(),
            "2efe2717-52ef-43a5-96dc-0797e4ca1041"
        );
    }

    #[test]
    fn test_list_envelope_preserves_order() {
        let body = r#"{
          "data": [
            {"attributes": {"createdDate": "2022-06-08T01:38:09.498Z", "name": "first.zip", "status": "Accepted"},
             "id": "2efe2717-52ef-43a5-96dc-0797e4ca1041", "type": "submissions"},
            {"attributes": {"createdDate": "2022-06-09T01:38:09.498Z", "name": "second.zip", "status": "Rejected"},
             "id": "1efe2717-52ef-43a5-96dc-0797e4ca1041", "type": "submissions"}
          ],
          "meta": {}
        }"#;
        let meta = metadata_for_test(200, Some("application/json"), Some(body));
        let json = parse_body(meta.raw_body.as_deref()).unwrap();
        let resp = SubmissionListResponse::new(meta, json);
        assert_eq!(resp.submissions.len(), 2);
        assert_eq!(resp.submissions[0].name, "first.zip");
        assert_eq!(resp.submissions[1].name, "second.zip");
    }

    #[test]
    fn test_log_envelope_malformed_url_degrades() {
        let body = r#"{
          "data": {
            "attributes": {"developerLogUrl": "not a url"},
            "id": "2efe2717-52ef-43a5-96dc-0797e4ca1041",
            "type": "submissionsLog"
          },
          "meta": {}
        }"#;
        let meta = metadata_for_test(200, Some("application/json"), Some(body));
        let json = parse_body(meta.raw_body.as_deref()).unwrap();
        let resp = SubmissionLogResponse::new(meta, json);
        assert!(resp.developer_log_url.is_none());
        assert_eq!(resp.developer_log_url_text, "not a url");
    }
}
