//! Wire types for the notary REST contract.
//!
//! These mirror the vendor's JSON schema field-for-field. Unknown top-level
//! fields are tolerated; a missing or mistyped field surfaces as a
//! [`NotaryError::JsonParse`] whose message includes the serde field path.

use serde::{Deserialize, Serialize};

use crate::error::NotaryError;
use crate::Result;

/// An empty object, reserved by the service for future use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {}

/// Response to a `Get Submission Status` request: `{"data": {...}, "meta": {}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResponseJson {
    pub data: SubmissionDataJson,
    #[serde(default)]
    pub meta: Meta,
}

/// Response to a `Get Previous Submissions` request; `data` is an array.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionListResponseJson {
    pub data: Vec<SubmissionDataJson>,
    #[serde(default)]
    pub meta: Meta,
}

/// One submission record as the service describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionDataJson {
    pub attributes: SubmissionAttributesJson,
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Status attributes of a submission. `createdDate` is an ISO-8601 instant
/// like `2022-06-08T01:38:09.498Z`; `status` is one of `Accepted`,
/// `In Progress`, `Invalid` or `Rejected`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionAttributesJson {
    #[serde(rename = "createdDate")]
    pub created_date: String,
    pub name: String,
    pub status: String,
}

/// Response to a `Submit Software` request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmissionResponseJson {
    pub data: NewSubmissionDataJson,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmissionDataJson {
    pub attributes: NewSubmissionAttributesJson,
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Temporary object-storage credentials for uploading the software artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmissionAttributesJson {
    #[serde(rename = "awsAccessKeyId")]
    pub aws_access_key_id: String,
    #[serde(rename = "awsSecretAccessKey")]
    pub aws_secret_access_key: String,
    #[serde(rename = "awsSessionToken")]
    pub aws_session_token: String,
    pub bucket: String,
    #[serde(rename = "object")]
    pub object_key: String,
}

/// Response to a `Get Submission Log` request.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionLogResponseJson {
    pub data: SubmissionLogDataJson,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionLogDataJson {
    pub attributes: SubmissionLogAttributesJson,
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionLogAttributesJson {
    #[serde(rename = "developerLogUrl")]
    pub developer_log_url: String,
}

/// Error body the service returns for structured failures:
/// `{"errors":[{"id","status","code","title","detail"}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponseJson {
    pub errors: Vec<ErrorJson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorJson {
    pub id: String,
    pub status: String,
    pub code: String,
    pub title: String,
    pub detail: String,
}

/// Request body for `Submit Software`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubmissionRequestJson {
    pub notifications: Vec<NotificationJson>,
    pub sha256: String,
    #[serde(rename = "submissionName")]
    pub submission_name: String,
}

/// A completion notification target. The only supported channel is `webhook`.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationJson {
    pub channel: String,
    pub target: String,
}

/// Decode a captured response body into the expected wire type.
///
/// An absent or empty body is a parse error here: every 2xx the service sends
/// for these endpoints carries a JSON payload.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
) -> Result<T> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(NotaryError::JsonParse {
                message: "response body was empty".to_string(),
                raw: raw.map(str::to_owned),
            })
        }
    };
    serde_json::from_str(raw).map_err(|e| NotaryError::JsonParse {
        message: e.to_string(),
        raw: Some(raw.to_string()),
    })
}
