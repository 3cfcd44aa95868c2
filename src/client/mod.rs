//! The notary client and its request pipeline.
//!
//! Every operation runs the same pipeline: obtain a valid bearer token,
//! build the request with the auth and identifying headers, perform one
//! blocking transport call, capture the response metadata exactly once,
//! classify the outcome, and build the call-specific response envelope.

mod builder;
mod execute;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use url::Url;

use crate::api::{self, NewSubmissionRequestJson};
use crate::auth::TokenManager;
use crate::classify::classify_failure;
use crate::error::NotaryError;
use crate::poll::{self, PollOutcome};
use crate::response::{
    NewSubmissionResponse, SubmissionId, SubmissionListResponse, SubmissionLogResponse,
    SubmissionStatusResponse,
};
use crate::Result;

pub use builder::NotaryClientBuilder;

/// Base URL of the notary web service.
pub(crate) const BASE_URL: &str = "https://appstoreconnect.apple.com/notary/v2";

/// The submissions endpoint path segment.
const ENDPOINT_SEGMENT: &str = "submissions";

/// The logs path segment, appended for `get_submission_log`.
const LOGS_SEGMENT: &str = "logs";

/// Default `User-Agent` value, e.g. `notary-client/0.1.0`.
pub(crate) const USER_AGENT_VALUE: &str = concat!("notary-client/", env!("CARGO_PKG_VERSION"));

/// Client for the notary web service.
///
/// Submit software for notarization, check or poll the status of a
/// submission, list previous submissions, and retrieve the developer log.
///
/// All operations are synchronous and block the calling thread for one
/// network round trip. The cached bearer token is the only mutable state;
/// the client is intended for single-threaded use per instance.
pub struct NotaryClient {
    pub(crate) http: reqwest::blocking::Client,
    pub(crate) base_url: Url,
    pub(crate) token_manager: TokenManager,
    pub(crate) user_agent: String,
}

impl std::fmt::Debug for NotaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // TokenManager holds the signing key and cannot derive Debug.
        f.debug_struct("NotaryClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl NotaryClient {
    /// Start building a client.
    pub fn builder() -> NotaryClientBuilder {
        NotaryClientBuilder::new()
    }

    /// Tell the notary service about a new software submission.
    ///
    /// Computes the SHA-256 of the file at `software_path` and posts it with
    /// the file name. The response carries the submission id to track the
    /// submission and temporary credentials for uploading the file itself;
    /// this client does not perform the upload.
    pub fn submit_software(&self, software_path: &Path) -> Result<NewSubmissionResponse> {
        let submission_name = software_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| NotaryError::Configuration {
                message: format!("software path has no file name: {}", software_path.display()),
            })?;
        let sha256 = sha256_hex(software_path)?;
        debug!(%submission_name, %sha256, "submitting software");

        let body = NewSubmissionRequestJson {
            notifications: Vec::new(),
            sha256,
            submission_name,
        };
        let url = self.endpoint_url(&[ENDPOINT_SEGMENT]);
        let meta = self.execute_post(url, &body)?;
        if meta.is_success() {
            let json = api::parse_body(meta.raw_body.as_deref())?;
            Ok(NewSubmissionResponse::new(meta, json))
        } else {
            Err(classify_failure(&meta))
        }
    }

    /// Fetch the status of a notarization submission.
    pub fn get_submission_status(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<SubmissionStatusResponse> {
        let url = self.endpoint_url(&[ENDPOINT_SEGMENT, submission_id.as_str()]);
        let meta = self.execute_get(url)?;
        if meta.is_success() {
            let json = api::parse_body(meta.raw_body.as_deref())?;
            Ok(SubmissionStatusResponse::new(meta, json))
        } else {
            Err(classify_failure(&meta))
        }
    }

    /// Fetch the list of the team's previous submissions. The service
    /// returns at most the 100 most recent ones.
    pub fn get_previous_submissions(&self) -> Result<SubmissionListResponse> {
        let url = self.endpoint_url(&[ENDPOINT_SEGMENT]);
        let meta = self.execute_get(url)?;
        if meta.is_success() {
            let json = api::parse_body(meta.raw_body.as_deref())?;
            Ok(SubmissionListResponse::new(meta, json))
        } else {
            Err(classify_failure(&meta))
        }
    }

    /// Fetch a temporary URL for the developer log of a completed
    /// submission. Use the URL promptly; it expires after a few hours.
    pub fn get_submission_log(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<SubmissionLogResponse> {
        let url = self.endpoint_url(&[ENDPOINT_SEGMENT, submission_id.as_str(), LOGS_SEGMENT]);
        let meta = self.execute_get(url)?;
        if meta.is_success() {
            let json = api::parse_body(meta.raw_body.as_deref())?;
            Ok(SubmissionLogResponse::new(meta, json))
        } else {
            Err(classify_failure(&meta))
        }
    }

    /// Fetch the developer log URL and download the log itself as a string.
    ///
    /// The download is unauthenticated: the temporary URL is the credential.
    pub fn retrieve_submission_log(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<String> {
        let response = self.get_submission_log(submission_id)?;
        let url = response.developer_log_url.ok_or_else(|| {
            NotaryError::SubmissionLog(format!(
                "service returned an unusable log URL: {}",
                response.developer_log_url_text
            ))
        })?;
        debug!(%url, "downloading submission log");
        let meta = self.execute_unauthenticated_get(url)?;
        if meta.is_success() {
            Ok(meta.raw_body.unwrap_or_default())
        } else {
            Err(classify_failure(&meta))
        }
    }

    /// Download the developer log and save it to `location`.
    pub fn download_submission_log(
        &self,
        submission_id: &SubmissionId,
        location: &Path,
    ) -> Result<PathBuf> {
        let log = self.retrieve_submission_log(submission_id)?;
        fs::write(location, log).map_err(|e| {
            warn!(path = %location.display(), error = %e, "could not save submission log");
            NotaryError::SubmissionLog(format!(
                "error saving submission log to {}: {e}",
                location.display()
            ))
        })?;
        Ok(location.to_path_buf())
    }

    /// Poll `get_submission_status` until a terminal status or the bound.
    ///
    /// `delay` maps the 1-based attempt index to the pause before the next
    /// attempt, so fixed delays, exponential backoff and zero-delay tests
    /// are all expressible. The first error ends polling; errors are not
    /// retried.
    pub fn poll_submission_status<D>(
        &self,
        submission_id: &SubmissionId,
        max_poll_count: u32,
        delay: D,
    ) -> Result<PollOutcome>
    where
        D: FnMut(u32) -> Duration,
    {
        self.poll_submission_status_with_progress(submission_id, max_poll_count, delay, |_, _| {})
    }

    /// Like [`NotaryClient::poll_submission_status`], additionally invoking
    /// `progress` after every successful poll with the attempt index and the
    /// response, including non-terminal ones.
    pub fn poll_submission_status_with_progress<D, P>(
        &self,
        submission_id: &SubmissionId,
        max_poll_count: u32,
        delay: D,
        progress: P,
    ) -> Result<PollOutcome>
    where
        D: FnMut(u32) -> Duration,
        P: FnMut(u32, &SubmissionStatusResponse),
    {
        poll::run(
            || self.get_submission_status(submission_id),
            max_poll_count,
            delay,
            progress,
        )
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base url is validated at build time")
            .pop_if_empty()
            .extend(segments);
        url
    }
}

fn sha256_hex(path: &Path) -> Result<String> {
    let read = |e: io::Error| NotaryError::Configuration {
        message: format!("cannot read software file {}: {e}", path.display()),
    };
    let mut file = fs::File::open(path).map_err(read)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(read)?;
    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sha256_hex_known_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        assert_eq!(
            sha256_hex(file.path()).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_missing_file() {
        let err = sha256_hex(Path::new("/definitely/not/here.zip")).unwrap_err();
        assert!(matches!(err, NotaryError::Configuration { .. }));
    }
}
