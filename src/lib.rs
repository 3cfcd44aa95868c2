//! # notary-client
//!
//! Client library for the Apple notary web service. It authenticates
//! requests with a signed bearer token, submits software for notarization,
//! polls for completion, and retrieves the developer log.
//!
//! ## Overview
//!
//! The client can be used to:
//! - submit software to be notarized: [`NotaryClient::submit_software`]
//! - check the status of a submission: [`NotaryClient::get_submission_status`]
//! - poll a submission until it settles: [`NotaryClient::poll_submission_status`]
//! - view the history of submissions: [`NotaryClient::get_previous_submissions`]
//! - fetch the developer log: [`NotaryClient::get_submission_log`]
//!
//! All operations are synchronous: each call performs one blocking network
//! round trip on the caller's thread and returns `Result<T, NotaryError>`.
//! Errors are values; nothing in this crate panics on service misbehavior.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use notary_client::{NotaryClient, SubmissionId};
//!
//! fn main() -> Result<(), notary_client::NotaryError> {
//!     let client = NotaryClient::builder()
//!         .issuer_id("57246542-96fe-1a63-e053-0824d011072a")
//!         .key_id("2X9R4HXF34")
//!         .private_key_file("/keys/AuthKey_2X9R4HXF34.p8")
//!         .build()?;
//!
//!     let submission = client.submit_software("MyApp.zip".as_ref())?;
//!     // ... upload MyApp.zip with the returned credentials, then:
//!     let outcome = client.poll_submission_status(
//!         &submission.id,
//!         20,
//!         |_attempt| Duration::from_secs(30),
//!     )?;
//!     if let Some(done) = outcome.completed() {
//!         println!("{}", done.submission_info.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The client, its builder and the request pipeline |
//! | [`auth`] | Bearer-token signing, expiry and refresh |
//! | [`response`] | Domain records and response envelopes |
//! | [`poll`] | Bounded polling loop and its outcome type |
//! | [`api`] | Wire types mirroring the service's JSON schema |
//! | [`error`] | The error taxonomy |

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod poll;
pub mod response;

mod classify;

// Re-export main types for convenience
pub use auth::{SignedToken, TokenManager};
pub use client::{NotaryClient, NotaryClientBuilder};
pub use error::NotaryError;
pub use poll::PollOutcome;
pub use response::{
    NewSubmissionResponse, ResponseMetadata, Status, SubmissionId, SubmissionInfo,
    SubmissionListResponse, SubmissionLogResponse, SubmissionStatusResponse,
};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, NotaryError>;
