//! Polling against a mock server.

mod common;

use std::time::Duration;

use notary_client::{NotaryError, Status};

use common::{status_body, submission_id, test_client, SUBMISSION_ID};

#[test]
fn test_poll_completes_on_terminal_status() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", format!("/submissions/{SUBMISSION_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(status_body("Accepted"))
        .create();

    let client = test_client(&server.url());
    let outcome = client
        .poll_submission_status(&submission_id(), 10, |_| Duration::ZERO)
        .unwrap();

    let done = outcome.completed().expect("should complete");
    assert_eq!(done.submission_info.status, Status::Accepted);
}

#[test]
fn test_poll_times_out_after_bound() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", format!("/submissions/{SUBMISSION_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(status_body("In Progress"))
        .expect(3)
        .create();

    let client = test_client(&server.url());
    let mut seen = Vec::new();
    let outcome = client
        .poll_submission_status_with_progress(
            &submission_id(),
            3,
            |_| Duration::ZERO,
            |attempt, response| seen.push((attempt, response.submission_info.status)),
        )
        .unwrap();

    mock.assert();
    assert_eq!(
        seen,
        vec![
            (1, Status::InProgress),
            (2, Status::InProgress),
            (3, Status::InProgress),
        ]
    );
    match outcome {
        notary_client::PollOutcome::TimedOut {
            max_poll_count,
            message,
        } => {
            assert_eq!(max_poll_count, 3);
            assert_eq!(message, "Polling max count of 3, has been reached.");
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

#[test]
fn test_poll_stops_on_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", format!("/submissions/{SUBMISSION_ID}").as_str())
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create();

    let client = test_client(&server.url());
    let err = client
        .poll_submission_status(&submission_id(), 5, |_| Duration::ZERO)
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, NotaryError::ServerError5xx { .. }));
}
