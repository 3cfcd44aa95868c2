//! Bounded polling loop over the status-check operation.
//!
//! The loop blocks the calling thread: fetch, report progress, inspect the
//! status, then either stop on a terminal status, stop at the attempt bound,
//! or sleep for the caller-supplied delay and try again. Errors are not
//! retried; the first pipeline error ends polling. There is no built-in
//! cancellation: a delay function or progress callback that panics propagates
//! to the caller.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::response::SubmissionStatusResponse;
use crate::Result;

/// How a completed polling run ended.
///
/// A timeout is a terminal signal, not an error: the bound was reached
/// without observing a terminal submission status.
#[derive(Debug)]
pub enum PollOutcome {
    /// A terminal status (Accepted, Invalid or Rejected) was observed.
    Completed(SubmissionStatusResponse),
    /// `max_poll_count` attempts all returned a non-terminal status.
    TimedOut {
        max_poll_count: u32,
        message: String,
    },
}

impl PollOutcome {
    /// The status response if polling completed with a terminal status.
    pub fn completed(self) -> Option<SubmissionStatusResponse> {
        match self {
            PollOutcome::Completed(response) => Some(response),
            PollOutcome::TimedOut { .. } => None,
        }
    }
}

fn timed_out(max_poll_count: u32) -> PollOutcome {
    PollOutcome::TimedOut {
        max_poll_count,
        message: format!("Polling max count of {max_poll_count}, has been reached."),
    }
}

/// Drive `fetch` until a terminal status, a fetch error, or the bound.
///
/// Attempt numbering starts at 1 and is passed to both `delay` and
/// `progress`. `progress` runs after every successful fetch, including
/// non-terminal ones; `delay` runs only between attempts, never after the
/// last one.
pub(crate) fn run<F, D, P>(
    mut fetch: F,
    max_poll_count: u32,
    mut delay: D,
    mut progress: P,
) -> Result<PollOutcome>
where
    F: FnMut() -> Result<SubmissionStatusResponse>,
    D: FnMut(u32) -> Duration,
    P: FnMut(u32, &SubmissionStatusResponse),
{
    if max_poll_count == 0 {
        return Ok(timed_out(0));
    }
    for attempt in 1..=max_poll_count {
        let response = fetch()?;
        progress(attempt, &response);

        let status = response.submission_info.status;
        debug!(attempt, %status, "poll attempt finished");
        if status.is_terminal() {
            return Ok(PollOutcome::Completed(response));
        }
        if attempt == max_poll_count {
            return Ok(timed_out(max_poll_count));
        }
        thread::sleep(delay(attempt));
    }
    unreachable!("loop returns at the bound")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_body;
    use crate::error::NotaryError;
    use crate::response::metadata::metadata_for_test;

    fn status_response(status: &str) -> SubmissionStatusResponse {
        let body = format!(
            r#"{{
              "data": {{
                "attributes": {{
                  "createdDate": "2022-06-08T01:38:09.498Z",
                  "name": "app.zip",
                  "status": "{status}"
                }},
                "id": "2efe2717-52ef-43a5-96dc-0797e4ca1041",
                "type": "submissions"
              }},
              "meta": {{}}
            }}"#
        );
        let meta = metadata_for_test(200, Some("application/json"), Some(&body));
        let json = parse_body(meta.raw_body.as_deref()).unwrap();
        SubmissionStatusResponse::new(meta, json)
    }

    /// Fetch closure that serves a scripted sequence of statuses.
    fn scripted(statuses: &[&'static str]) -> impl FnMut() -> Result<SubmissionStatusResponse> {
        let mut remaining: Vec<&str> = statuses.to_vec();
        move || {
            assert!(!remaining.is_empty(), "polled past the scripted responses");
            Ok(status_response(remaining.remove(0)))
        }
    }

    #[test]
    fn test_completes_on_sixth_attempt() {
        let script = [
            "In Progress",
            "In Progress",
            "In Progress",
            "In Progress",
            "In Progress",
            "Accepted",
        ];
        let mut seen = Vec::new();
        let outcome = run(
            scripted(&script),
            10,
            |_| Duration::ZERO,
            |attempt, response| seen.push((attempt, response.submission_info.status)),
        )
        .unwrap();

        let response = outcome.completed().expect("should complete");
        assert_eq!(
            response.submission_info.status,
            crate::response::Status::Accepted
        );
        assert_eq!(seen.len(), 6);
        let attempts: Vec<u32> = seen.iter().map(|(a, _)| *a).collect();
        assert_eq!(attempts, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_times_out_at_bound() {
        let script = ["In Progress"; 5];
        let mut polls = 0u32;
        let mut delays = Vec::new();
        let outcome = run(
            scripted(&script),
            5,
            |attempt| {
                delays.push(attempt);
                Duration::ZERO
            },
            |_, _| polls += 1,
        )
        .unwrap();

        match outcome {
            PollOutcome::TimedOut {
                max_poll_count,
                message,
            } => {
                assert_eq!(max_poll_count, 5);
                assert_eq!(message, "Polling max count of 5, has been reached.");
            }
            PollOutcome::Completed(_) => panic!("should time out"),
        }
        assert_eq!(polls, 5);
        // No delay after the final attempt.
        assert_eq!(delays, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_status_is_non_terminal() {
        let outcome = run(
            scripted(&["Quarantined", "Rejected"]),
            10,
            |_| Duration::ZERO,
            |_, _| {},
        )
        .unwrap();
        let response = outcome.completed().expect("should complete");
        assert_eq!(
            response.submission_info.status,
            crate::response::Status::Rejected
        );
    }

    #[test]
    fn test_first_error_stops_polling() {
        let mut calls = 0u32;
        let mut progressed = 0u32;
        let result = run(
            || {
                calls += 1;
                if calls == 3 {
                    Err(NotaryError::ServerError5xx {
                        status_code: 500,
                        status_message: "Internal Server Error".to_string(),
                        request_url: "https://example.test".to_string(),
                        body: None,
                    })
                } else {
                    Ok(status_response("In Progress"))
                }
            },
            10,
            |_| Duration::ZERO,
            |_, _| progressed += 1,
        );

        assert!(matches!(
            result.unwrap_err(),
            NotaryError::ServerError5xx { .. }
        ));
        assert_eq!(calls, 3);
        assert_eq!(progressed, 2);
    }

    #[test]
    fn test_terminal_on_first_attempt() {
        let mut delays = 0u32;
        let outcome = run(
            scripted(&["Invalid"]),
            10,
            |_| {
                delays += 1;
                Duration::ZERO
            },
            |_, _| {},
        )
        .unwrap();
        assert!(outcome.completed().is_some());
        assert_eq!(delays, 0);
    }

    #[test]
    fn test_zero_bound_times_out_immediately() {
        let outcome = run(scripted(&[]), 0, |_| Duration::ZERO, |_, _| {}).unwrap();
        assert!(matches!(outcome, PollOutcome::TimedOut { .. }));
    }
}
