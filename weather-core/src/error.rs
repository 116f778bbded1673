use std::fmt;

use thiserror::Error;

/// User-facing message for every unsuccessful fetch.
pub const FETCH_FAILED_MESSAGE: &str = "City not found";

/// Why a fetch failed. Only used for diagnostics; the user always sees
/// [`FETCH_FAILED_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Provider answered with a non-2xx status.
    Status(u16),
    /// The request never completed, or the body could not be read.
    Transport,
    /// The body did not match the expected weather document.
    Schema,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "status {code}"),
            FailureReason::Transport => f.write_str("transport"),
            FailureReason::Schema => f.write_str("schema"),
        }
    }
}

/// The single error kind produced by the weather fetch step.
#[derive(Debug, Clone, Error)]
#[error("{}", FETCH_FAILED_MESSAGE)]
pub struct FetchFailed {
    reason: FailureReason,
    detail: String,
}

impl FetchFailed {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        Self { reason, detail: detail.into() }
    }

    pub fn status(code: u16, body: &str) -> Self {
        Self::new(FailureReason::Status(code), truncate_body(body))
    }

    pub fn transport(err: impl fmt::Display) -> Self {
        Self::new(FailureReason::Transport, err.to_string())
    }

    pub fn schema(err: impl fmt::Display) -> Self {
        Self::new(FailureReason::Schema, err.to_string())
    }

    pub fn reason(&self) -> FailureReason {
        self.reason
    }

    /// Underlying cause, for logs only.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reason_shows_the_same_message() {
        let errors = [
            FetchFailed::status(404, "{\"cod\":\"404\"}"),
            FetchFailed::status(429, "slow down"),
            FetchFailed::transport("connection refused"),
            FetchFailed::schema("missing field `name`"),
        ];

        for err in errors {
            assert_eq!(err.to_string(), "City not found");
        }
    }

    #[test]
    fn status_keeps_code_and_truncated_body() {
        let body = "x".repeat(500);
        let err = FetchFailed::status(500, &body);

        assert_eq!(err.reason(), FailureReason::Status(500));
        assert_eq!(err.detail().len(), 203);
        assert!(err.detail().ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
