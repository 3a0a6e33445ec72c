//! Error kinds surfaced by a single lookup.
//!
//! Every variant ends the current action; nothing is retried. The CLI shows
//! [`LookupError::user_message`] and logs the `Display` form, which may carry
//! more detail.

use thiserror::Error;

/// Message shown for every fetch failure, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Sorry, we couldn't find that location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city or ZIP code.")]
    MissingLocation,

    #[error("Please select both a start and end date.")]
    MissingDate,

    #[error("Dates cannot be in the past.")]
    DateInPast,

    #[error("End date cannot be before start date.")]
    InvertedRange,

    #[error("Please select a date range within 10 days.")]
    RangeTooLong { days: i64 },
}

impl ValidationError {
    /// Short machine-friendly reason.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingLocation => "missing location",
            ValidationError::MissingDate => "missing date",
            ValidationError::DateInPast => "date in past",
            ValidationError::InvertedRange => "inverted range",
            ValidationError::RangeTooLong { .. } => "range too long",
        }
    }
}

/// Transport or status failure talking to the provider.
///
/// The variants exist for logs only; users always see [`FETCH_FAILED_MESSAGE`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to forecast provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("forecast provider returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("forecast provider returned an unreadable body: {0}")]
    Body(String),
}

/// A field the renderer needs is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed forecast response at `{path}`: {message}")]
pub struct MalformedResponse {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl LookupError {
    /// Plain text for the user.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Validation(err) => err.to_string(),
            LookupError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
            LookupError::Malformed(_) => {
                "Sorry, the forecast service sent an incomplete response.".to_string()
            }
        }
    }
}
