#![forbid(unsafe_code)]

//! Contract between the form and whatever delivers an order.
//!
//! The form never talks to a network directly. It hands an [`OrderDraft`] to an
//! [`OrderSubmitter`] and turns the two-outcome [`SubmitResponse`] (or a
//! [`SubmitError`]) into a [`FormEvent`].

use crate::form::FormEvent;
use crate::order::OrderDraft;
use std::fmt;

/// What the order endpoint said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    /// Accepted; `message` is shown verbatim.
    Success { message: String },
    /// Rejected with a `{ message }` body; `message` is shown verbatim.
    Failure { message: String },
}

impl SubmitResponse {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Convert into the event that updates the form.
    #[must_use]
    pub fn into_event(self) -> FormEvent {
        match self {
            Self::Success { message } => FormEvent::SubmitSucceeded { message },
            Self::Failure { message } => FormEvent::SubmitFailed { message },
        }
    }
}

/// A submission that produced no `{ message }` to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request could not be built, sent, or read.
    Transport(String),
    /// The server answered with something other than a `{ message }` body.
    UnexpectedResponse { status: u16, body: String },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "order submission failed: {msg}"),
            Self::UnexpectedResponse { status, body } if body.is_empty() => {
                write!(f, "order submission failed: unexpected response (status {status})")
            }
            Self::UnexpectedResponse { status, body } => write!(
                f,
                "order submission failed: unexpected response (status {status}): {body}"
            ),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Result of a submit attempt, folded into a single form event.
///
/// Errors become a failure banner carrying the error text.
#[must_use]
pub fn outcome_event(result: Result<SubmitResponse, SubmitError>) -> FormEvent {
    match result {
        Ok(response) => response.into_event(),
        Err(err) => FormEvent::SubmitFailed {
            message: err.to_string(),
        },
    }
}

/// Delivers an order somewhere and reports what happened.
///
/// Implementations are called from a background task, so they must be
/// shareable across threads.
pub trait OrderSubmitter: Send + Sync {
    /// Send `draft` and wait for the verdict.
    fn submit(&self, draft: &OrderDraft) -> Result<SubmitResponse, SubmitError>;
}

/// Adapter turning a closure into an [`OrderSubmitter`].
///
/// ```rust
/// use pizzeria_core::{FnSubmitter, OrderDraft, OrderSubmitter, SubmitResponse};
///
/// let fake = FnSubmitter::new(|draft: &OrderDraft| {
///     Ok(SubmitResponse::success(format!("thanks {}", draft.full_name)))
/// });
/// let draft = OrderDraft { full_name: "Ada".into(), ..OrderDraft::default() };
/// assert_eq!(fake.submit(&draft), Ok(SubmitResponse::success("thanks Ada")));
/// ```
pub struct FnSubmitter<F> {
    f: F,
}

impl<F> FnSubmitter<F>
where
    F: Fn(&OrderDraft) -> Result<SubmitResponse, SubmitError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> OrderSubmitter for FnSubmitter<F>
where
    F: Fn(&OrderDraft) -> Result<SubmitResponse, SubmitError> + Send + Sync,
{
    fn submit(&self, draft: &OrderDraft) -> Result<SubmitResponse, SubmitError> {
        (self.f)(draft)
    }
}

impl<F> fmt::Debug for FnSubmitter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubmitter").finish_non_exhaustive()
    }
}
