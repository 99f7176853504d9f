#![forbid(unsafe_code)]

//! HTTP transport for pizza orders.
//!
//! [`HttpSubmitter`] implements [`OrderSubmitter`] by POSTing the draft as JSON
//! to the order endpoint and reading the `{ "message": "..." }` reply.
//!
//! | Reply                              | Result                                |
//! |------------------------------------|---------------------------------------|
//! | 2xx with `{ message }`             | `Ok(SubmitResponse::Success)`         |
//! | non-2xx with `{ message }`         | `Ok(SubmitResponse::Failure)`         |
//! | any status without `{ message }`   | `Err(SubmitError::UnexpectedResponse)`|
//! | connection or I/O failure          | `Err(SubmitError::Transport)`         |
//!
//! No retries are attempted.

mod submitter;

pub use submitter::{DEFAULT_ENDPOINT, HttpSubmitter, HttpSubmitterConfig, interpret_reply};
pub use pizzeria_core::{OrderSubmitter, SubmitError, SubmitResponse};
