#![forbid(unsafe_code)]

//! Terminal pizza order form.
//!
//! [`OrderForm`] is the form component: it owns a
//! [`FormState`](pizzeria_core::FormState), maps key presses to form events,
//! renders the form, and hands valid orders to an injected
//! [`OrderSubmitter`](pizzeria_core::OrderSubmitter) on a background task.

pub mod config;
pub mod form_view;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use form_view::{Focus, Msg, OrderForm};
