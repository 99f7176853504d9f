#![forbid(unsafe_code)]

//! Core model for the pizza order form.
//!
//! This crate holds everything about an order that can be decided without
//! touching a terminal or a network:
//!
//! - [`order`]: the in-progress [`OrderDraft`] and its field names
//! - [`topping`]: the fixed topping catalog
//! - [`validation`]: composable validators and the [`OrderSchema`]
//! - [`form`]: the Form State Holder, a pure `state = f(prev, event)` reducer
//! - [`submit`]: the contract an order transport must fulfil
//!
//! # Example
//!
//! ```rust
//! use pizzeria_core::{Field, FormEvent, FormState};
//!
//! let state = FormState::default()
//!     .apply(FormEvent::field(Field::FullName, "John Smith"))
//!     .apply(FormEvent::field(Field::Size, "M"))
//!     .apply(FormEvent::topping("1", true));
//!
//! assert!(state.can_submit());
//! assert_eq!(state.draft().toppings, vec!["1".to_string()]);
//! ```

pub mod form;
pub mod order;
pub mod submit;
pub mod topping;
pub mod validation;

pub use form::{FormEvent, FormState, SubmissionOutcome, ToppingPolicy};
pub use order::{Field, FieldErrors, OrderDraft, SIZE_CHOICES, Size};
pub use submit::{FnSubmitter, OrderSubmitter, SubmitError, SubmitResponse, outcome_event};
pub use topping::{TOPPINGS, ToppingOption, is_known_topping, topping_by_id};
pub use validation::OrderSchema;
