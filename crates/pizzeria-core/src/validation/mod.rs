#![forbid(unsafe_code)]

//! Field validation for the order form.
//!
//! Validation is built from small composable validators ([`Required`],
//! [`MinLength`], [`MaxLength`], [`OneOf`]) glued together with [`All`] and
//! [`Trimmed`]. [`OrderSchema`] assembles them into the rules for each
//! validated field of an [`OrderDraft`](crate::OrderDraft).
//!
//! ```rust
//! use pizzeria_core::{Field, OrderSchema};
//!
//! let schema = OrderSchema::global();
//! assert!(schema.validate_field(Field::FullName, "  Ada  ").is_valid());
//! assert_eq!(
//!     schema.validate_field(Field::Size, "XL").error_message().as_deref(),
//!     Some("size must be S or M or L"),
//! );
//! ```

mod schema;
mod validators;

pub use schema::{
    FULL_NAME_MAX, FULL_NAME_MIN, FULL_NAME_REQUIRED, FULL_NAME_TOO_LONG, FULL_NAME_TOO_SHORT,
    OrderSchema, SIZE_INCORRECT,
};
pub use validators::{
    All, ERROR_CODE_MAX_LENGTH, ERROR_CODE_MIN_LENGTH, ERROR_CODE_ONE_OF, ERROR_CODE_REQUIRED,
    MaxLength, MinLength, OneOf, Required, Trimmed, ValidationError, ValidationResult, Validator,
};
