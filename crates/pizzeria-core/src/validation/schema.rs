#![forbid(unsafe_code)]

//! Acceptance rules for the order form fields.

use super::validators::{
    All, MaxLength, MinLength, OneOf, Required, Trimmed, ValidationResult, Validator,
};
use crate::order::{Field, FieldErrors, OrderDraft, Size};
use std::sync::OnceLock;

/// Minimum full name length, after trimming.
pub const FULL_NAME_MIN: usize = 3;
/// Maximum full name length, after trimming.
pub const FULL_NAME_MAX: usize = 20;

/// Reported when the full name is blank.
pub const FULL_NAME_REQUIRED: &str = "full name is required";
/// Reported when the trimmed full name is shorter than [`FULL_NAME_MIN`].
pub const FULL_NAME_TOO_SHORT: &str = "full name must be at least 3 characters";
/// Reported when the trimmed full name is longer than [`FULL_NAME_MAX`].
pub const FULL_NAME_TOO_LONG: &str = "full name must be at most 20 characters";
/// Reported for any size outside S, M, L (including none).
pub const SIZE_INCORRECT: &str = "size must be S or M or L";

/// Validation rules for every validated field of an order.
///
/// Toppings carry no rule: any subset of the catalog, including none, is
/// acceptable and never blocks submission.
#[derive(Debug)]
pub struct OrderSchema {
    full_name: Trimmed<All<str>>,
    size: Trimmed<OneOf>,
}

impl OrderSchema {
    #[must_use]
    pub fn new() -> Self {
        let full_name = All::default()
            .then(Required::new().with_message(FULL_NAME_REQUIRED))
            .then(
                MinLength::new(FULL_NAME_MIN)
                    .with_message("full name must be at least {min} characters"),
            )
            .then(
                MaxLength::new(FULL_NAME_MAX)
                    .with_message("full name must be at most {max} characters"),
            );
        let size = OneOf::new(Size::ALL.map(Size::code)).with_message("size must be {allowed}");
        Self {
            full_name: Trimmed::new(full_name),
            size: Trimmed::new(size),
        }
    }

    /// Process-wide schema instance.
    pub fn global() -> &'static OrderSchema {
        static SCHEMA: OnceLock<OrderSchema> = OnceLock::new();
        SCHEMA.get_or_init(OrderSchema::new)
    }

    /// Validate a candidate value for one field.
    #[must_use]
    pub fn validate_field(&self, field: Field, value: &str) -> ValidationResult {
        match field {
            Field::FullName => self.full_name.validate(value),
            Field::Size => self.size.validate(value),
        }
    }

    /// Validate by wire name. Names without rules (checkboxes) return `None`.
    #[must_use]
    pub fn validate_field_named(&self, name: &str, value: &str) -> Option<ValidationResult> {
        Field::from_name(name).map(|field| self.validate_field(field, value))
    }

    /// Messages for every field of `draft` that fails its rule.
    #[must_use]
    pub fn validate(&self, draft: &OrderDraft) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in Field::ALL {
            if let Some(message) = self.validate_field(field, draft.value(field)).error_message() {
                errors.set(field, message);
            }
        }
        errors
    }

    /// Whole-form validity: every validated field passes.
    #[must_use]
    pub fn is_valid(&self, draft: &OrderDraft) -> bool {
        Field::ALL
            .into_iter()
            .all(|field| self.validate_field(field, draft.value(field)).is_valid())
    }
}

impl Default for OrderSchema {
    fn default() -> Self {
        Self::new()
    }
}
