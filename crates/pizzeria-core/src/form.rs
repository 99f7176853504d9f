#![forbid(unsafe_code)]

//! Form State Holder.
//!
//! [`FormState`] is an immutable value: every user input or submission result
//! is a [`FormEvent`], and [`FormState::apply`] returns the next state. The
//! whole-form validity flag that gates the submit control is recomputed after
//! every transition.

use crate::order::{Field, FieldErrors, OrderDraft, Size};
use crate::topping::is_known_topping;
use crate::validation::OrderSchema;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// SubmissionOutcome
// ---------------------------------------------------------------------------

/// Result of the most recent submit attempt, shown as a banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Nothing submitted yet.
    #[default]
    None,
    /// Server accepted the order.
    Success(String),
    /// Server (or transport) rejected the order.
    Failure(String),
}

impl SubmissionOutcome {
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        match self {
            Self::Success(msg) => Some(msg),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ToppingPolicy
// ---------------------------------------------------------------------------

/// How topping checkbox changes mutate the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToppingPolicy {
    /// A checked topping is appended once; unchecking never removes it.
    #[default]
    AddOnly,
    /// Checking appends, unchecking removes.
    Toggle,
}

impl ToppingPolicy {
    /// Parse a configuration value (`add-only` or `toggle`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add-only" | "add_only" | "addonly" => Some(Self::AddOnly),
            "toggle" => Some(Self::Toggle),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FormEvent
// ---------------------------------------------------------------------------

/// Everything that can change the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A text or select field received a new value.
    ///
    /// Any string may be sent. The value is validated as given, but the
    /// draft only ever keeps a size code from [`Size`] or the empty string.
    FieldChanged { field: Field, value: String },
    /// A topping checkbox changed.
    ToppingChanged { id: String, checked: bool },
    /// The server accepted the order with this message.
    SubmitSucceeded { message: String },
    /// The order was rejected with this message.
    SubmitFailed { message: String },
}

impl FormEvent {
    /// Convenience constructor for [`FormEvent::FieldChanged`].
    #[must_use]
    pub fn field(field: Field, value: impl Into<String>) -> Self {
        Self::FieldChanged {
            field,
            value: value.into(),
        }
    }

    /// Convenience constructor for [`FormEvent::ToppingChanged`].
    #[must_use]
    pub fn topping(id: impl Into<String>, checked: bool) -> Self {
        Self::ToppingChanged {
            id: id.into(),
            checked,
        }
    }
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Snapshot of the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    draft: OrderDraft,
    errors: FieldErrors,
    outcome: SubmissionOutcome,
    valid: bool,
    policy: ToppingPolicy,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ToppingPolicy::default())
    }
}

impl FormState {
    /// Fresh form: empty draft, no errors, nothing submitted.
    #[must_use]
    pub fn new(policy: ToppingPolicy) -> Self {
        Self {
            draft: OrderDraft::default(),
            errors: FieldErrors::default(),
            outcome: SubmissionOutcome::None,
            valid: false,
            policy,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn policy(&self) -> ToppingPolicy {
        self.policy
    }

    /// Whole-form validity flag.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.valid
    }

    /// Compute the next state.
    #[must_use]
    pub fn apply(self, event: FormEvent) -> Self {
        let mut next = self.transition(event);
        next.valid = OrderSchema::global().is_valid(&next.draft);
        next
    }

    fn transition(mut self, event: FormEvent) -> Self {
        match event {
            FormEvent::FieldChanged { field, value } => {
                let result = OrderSchema::global().validate_field(field, &value);
                match result.error_message() {
                    Some(message) => {
                        debug!(field = field.name(), %message, "field rejected");
                        self.errors.set(field, message);
                    }
                    None => {
                        debug!(field = field.name(), "field accepted");
                        self.errors.clear(field);
                    }
                }
                let value = match field {
                    Field::FullName => value,
                    Field::Size => Size::parse(&value).map_or("", Size::code).to_string(),
                };
                self.draft = self.draft.with_value(field, value);
            }
            FormEvent::ToppingChanged { id, checked } => {
                if !is_known_topping(&id) {
                    warn!(topping = %id, "ignoring unknown topping");
                    return self;
                }
                self.draft = match (self.policy, checked) {
                    (_, true) => self.draft.with_topping(id),
                    (ToppingPolicy::Toggle, false) => self.draft.without_topping(&id),
                    (ToppingPolicy::AddOnly, false) => {
                        debug!(topping = %id, "uncheck ignored under add-only policy");
                        self.draft
                    }
                };
            }
            FormEvent::SubmitSucceeded { message } => {
                info!(%message, "order accepted");
                self.draft = OrderDraft::default();
                self.errors = FieldErrors::default();
                self.outcome = SubmissionOutcome::Success(message);
            }
            FormEvent::SubmitFailed { message } => {
                warn!(%message, "order rejected");
                self.outcome = SubmissionOutcome::Failure(message);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FULL_NAME_TOO_SHORT, SIZE_INCORRECT};
    use pretty_assertions::assert_eq;

    fn filled() -> FormState {
        FormState::default()
            .apply(FormEvent::field(Field::FullName, "John Smith"))
            .apply(FormEvent::field(Field::Size, "M"))
    }

    #[test]
    fn starts_empty_and_disabled() {
        let state = FormState::default();
        assert_eq!(state.draft(), &OrderDraft::default());
        assert!(state.errors().is_clear());
        assert_eq!(state.outcome(), &SubmissionOutcome::None);
        assert!(!state.can_submit());
    }

    #[test]
    fn field_change_sets_only_that_fields_error() {
        let state = FormState::default().apply(FormEvent::field(Field::FullName, "Jo"));
        assert_eq!(state.errors().get(Field::FullName), FULL_NAME_TOO_SHORT);
        assert_eq!(state.errors().get(Field::Size), "");
        assert_eq!(state.draft().full_name, "Jo");

        let state = state.apply(FormEvent::field(Field::Size, "XL"));
        assert_eq!(state.errors().get(Field::FullName), FULL_NAME_TOO_SHORT);
        assert_eq!(state.errors().get(Field::Size), SIZE_INCORRECT);

        let state = state.apply(FormEvent::field(Field::FullName, "Joan"));
        assert_eq!(state.errors().get(Field::FullName), "");
        assert_eq!(state.errors().get(Field::Size), SIZE_INCORRECT);
    }

    #[test]
    fn draft_keeps_only_size_codes() {
        let state = FormState::default().apply(FormEvent::field(Field::Size, "XL"));
        assert_eq!(state.draft().size, "");
        assert_eq!(state.errors().get(Field::Size), SIZE_INCORRECT);

        let state = state.apply(FormEvent::field(Field::Size, " M "));
        assert_eq!(state.draft().size, "M");
        assert_eq!(state.errors().get(Field::Size), "");
    }

    #[test]
    fn short_name_keeps_submit_disabled() {
        let state = FormState::default()
            .apply(FormEvent::field(Field::FullName, "Jo"))
            .apply(FormEvent::field(Field::Size, "M"));
        assert!(!state.can_submit());
    }

    #[test]
    fn valid_fields_enable_submit() {
        assert!(filled().can_submit());
    }

    #[test]
    fn add_only_ignores_uncheck() {
        let state = filled()
            .apply(FormEvent::topping("1", true))
            .apply(FormEvent::topping("1", false))
            .apply(FormEvent::topping("1", true));
        assert_eq!(state.draft().toppings, vec!["1"]);
    }

    #[test]
    fn toggle_policy_removes_on_uncheck() {
        let state = FormState::new(ToppingPolicy::Toggle)
            .apply(FormEvent::topping("2", true))
            .apply(FormEvent::topping("4", true))
            .apply(FormEvent::topping("2", false));
        assert_eq!(state.draft().toppings, vec!["4"]);
    }

    #[test]
    fn unknown_topping_is_ignored() {
        let state = filled().apply(FormEvent::topping("9", true));
        assert!(state.draft().toppings.is_empty());
    }

    #[test]
    fn success_resets_draft_and_shows_message() {
        let state = filled()
            .apply(FormEvent::topping("1", true))
            .apply(FormEvent::SubmitFailed {
                message: "Out of stock".into(),
            })
            .apply(FormEvent::SubmitSucceeded {
                message: "Order placed".into(),
            });
        assert_eq!(state.draft(), &OrderDraft::default());
        assert_eq!(state.outcome().success_message(), Some("Order placed"));
        assert_eq!(state.outcome().failure_message(), None);
        assert!(!state.can_submit());
    }

    #[test]
    fn failure_keeps_draft_and_replaces_success() {
        let before = filled()
            .apply(FormEvent::SubmitSucceeded {
                message: "Order placed".into(),
            })
            .apply(FormEvent::field(Field::FullName, "Jane Doe"))
            .apply(FormEvent::field(Field::Size, "L"));
        let draft = before.draft().clone();
        let after = before.apply(FormEvent::SubmitFailed {
            message: "Out of stock".into(),
        });
        assert_eq!(after.draft(), &draft);
        assert_eq!(after.outcome().failure_message(), Some("Out of stock"));
        assert_eq!(after.outcome().success_message(), None);
        assert!(after.can_submit());
    }

    #[test]
    fn policy_parse() {
        assert_eq!(ToppingPolicy::parse("toggle"), Some(ToppingPolicy::Toggle));
        assert_eq!(ToppingPolicy::parse(" Add-Only "), Some(ToppingPolicy::AddOnly));
        assert_eq!(ToppingPolicy::parse("remove"), None);
    }
}
