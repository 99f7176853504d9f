//! Property-based checks for the order validation rules and form transitions.
//!
//! 1. Full names whose trimmed length is in [3, 20] validate.
//! 2. Shorter trimmed names fail with the too-short (or required) message.
//! 3. Longer trimmed names fail with the too-long message.
//! 4. Size validates iff its trimmed value is S, M, or L.
//! 5. The whole-form flag equals the conjunction of the two field checks.
//! 6. The draft's size is always "", S, M, or L.
//! 7. Toppings never contain duplicates, whatever checkbox sequence arrives.
//! 8. Under the add-only policy toppings only grow.
//! 9. A failed submission never changes the draft.

use pizzeria_core::validation::{
    FULL_NAME_REQUIRED, FULL_NAME_TOO_LONG, FULL_NAME_TOO_SHORT, SIZE_INCORRECT,
};
use pizzeria_core::{Field, FormEvent, FormState, OrderSchema, ToppingPolicy};
use proptest::prelude::*;
use std::collections::HashSet;

// ── Strategies ────────────────────────────────────────────────────────────

fn padding() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n']), 0..4)
        .prop_map(|chars| chars.into_iter().collect())
}

fn name_core(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'Z', 'é', '-', '\'', ' ', 'ß', 'q']),
        len,
    )
    .prop_map(|chars| chars.into_iter().collect::<String>())
    // keep the trimmed length equal to the generated length
    .prop_filter("no edge whitespace", |s| s.trim() == s)
}

fn size_value() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["S", "M", "L", "", "XL", "m", "Small"])
            .prop_map(str::to_string),
        (padding(), prop::sample::select(vec!["S", "M", "L"]), padding())
            .prop_map(|(a, s, b)| format!("{a}{s}{b}")),
        "[A-Za-z ]{0,4}",
    ]
}

fn form_event() -> impl Strategy<Value = FormEvent> {
    prop_oneof![
        name_core(0..25).prop_map(|v| FormEvent::field(Field::FullName, v)),
        size_value().prop_map(|v| FormEvent::field(Field::Size, v)),
        (prop::sample::select(vec!["1", "2", "3", "4", "5", "6"]), any::<bool>())
            .prop_map(|(id, checked)| FormEvent::topping(id, checked)),
    ]
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn names_within_bounds_validate(core in name_core(3..21), l in padding(), r in padding()) {
        let value = format!("{l}{core}{r}");
        prop_assert!(OrderSchema::global().validate_field(Field::FullName, &value).is_valid());
    }

    #[test]
    fn short_names_fail(core in name_core(0..3), l in padding(), r in padding()) {
        let value = format!("{l}{core}{r}");
        let msg = OrderSchema::global().validate_field(Field::FullName, &value).error_message();
        let expected = if core.is_empty() { FULL_NAME_REQUIRED } else { FULL_NAME_TOO_SHORT };
        prop_assert_eq!(msg.as_deref(), Some(expected));
    }

    #[test]
    fn long_names_fail(core in name_core(21..40)) {
        let msg = OrderSchema::global().validate_field(Field::FullName, &core).error_message();
        prop_assert_eq!(msg.as_deref(), Some(FULL_NAME_TOO_LONG));
    }

    #[test]
    fn size_validates_iff_in_closed_set(value in size_value()) {
        let ok = matches!(value.trim(), "S" | "M" | "L");
        let result = OrderSchema::global().validate_field(Field::Size, &value);
        prop_assert_eq!(result.is_valid(), ok);
        if !ok {
            let msg = result.error_message();
            prop_assert_eq!(msg.as_deref(), Some(SIZE_INCORRECT));
        }
    }

    #[test]
    fn whole_form_flag_is_field_conjunction(events in prop::collection::vec(form_event(), 0..30)) {
        let schema = OrderSchema::global();
        let state = events.into_iter().fold(FormState::default(), FormState::apply);
        let draft = state.draft();
        let expected = schema.validate_field(Field::FullName, &draft.full_name).is_valid()
            && schema.validate_field(Field::Size, &draft.size).is_valid();
        prop_assert_eq!(state.can_submit(), expected);
    }

    #[test]
    fn draft_size_stays_in_closed_set(events in prop::collection::vec(form_event(), 0..30)) {
        let state = events.into_iter().fold(FormState::default(), FormState::apply);
        prop_assert!(matches!(state.draft().size.as_str(), "" | "S" | "M" | "L"));
    }

    #[test]
    fn toppings_never_duplicate(
        toggle in any::<bool>(),
        events in prop::collection::vec(form_event(), 0..40),
    ) {
        let policy = if toggle { ToppingPolicy::Toggle } else { ToppingPolicy::AddOnly };
        let state = events.into_iter().fold(FormState::new(policy), FormState::apply);
        let unique: HashSet<_> = state.draft().toppings.iter().collect();
        prop_assert_eq!(unique.len(), state.draft().toppings.len());
    }

    #[test]
    fn add_only_toppings_only_grow(events in prop::collection::vec(form_event(), 0..40)) {
        let mut state = FormState::default();
        for event in events {
            let before = state.draft().toppings.clone();
            state = state.apply(event);
            prop_assert!(state.draft().toppings.starts_with(&before));
        }
    }

    #[test]
    fn failure_leaves_draft_alone(
        events in prop::collection::vec(form_event(), 0..20),
        message in "[a-zA-Z ]{1,20}",
    ) {
        let state = events.into_iter().fold(FormState::default(), FormState::apply);
        let draft = state.draft().clone();
        let state = state.apply(FormEvent::SubmitFailed { message: message.clone() });
        prop_assert_eq!(state.draft(), &draft);
        prop_assert_eq!(state.outcome().failure_message(), Some(message.as_str()));
    }
}
