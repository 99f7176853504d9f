//! Headless scenarios for the order form, driven through `ProgramSimulator`
//! with a recording fake submitter.

use pizzeria::{Focus, Msg, OrderForm};
use pizzeria_core::{
    Field, FnSubmitter, FormEvent, OrderDraft, SubmitError, SubmitResponse, ToppingPolicy,
};
use pizzeria_runtime::{
    CmdRecord, Event, KeyCode, KeyEvent, Modifiers, ProgramSimulator, StyleFlags,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

type Sent = Arc<Mutex<Vec<OrderDraft>>>;

fn simulator(
    policy: ToppingPolicy,
    reply: Result<SubmitResponse, SubmitError>,
) -> (ProgramSimulator<OrderForm>, Sent) {
    let sent: Sent = Arc::default();
    let log = Arc::clone(&sent);
    let fake = FnSubmitter::new(move |draft: &OrderDraft| {
        log.lock().expect("sent lock").push(draft.clone());
        reply.clone()
    });
    let mut sim = ProgramSimulator::new(OrderForm::new(Arc::new(fake), policy));
    sim.init();
    (sim, sent)
}

fn press(sim: &mut ProgramSimulator<OrderForm>, code: KeyCode) {
    sim.inject_event(Event::key(code));
}

fn type_text(sim: &mut ProgramSimulator<OrderForm>, text: &str) {
    for c in text.chars() {
        press(sim, KeyCode::Char(c));
    }
}

fn tab(sim: &mut ProgramSimulator<OrderForm>, times: usize) {
    for _ in 0..times {
        press(sim, KeyCode::Tab);
    }
}

/// Fill in "John Smith", Medium, Pepperoni and Pineapple using the keyboard
/// and leave focus on the submit control.
fn fill_sample_order(sim: &mut ProgramSimulator<OrderForm>) {
    type_text(sim, "John Smith");
    tab(sim, 1);
    press(sim, KeyCode::Char('m'));
    tab(sim, 1);
    press(sim, KeyCode::Char(' '));
    tab(sim, 2);
    press(sim, KeyCode::Enter);
    tab(sim, 3);
    assert_eq!(sim.model().focus(), Focus::Submit);
}

fn sample_draft() -> OrderDraft {
    OrderDraft {
        full_name: "John Smith".into(),
        size: "M".into(),
        toppings: vec!["1".into(), "3".into()],
    }
}

#[test]
fn initial_form_layout() {
    let (mut sim, _) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    let frame = sim.render(60, 20);
    assert_eq!(
        frame.buffer.to_lines(),
        vec![
            "Order Your Pizza",
            "",
            "Full Name",
            "› Type full name",
            "",
            "Size",
            "  < ----Choose Size---- >",
            "",
            "  [ ] Pepperoni",
            "  [ ] Green Peppers",
            "  [ ] Pineapple",
            "  [ ] Mushrooms",
            "  [ ] Ham",
            "",
            "  [ Submit ] (disabled)",
            "",
            "Tab move · Space toggle · Enter submit · Esc quit",
        ]
    );
    assert_eq!(frame.cursor, Some((2, 3)));
    let submit = frame.buffer.get(2, 14).expect("submit cell");
    assert!(submit.style.has(StyleFlags::DIM));
}

#[test]
fn short_name_keeps_submit_disabled() {
    let (mut sim, sent) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    type_text(&mut sim, "Jo");
    tab(&mut sim, 1);
    press(&mut sim, KeyCode::Char('m'));

    let state = sim.model().state();
    assert_eq!(
        state.errors().get(Field::FullName),
        "full name must be at least 3 characters"
    );
    assert_eq!(state.errors().get(Field::Size), "");
    assert!(!state.can_submit());

    let buf = sim.capture_frame(60, 20);
    assert!(buf.find_row("full name must be at least 3 characters").is_some());
    assert!(buf.find_row("< Medium >").is_some());
    assert!(buf.find_row("(disabled)").is_some());

    sim.model_mut().set_focus(Focus::Submit);
    press(&mut sim, KeyCode::Enter);
    sim.send(Msg::Submit);
    assert_eq!(sim.task_count(), 0);
    assert!(sent.lock().expect("sent lock").is_empty());
}

#[test]
fn successful_order_posts_draft_and_resets() {
    let (mut sim, sent) = simulator(
        ToppingPolicy::AddOnly,
        Ok(SubmitResponse::success("Order placed")),
    );
    fill_sample_order(&mut sim);
    assert!(sim.model().state().can_submit());
    assert!(sim.capture_frame(60, 20).find_row("(disabled)").is_none());

    press(&mut sim, KeyCode::Enter);

    assert_eq!(*sent.lock().expect("sent lock"), vec![sample_draft()]);
    assert!(
        sim.command_log()
            .contains(&CmdRecord::Task("submit-order".into()))
    );
    let state = sim.model().state();
    assert_eq!(state.draft(), &OrderDraft::default());
    assert!(state.errors().is_clear());
    assert_eq!(state.outcome().success_message(), Some("Order placed"));
    assert!(!state.can_submit());

    let buf = sim.capture_frame(60, 20);
    assert_eq!(buf.row_text(2), "Order placed");
    assert!(buf.find_row("Type full name").is_some());
    assert!(buf.find_row("[x]").is_none());
}

#[test]
fn rejected_order_keeps_draft() {
    let (mut sim, sent) = simulator(
        ToppingPolicy::AddOnly,
        Ok(SubmitResponse::failure("Out of stock")),
    );
    fill_sample_order(&mut sim);
    press(&mut sim, KeyCode::Enter);

    assert_eq!(sent.lock().expect("sent lock").len(), 1);
    let state = sim.model().state();
    assert_eq!(state.draft(), &sample_draft());
    assert_eq!(state.outcome().failure_message(), Some("Out of stock"));
    assert!(state.can_submit());

    let buf = sim.capture_frame(60, 20);
    assert_eq!(buf.row_text(2), "Out of stock");
    assert!(buf.find_row("John Smith").is_some());
    assert!(buf.find_row("[x] Pepperoni").is_some());
    assert!(buf.find_row("[x] Pineapple").is_some());
}

#[test]
fn transport_error_becomes_failure_banner() {
    let (mut sim, _) = simulator(
        ToppingPolicy::AddOnly,
        Err(SubmitError::Transport("connection refused".into())),
    );
    fill_sample_order(&mut sim);
    press(&mut sim, KeyCode::Enter);

    let state = sim.model().state();
    assert_eq!(state.draft(), &sample_draft());
    let message = state.outcome().failure_message().expect("failure banner");
    assert!(message.contains("connection refused"), "{message}");
}

#[test]
fn success_replaces_earlier_failure() {
    let (mut sim, _) = simulator(
        ToppingPolicy::AddOnly,
        Ok(SubmitResponse::success("Order placed")),
    );
    sim.send(Msg::Form(FormEvent::SubmitFailed {
        message: "Out of stock".into(),
    }));
    fill_sample_order(&mut sim);
    press(&mut sim, KeyCode::Enter);

    let buf = sim.capture_frame(60, 20);
    assert!(buf.find_row("Out of stock").is_none());
    assert!(buf.find_row("Order placed").is_some());
}

#[test]
fn add_only_checkbox_cannot_be_unchecked() {
    let (mut sim, _) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    sim.model_mut().set_focus(Focus::Topping(4));
    press(&mut sim, KeyCode::Char(' '));
    press(&mut sim, KeyCode::Char(' '));
    assert_eq!(sim.model().state().draft().toppings, vec!["5".to_string()]);
    assert!(sim.capture_frame(60, 20).find_row("[x] Ham").is_some());
}

#[test]
fn toggle_policy_unchecks() {
    let (mut sim, _) = simulator(ToppingPolicy::Toggle, Ok(SubmitResponse::success("ok")));
    sim.model_mut().set_focus(Focus::Topping(1));
    press(&mut sim, KeyCode::Char(' '));
    assert_eq!(sim.model().state().draft().toppings, vec!["2".to_string()]);
    press(&mut sim, KeyCode::Char(' '));
    assert!(sim.model().state().draft().toppings.is_empty());
    assert!(sim.capture_frame(60, 20).find_row("[ ] Green Peppers").is_some());
}

#[test]
fn escape_and_ctrl_c_quit() {
    let (mut sim, _) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    press(&mut sim, KeyCode::Escape);
    assert!(!sim.is_running());

    let (mut sim, _) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    type_text(&mut sim, "c");
    assert!(sim.is_running());
    sim.inject_event(Event::Key(
        KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
    ));
    assert!(!sim.is_running());
    assert_eq!(sim.model().state().draft().full_name, "c");
}

#[test]
fn back_tab_walks_focus_backwards() {
    let (mut sim, _) = simulator(ToppingPolicy::AddOnly, Ok(SubmitResponse::success("ok")));
    press(&mut sim, KeyCode::BackTab);
    assert_eq!(sim.model().focus(), Focus::Submit);
    press(&mut sim, KeyCode::Up);
    assert_eq!(sim.model().focus(), Focus::Topping(4));
    let buf = sim.capture_frame(60, 20);
    assert_eq!(buf.row_text(12), "› [ ] Ham");
}
