#![forbid(unsafe_code)]

//! The order form component.
//!
//! # Controls
//!
//! | Key                 | Effect                                           |
//! |---------------------|--------------------------------------------------|
//! | Tab / Down          | next control                                     |
//! | Shift-Tab / Up      | previous control                                 |
//! | printable, Bkspc    | edit the full name                               |
//! | Left / Right, Space | change the size (S, M, L also select directly)   |
//! | Space / Enter       | toggle the focused topping, press submit         |
//! | Esc / Ctrl-C        | quit                                             |
//!
//! Submission is not de-duplicated: pressing submit again before the first
//! reply arrives sends a second request.

use pizzeria_core::{
    Field, FormEvent, FormState, OrderSubmitter, SIZE_CHOICES, TOPPINGS, ToppingPolicy,
    outcome_event,
};
use pizzeria_runtime::{Cmd, Color, Event, Frame, KeyCode, KeyEvent, KeyEventKind, Model, Style};
use std::sync::Arc;
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

const TITLE: &str = "Order Your Pizza";
const NAME_PLACEHOLDER: &str = "Type full name";
const SUBMIT_LABEL: &str = "[ Submit ]";
const HELP: &str = "Tab move · Space toggle · Enter submit · Esc quit";

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FullName,
    Size,
    /// Index into the topping catalog.
    Topping(usize),
    Submit,
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::FullName => Self::Size,
            Self::Size => Self::Topping(0),
            Self::Topping(i) if i + 1 < TOPPINGS.len() => Self::Topping(i + 1),
            Self::Topping(_) => Self::Submit,
            Self::Submit => Self::FullName,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::FullName => Self::Submit,
            Self::Size => Self::FullName,
            Self::Topping(0) => Self::Size,
            Self::Topping(i) => Self::Topping(i - 1),
            Self::Submit => Self::Topping(TOPPINGS.len() - 1),
        }
    }
}

/// Messages understood by [`OrderForm`].
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Paste(String),
    /// Apply a form event directly (also how submit results arrive).
    Form(FormEvent),
    /// Press the submit control.
    Submit,
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => Msg::Noop,
            Event::Key(key) if key.code == KeyCode::Escape => Msg::Quit,
            Event::Key(key) if key.ctrl() && key.is_char('c') => Msg::Quit,
            Event::Key(key) => Msg::Key(key),
            Event::Paste(text) => Msg::Paste(text),
            Event::Resize { .. } => Msg::Noop,
        }
    }
}

/// Pizza order form.
pub struct OrderForm {
    state: FormState,
    focus: Focus,
    submitter: Arc<dyn OrderSubmitter>,
}

impl OrderForm {
    pub fn new(submitter: Arc<dyn OrderSubmitter>, policy: ToppingPolicy) -> Self {
        Self {
            state: FormState::new(policy),
            focus: Focus::FullName,
            submitter,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Move focus. A topping index past the catalog lands on the last topping.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = match focus {
            Focus::Topping(i) => Focus::Topping(i.min(TOPPINGS.len() - 1)),
            other => other,
        };
    }

    fn apply(&mut self, event: FormEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    fn submit(&self) -> Cmd<Msg> {
        if !self.state.can_submit() {
            debug!("submit pressed while disabled");
            return Cmd::none();
        }
        let draft = self.state.draft().clone();
        let submitter = Arc::clone(&self.submitter);
        info!(size = %draft.size, toppings = draft.toppings.len(), "submitting order");
        Cmd::task("submit-order", move || {
            Msg::Form(outcome_event(submitter.submit(&draft)))
        })
    }

    fn on_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return Cmd::none();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return Cmd::none();
            }
            _ => {}
        }
        match self.focus {
            Focus::FullName => self.on_name_key(key),
            Focus::Size => self.on_size_key(key),
            Focus::Topping(index) => {
                if !matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    return Cmd::none();
                }
                let Some(topping) = TOPPINGS.get(index) else {
                    return Cmd::none();
                };
                let checked = !self.state.draft().has_topping(topping.id);
                self.apply(FormEvent::topping(topping.id, checked));
                Cmd::none()
            }
            Focus::Submit => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => self.submit(),
                _ => Cmd::none(),
            },
        }
    }

    fn on_name_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        let current = &self.state.draft().full_name;
        let value = match key.code {
            KeyCode::Char(c) if !key.ctrl() => format!("{current}{c}"),
            KeyCode::Backspace => {
                let mut graphemes: Vec<&str> = current.graphemes(true).collect();
                if graphemes.pop().is_none() {
                    return Cmd::none();
                }
                graphemes.concat()
            }
            KeyCode::Enter => {
                self.focus = self.focus.next();
                return Cmd::none();
            }
            _ => return Cmd::none(),
        };
        self.apply(FormEvent::field(Field::FullName, value));
        Cmd::none()
    }

    fn on_size_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        let current = SIZE_CHOICES
            .iter()
            .position(|(value, _)| *value == self.state.draft().size)
            .unwrap_or(0);
        let len = SIZE_CHOICES.len();
        let next = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => (current + 1) % len,
            KeyCode::Left => (current + len - 1) % len,
            KeyCode::Char(c) => match SIZE_CHOICES
                .iter()
                .position(|(value, _)| value.eq_ignore_ascii_case(&c.to_string()))
            {
                Some(i) if i > 0 => i,
                _ => return Cmd::none(),
            },
            KeyCode::Enter => {
                self.focus = self.focus.next();
                return Cmd::none();
            }
            _ => return Cmd::none(),
        };
        self.apply(FormEvent::field(Field::Size, SIZE_CHOICES[next].0));
        Cmd::none()
    }

    fn marker(&self, focus: Focus) -> &'static str {
        if self.focus == focus { "› " } else { "  " }
    }
}

impl Model for OrderForm {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => self.on_key(key),
            Msg::Paste(text) => {
                if self.focus == Focus::FullName {
                    let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                    let value = format!("{}{pasted}", self.state.draft().full_name);
                    self.apply(FormEvent::field(Field::FullName, value));
                }
                Cmd::none()
            }
            Msg::Form(event) => {
                self.apply(event);
                Cmd::none()
            }
            Msg::Submit => self.submit(),
            Msg::Quit => Cmd::quit(),
            Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let label = Style::new().fg(Color::Cyan).bold();
        let error = Style::new().fg(Color::Red);
        let focused = Style::new().reverse();
        let plain = Style::default();
        let draft = self.state.draft();
        let errors = self.state.errors();
        let mut y = 0;

        frame.print(0, y, TITLE, Style::new().bold().underline());
        y += 2;

        if let Some(message) = self.state.outcome().success_message() {
            frame.print(0, y, message, Style::new().fg(Color::Green).bold());
            y += 2;
        }
        if let Some(message) = self.state.outcome().failure_message() {
            frame.print(0, y, message, Style::new().fg(Color::Red).bold());
            y += 2;
        }

        // Full name
        frame.print(0, y, "Full Name", label);
        y += 1;
        let x = frame.print(0, y, self.marker(Focus::FullName), plain);
        let input_style = if self.focus == Focus::FullName {
            focused
        } else {
            plain
        };
        if draft.full_name.is_empty() {
            frame.print(x, y, NAME_PLACEHOLDER, Style::new().fg(Color::Gray).dim());
            if self.focus == Focus::FullName {
                frame.set_cursor(Some((x, y)));
            }
        } else {
            let end = frame.print(x, y, &draft.full_name, input_style);
            if self.focus == Focus::FullName {
                frame.set_cursor(Some((end, y)));
            }
        }
        y += 1;
        let name_error = errors.get(Field::FullName);
        if !name_error.is_empty() {
            frame.print(2, y, name_error, error);
            y += 1;
        }
        y += 1;

        // Size
        frame.print(0, y, "Size", label);
        y += 1;
        let size_label = SIZE_CHOICES
            .iter()
            .find(|(value, _)| *value == draft.size)
            .map_or(SIZE_CHOICES[0].1, |(_, label)| *label);
        let x = frame.print(0, y, self.marker(Focus::Size), plain);
        let size_style = if self.focus == Focus::Size {
            focused
        } else {
            plain
        };
        frame.print(x, y, &format!("< {size_label} >"), size_style);
        y += 1;
        let size_error = errors.get(Field::Size);
        if !size_error.is_empty() {
            frame.print(2, y, size_error, error);
            y += 1;
        }
        y += 1;

        // Toppings
        for (index, topping) in TOPPINGS.iter().enumerate() {
            let focus = Focus::Topping(index);
            let mark = if draft.has_topping(topping.id) { 'x' } else { ' ' };
            let x = frame.print(0, y, self.marker(focus), plain);
            let style = if self.focus == focus { focused } else { plain };
            frame.print(x, y, &format!("[{mark}] {}", topping.label), style);
            y += 1;
        }
        y += 1;

        // Submit
        let x = frame.print(0, y, self.marker(Focus::Submit), plain);
        if self.state.can_submit() {
            let style = if self.focus == Focus::Submit {
                focused.bold()
            } else {
                Style::new().bold()
            };
            frame.print(x, y, SUBMIT_LABEL, style);
        } else {
            let end = frame.print(x, y, SUBMIT_LABEL, Style::new().fg(Color::Gray).dim());
            frame.print(end + 1, y, "(disabled)", Style::new().fg(Color::Gray).dim());
        }
        y += 2;

        frame.print(0, y, HELP, Style::new().fg(Color::Gray).dim());
    }
}
