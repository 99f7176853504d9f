#![forbid(unsafe_code)]

//! Small Elm-style runtime for terminal forms.
//!
//! A [`Model`] owns application state, turns messages into new state in
//! [`Model::update`], and draws itself into a [`Frame`] in [`Model::view`].
//! Side effects are described as [`Cmd`] values and executed by either the
//! terminal [`Program`] or the headless [`ProgramSimulator`].

pub mod event;
pub mod frame;
pub mod program;
pub mod simulator;
pub mod style;
pub mod terminal;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use frame::{Buffer, Cell, Frame};
pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::{CmdRecord, ProgramSimulator};
pub use style::{Color, Style, StyleFlags};
