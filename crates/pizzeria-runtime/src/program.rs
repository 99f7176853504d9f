#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop. It separates state
//! ([`Model`]) from rendering ([`Model::view`]) and describes side effects as
//! [`Cmd`] values.
//!
//! # Example
//!
//! ```ignore
//! use pizzeria_runtime::{Cmd, Event, Frame, Model, Style};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Ignore => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.print(0, 0, &self.count.to_string(), Style::default());
//!     }
//! }
//! ```

use crate::event::Event;
use crate::frame::Frame;
use crate::terminal::{Presenter, TerminalSession};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, debug_span, info, warn};

/// Application state and behaviour.
pub trait Model: Sized {
    /// Messages that drive state changes. Terminal events convert into them.
    type Message: From<Event> + Send + 'static;

    /// Startup commands. Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by a model.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Stop the program.
    Quit,
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Run a blocking closure off the UI thread; its result is sent back as a
    /// message.
    Task(String, Box<dyn FnOnce() -> M + Send>),
    /// Emit a log line.
    Log(String),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Task(name, _) => f.debug_tuple("Task").field(name).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Batch commands, collapsing the empty and single-element cases.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        if cmds.len() > 1 {
            return Self::Batch(cmds);
        }
        cmds.pop().unwrap_or(Self::None)
    }

    /// Run `f` on a background thread and deliver its result to `update`.
    pub fn task<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(name.into(), Box::new(f))
    }

    /// Stable name for logging.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Task(..) => "Task",
            Self::Log(_) => "Log",
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// How long to wait for input before checking background results.
    pub poll_timeout: Duration,
    /// Draw on the alternate screen instead of inline.
    pub alternate_screen: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(50),
            alternate_screen: true,
        }
    }
}

impl ProgramConfig {
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }
}

/// Drives a [`Model`] against the real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    running: bool,
    dirty: bool,
    task_tx: mpsc::Sender<M::Message>,
    task_rx: mpsc::Receiver<M::Message>,
}

impl<M: Model> Program<M> {
    pub fn new(model: M, config: ProgramConfig) -> Self {
        let (task_tx, task_rx) = mpsc::channel();
        Self {
            model,
            config,
            running: true,
            dirty: true,
            task_tx,
            task_rx,
        }
    }

    /// Run until the model quits. Returns the final model.
    pub fn run(mut self) -> io::Result<M> {
        let session = TerminalSession::new(self.config.alternate_screen)?;
        let (mut width, mut height) = session.size()?;
        info!(width, height, "program started");

        let cmd = self.model.init();
        self.execute(cmd);

        let mut presenter = Presenter::new(io::stdout());
        while self.running {
            if self.dirty {
                let mut frame = Frame::new(width, height);
                self.model.view(&mut frame);
                presenter.present(&frame.buffer, frame.cursor)?;
                self.dirty = false;
            }

            while let Ok(msg) = self.task_rx.try_recv() {
                self.dispatch(msg);
            }
            if !self.running {
                break;
            }

            if crossterm::event::poll(self.config.poll_timeout)? {
                let raw = crossterm::event::read()?;
                let Some(event) = Event::from_crossterm(raw) else {
                    continue;
                };
                if let Event::Resize {
                    width: w,
                    height: h,
                } = event
                {
                    width = w;
                    height = h;
                    self.dirty = true;
                }
                self.dispatch(M::Message::from(event));
            }
        }

        info!("program stopped");
        drop(session);
        Ok(self.model)
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute(cmd);
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Log(text) => info!(target: "pizzeria::log", "{text}"),
            Cmd::Task(name, f) => {
                let tx = self.task_tx.clone();
                let span = debug_span!("task", name = %name);
                let spawned = thread::Builder::new()
                    .name(format!("task-{name}"))
                    .spawn(move || {
                        let _guard = span.enter();
                        let msg = f();
                        debug!("task finished");
                        let _ = tx.send(msg);
                    });
                if let Err(err) = spawned {
                    warn!(task = %name, error = %err, "failed to spawn task");
                }
            }
        }
    }
}
