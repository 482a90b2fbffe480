#![forbid(unsafe_code)]

//! Bubbletea/Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop. It separates state
//! (Model) from rendering (View) and uses commands for side effects.
//!
//! # Example
//!
//! ```ignore
//! use radix_core::event::Event;
//! use radix_runtime::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Increment,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!         }
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("count: {}", self.count)
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use radix_core::event::Event;
use radix_core::terminal_session::{SessionOptions, TerminalSession};

use crate::subscription::{Subscription, SubscriptionManager};
use crate::terminal_writer::{ScreenMode, TerminalWriter};

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state as text, one terminal row per line.
    fn view(&self) -> String;

    /// Declare the subscriptions that should be running right now.
    ///
    /// Called after `init` and after every update that changed the model.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        Vec::new()
    }
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Quit the application.
    Quit,
    /// Execute multiple commands; stops at the first `Quit`.
    Batch(Vec<Cmd<M>>),
    /// Execute commands in order; stops at the first `Quit`.
    Sequence(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Write a log line above the UI.
    Log(String),
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of commands.
    pub fn batch(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Batch)
    }

    /// Create a sequence of commands.
    pub fn sequence(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Sequence)
    }

    fn collapse(mut cmds: Vec<Self>, wrap: fn(Vec<Self>) -> Self) -> Self {
        cmds.retain(|c| !matches!(c, Self::None));
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => wrap(cmds),
        }
    }

    /// Whether this command is [`Cmd::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Configuration for the program runtime.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Screen mode (inline or alternate screen).
    pub screen_mode: ScreenMode,
    /// Input poll timeout; bounds how late subscription messages are handled.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            screen_mode: ScreenMode::Inline,
            poll_timeout: Duration::from_millis(25),
        }
    }
}

impl ProgramConfig {
    /// Set the input poll timeout.
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            alternate_screen: self.screen_mode == ScreenMode::AltScreen,
        }
    }
}

/// A source of terminal events for the program loop.
pub trait EventSource {
    /// Wait up to `timeout` for an event. Returns `Ok(true)` if one is ready.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read the ready event; `None` if it has no canonical form.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Whether the loop should stop as if the user quit.
    fn termination_requested(&self) -> bool {
        false
    }

    /// Current terminal size as `(columns, rows)`, if known.
    fn size(&self) -> Option<(u16, u16)> {
        None
    }
}

impl EventSource for TerminalSession {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool> {
        TerminalSession::poll_event(self, timeout)
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        TerminalSession::read_event(self)
    }

    fn termination_requested(&self) -> bool {
        TerminalSession::termination_requested(self)
    }

    fn size(&self) -> Option<(u16, u16)> {
        match TerminalSession::size(self) {
            Ok(size) => Some(size),
            Err(err) => {
                tracing::warn!(%err, "terminal size unavailable");
                None
            }
        }
    }
}

/// Scripted event source for running a [`Program`] without a terminal.
///
/// Events are delivered in order. Once the script is exhausted the source
/// requests termination so the loop cannot spin forever.
#[derive(Debug, Default)]
pub struct HeadlessEventSource {
    events: VecDeque<Event>,
    size: Option<(u16, u16)>,
}

impl HeadlessEventSource {
    /// Create a source that replays `events`.
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            size: None,
        }
    }

    /// Report a fixed terminal size of `width` x `height`.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for HeadlessEventSource {
    fn poll_event(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.events.pop_front())
    }

    fn termination_requested(&self) -> bool {
        self.events.is_empty()
    }

    fn size(&self) -> Option<(u16, u16)> {
        self.size
    }
}

/// The program runtime that manages the update/view loop.
pub struct Program<M: Model, W: Write = Stdout> {
    model: M,
    writer: TerminalWriter<W>,
    subscriptions: SubscriptionManager<M::Message>,
    config: ProgramConfig,
    running: bool,
    /// Whether the UI needs to be redrawn.
    dirty: bool,
}

impl<M: Model> Program<M, Stdout> {
    /// Create a new program writing to stdout with the given configuration.
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self::with_writer(model, config, io::stdout())
    }

    /// Take over the terminal and run until the model quits.
    ///
    /// The terminal is restored when this returns, including on error.
    pub fn run(&mut self) -> io::Result<()> {
        let mut session = TerminalSession::new(self.config.session_options())?;
        self.run_with(&mut session)
    }
}

impl<M: Model, W: Write> Program<M, W> {
    /// Create a program that presents frames to `out`.
    pub fn with_writer(model: M, config: ProgramConfig, out: W) -> Self {
        Self {
            model,
            writer: TerminalWriter::new(out, config.screen_mode),
            subscriptions: SubscriptionManager::new(),
            config,
            running: true,
            dirty: true,
        }
    }

    /// Run the main loop against an arbitrary event source.
    ///
    /// 1. `init` and first render
    /// 2. poll input, dispatch, drain subscription messages
    /// 3. reconcile subscriptions and redraw when the model changed
    /// 4. stop subscriptions and leave the last frame on screen
    ///
    /// The writer tracks the terminal width from `events.size()` at start
    /// and from every resize event, so wrapped rows are redrawn in place.
    pub fn run_with<E: EventSource>(&mut self, events: &mut E) -> io::Result<()> {
        if let Some((width, _)) = events.size() {
            self.writer.set_width(width);
        }
        tracing::debug!(
            mode = ?self.writer.mode(),
            width = self.writer.width(),
            "event loop starting"
        );

        let cmd = self.model.init();
        self.execute_cmd(cmd)?;
        self.reconcile_subscriptions();
        self.render_frame()?;

        while self.running {
            if events.termination_requested() {
                tracing::info!("termination requested, leaving event loop");
                self.running = false;
                break;
            }

            if events.poll_event(self.config.poll_timeout)? {
                if let Some(event) = events.read_event()? {
                    tracing::trace!(?event, "terminal event");
                    if let Event::Resize { width, .. } = event {
                        self.writer.set_width(width);
                    }
                    self.dispatch(M::Message::from(event))?;
                }
            }

            for msg in self.subscriptions.drain_messages() {
                if !self.running {
                    break;
                }
                self.dispatch(msg)?;
            }

            if self.dirty {
                self.reconcile_subscriptions();
                self.render_frame()?;
            }
        }

        self.subscriptions.stop_all();
        self.writer.finish()
    }

    fn dispatch(&mut self, msg: M::Message) -> io::Result<()> {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd)
    }

    /// Execute a command.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m)?,
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    if !self.running {
                        break;
                    }
                    self.execute_cmd(c)?;
                }
            }
            Cmd::Log(text) => self.writer.write_log(&text)?,
        }
        Ok(())
    }

    fn reconcile_subscriptions(&mut self) {
        let subs = self.model.subscriptions();
        self.subscriptions.reconcile(subs);
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let frame = self.model.view();
        self.writer.present_ui(&frame)?;
        self.dirty = false;
        Ok(())
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Check if the program is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get a reference to the terminal writer.
    pub fn writer(&self) -> &TerminalWriter<W> {
        &self.writer
    }
}
