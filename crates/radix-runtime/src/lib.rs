#![forbid(unsafe_code)]

//! radix runtime
//!
//! The runtime ties terminal input from `radix-core` to an application
//! [`Model`] and writes the model's text view back to the terminal.
//!
//! # Key Components
//!
//! - [`Program`] - Bubbletea/Elm-style event loop
//! - [`Model`] - Trait for application state and behavior
//! - [`Cmd`] - Commands for side effects
//! - [`Subscription`] - Trait for continuous event sources
//! - [`Every`] - Built-in interval subscription
//! - [`TerminalWriter`] - Inline / alt-screen text presenter
//! - [`ProgramSimulator`] - Headless driver for tests
//!
//! # Event ordering
//! Key events and subscription messages are funnelled into a single loop and
//! handed to `Model::update` one at a time. Subscriptions run on their own
//! threads but only ever send messages; the model has exactly one owner.

pub mod program;
pub mod simulator;
pub mod subscription;
pub mod terminal_writer;

pub use program::{Cmd, EventSource, HeadlessEventSource, Model, Program, ProgramConfig};
pub use simulator::ProgramSimulator;
pub use subscription::{Every, StopSignal, SubId, Subscription};
pub use terminal_writer::{ScreenMode, TerminalWriter};
