#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` drives a [`Model`] without a real terminal and without
//! background threads. Events and messages are applied synchronously, every
//! state change renders a frame into memory, and the ids of the
//! subscriptions the model declares are recorded instead of started. Timer
//! messages are delivered by calling [`ProgramSimulator::send`] directly.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(MyModel::default());
//! sim.init();
//! sim.inject_event(Event::Key(KeyEvent::new(KeyCode::Char('1'))));
//! assert!(sim.view().contains("dec: 1"));
//! ```

use radix_core::event::Event;

use crate::program::{Cmd, Model};
use crate::subscription::SubId;

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    model: M,
    running: bool,
    frames: Vec<String>,
    logs: Vec<String>,
    subscription_ids: Vec<SubId>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            running: true,
            frames: Vec::new(),
            logs: Vec::new(),
            subscription_ids: Vec::new(),
        }
    }

    /// Initialize the model by calling `Model::init()` and executing
    /// returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.after_update();
    }

    /// Inject terminal events into the model.
    ///
    /// Events are converted to messages and dispatched in order. Injection
    /// stops as soon as the model quits.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            self.send(M::Message::from(event.clone()));
        }
    }

    /// Inject a single terminal event.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Send a specific message to the model.
    ///
    /// Ignored once the model has quit.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
        self.after_update();
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Check if the simulated program is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current view.
    pub fn view(&self) -> String {
        self.model.view()
    }

    /// All frames rendered so far, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recently rendered frame.
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    /// Number of frames rendered.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Lines emitted through [`Cmd::Log`].
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Ids of the subscriptions the model declared after its last update.
    pub fn subscription_ids(&self) -> &[SubId] {
        &self.subscription_ids
    }

    fn after_update(&mut self) {
        self.subscription_ids = self.model.subscriptions().iter().map(|s| s.id()).collect();
        self.frames.push(self.model.view());
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    if !self.running {
                        break;
                    }
                    self.execute_cmd(c);
                }
            }
            Cmd::Log(text) => self.logs.push(text),
        }
    }
}
