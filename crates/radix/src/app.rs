#![forbid(unsafe_code)]

//! The radix application model.
//!
//! Glues the [`Converter`] and the [`BlinkCursor`] to the runtime: key events
//! go to the converter, blink ticks go to the cursor, and the blink
//! subscription is keyed by the cursor's epoch so a reset restarts it.

use radix_core::event::{Event, KeyEvent};
use radix_runtime::{Cmd, Every, Model, Subscription};

use crate::base::Base;
use crate::converter::{Converter, KeyOutcome};
use crate::cursor::BlinkCursor;

/// Messages handled by [`RadixApp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A key event from the terminal.
    Key(KeyEvent),
    /// A blink tick scheduled under the given epoch.
    Blink(u64),
    /// Terminal events that only need a redraw.
    Redraw,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            Event::Resize { .. } | Event::Focus(_) => Self::Redraw,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RadixApp {
    converter: Converter,
    cursor: BlinkCursor,
}

impl RadixApp {
    pub fn new(start_base: Base, cursor: BlinkCursor) -> Self {
        Self {
            converter: Converter::with_base(start_base),
            cursor,
        }
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn cursor(&self) -> &BlinkCursor {
        &self.cursor
    }
}

impl Model for RadixApp {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => match self.converter.handle_key(&key) {
                KeyOutcome::Quit => {
                    tracing::info!(value = self.converter.value(), "quit requested");
                    Cmd::quit()
                }
                outcome => {
                    if outcome.blink_reset() {
                        self.cursor.reset();
                    }
                    Cmd::none()
                }
            },
            Msg::Blink(epoch) => {
                self.cursor.on_blink(epoch);
                Cmd::none()
            }
            Msg::Redraw => Cmd::none(),
        }
    }

    fn view(&self) -> String {
        self.converter.render(&self.cursor)
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        if !self.cursor.is_blinking() {
            return Vec::new();
        }
        let epoch = self.cursor.epoch();
        vec![Box::new(Every::with_id(
            epoch,
            self.cursor.interval(),
            move || Msg::Blink(epoch),
        ))]
    }
}
