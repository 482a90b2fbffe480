#![forbid(unsafe_code)]

//! The converter state machine.
//!
//! A [`Converter`] holds one canonical `u64`, the base the user is typing in
//! and a cursor offset into that base's text. The text of every base is
//! derived from the value on demand, so all four buffers always agree.
//!
//! # Invariants
//!
//! 1. `cursor <= buffer(active).len()` after every operation
//! 2. Zero is the empty buffer in every base
//! 3. The active buffer re-parses to `value`
//!
//! A digit whose insertion would overflow `u64` is ignored, so (3) holds for
//! every reachable state. A violation is a bug and panics.

use radix_core::event::{KeyCode, KeyEvent, Modifiers};

use crate::base::Base;
use crate::cursor::BlinkCursor;

/// What a key did to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing changed.
    Ignored,
    /// State changed. `blink_reset` is set when the cursor offset or the
    /// active base moved.
    Handled { blink_reset: bool },
    /// The user asked to leave.
    Quit,
}

impl KeyOutcome {
    /// Whether the blink phase must restart.
    pub fn blink_reset(self) -> bool {
        matches!(self, Self::Handled { blink_reset: true })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converter {
    value: u64,
    active: Base,
    cursor: usize,
}

impl Converter {
    /// Empty converter typing in decimal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty converter typing in `base`.
    pub fn with_base(base: Base) -> Self {
        Self {
            active: base,
            ..Self::default()
        }
    }

    /// The number all buffers represent.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The base being edited.
    pub fn active(&self) -> Base {
        self.active
    }

    /// Cursor offset into the active buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Canonical digits of the value in `base` (empty for zero).
    pub fn buffer(&self, base: Base) -> String {
        base.format(self.value)
    }

    /// Process one key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !key.is_press() {
            return KeyOutcome::Ignored;
        }

        let before = (self.value, self.active, self.cursor);

        match key.code {
            KeyCode::Char('c') if key.ctrl() => return KeyOutcome::Quit,
            _ if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER) => {
                return KeyOutcome::Ignored;
            }
            KeyCode::Char(c) if self.active.is_valid_digit(c) => self.insert_digit(c),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor_left(),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor_right(),
            KeyCode::Up | KeyCode::Char('k') => self.switch_base(self.active.prev()),
            KeyCode::Down | KeyCode::Char('j') => self.switch_base(self.active.next()),
            KeyCode::Backspace => self.delete_before_cursor(),
            _ => {}
        }

        let after = (self.value, self.active, self.cursor);
        if after == before {
            return KeyOutcome::Ignored;
        }
        tracing::debug!(
            value = self.value,
            active = %self.active,
            cursor = self.cursor,
            "converter updated"
        );
        KeyOutcome::Handled {
            blink_reset: (before.1, before.2) != (after.1, after.2),
        }
    }

    /// The character the cursor sits on: the digit under it, a space past
    /// the end, or `'0'` when the buffer is empty.
    pub fn cursor_glyph(&self) -> char {
        let text = self.buffer(self.active);
        match text.as_bytes().get(self.cursor) {
            Some(&b) => char::from(b),
            None if text.is_empty() => '0',
            None => ' ',
        }
    }

    /// Four lines, `"<label>: <digits>"`, in base order.
    ///
    /// The active line has the cursor glyph drawn by `cursor` in place of the
    /// character at the cursor offset. Inactive empty buffers show `0`.
    pub fn render(&self, cursor: &BlinkCursor) -> String {
        let mut out = String::new();
        for base in Base::ALL {
            let text = self.buffer(base);
            out.push_str(base.label());
            out.push_str(": ");
            if base == self.active {
                let split = self.cursor.min(text.len());
                out.push_str(&text[..split]);
                out.push_str(&cursor.view(self.cursor_glyph()));
                if split < text.len() {
                    out.push_str(&text[split + 1..]);
                }
            } else if text.is_empty() {
                out.push('0');
            } else {
                out.push_str(&text);
            }
            out.push('\n');
        }
        out
    }

    fn insert_digit(&mut self, c: char) {
        if c == '0' && self.cursor == 0 {
            return;
        }
        let mut text = self.buffer(self.active);
        text.insert(self.cursor, c);
        match self.active.parse(&text) {
            Some(value) => {
                self.value = value;
                self.cursor += 1;
                self.clamp_cursor();
            }
            None => tracing::debug!(digit = %c, "digit ignored, value would overflow"),
        }
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut text = self.buffer(self.active);
        text.remove(self.cursor - 1);
        self.cursor -= 1;
        self.value = self.reparse(&text);
        self.clamp_cursor();
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    fn switch_base(&mut self, base: Base) {
        self.active = base;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.buffer(self.active).len());
    }

    fn reparse(&self, text: &str) -> u64 {
        match self.active.parse(text) {
            Some(value) => value,
            None => {
                tracing::error!(text, base = %self.active, "validated buffer failed to parse");
                panic!("buffer {text:?} is not a valid {} number", self.active.label());
            }
        }
    }
}
