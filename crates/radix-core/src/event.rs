#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. `KeyEventKind` defaults to `Press` when the terminal
//! cannot distinguish presses from repeats and releases.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// True for presses and auto-repeats, false for releases.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F24).
    F(u8),
    /// Null character (Ctrl+Space or Ctrl+@).
    Null,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(feature = "crossterm")]
impl Event {
    /// Translate a Crossterm event into the canonical form.
    ///
    /// Returns `None` for events radix does not model (mouse input, pasted
    /// text, media keys, lone modifier presses).
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::Event as Ct;

        match event {
            Ct::Key(key) => map_key_event(key).map(Self::Key),
            Ct::Resize(width, height) => Some(Self::Resize { width, height }),
            Ct::Paste(_) => None,
            Ct::FocusGained => Some(Self::Focus(true)),
            Ct::FocusLost => Some(Self::Focus(false)),
            Ct::Mouse(_) => None,
        }
    }
}

#[cfg(feature = "crossterm")]
fn map_key_event(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::{KeyCode as Ck, KeyEventKind as Ckind, KeyModifiers};

    let code = match key.code {
        Ck::Char(c) => KeyCode::Char(c),
        Ck::Enter => KeyCode::Enter,
        Ck::Esc => KeyCode::Escape,
        Ck::Backspace => KeyCode::Backspace,
        Ck::Tab => KeyCode::Tab,
        Ck::BackTab => KeyCode::BackTab,
        Ck::Delete => KeyCode::Delete,
        Ck::Insert => KeyCode::Insert,
        Ck::Home => KeyCode::Home,
        Ck::End => KeyCode::End,
        Ck::PageUp => KeyCode::PageUp,
        Ck::PageDown => KeyCode::PageDown,
        Ck::Up => KeyCode::Up,
        Ck::Down => KeyCode::Down,
        Ck::Left => KeyCode::Left,
        Ck::Right => KeyCode::Right,
        Ck::F(n) => KeyCode::F(n),
        Ck::Null => KeyCode::Null,
        _ => return None,
    };

    let mut modifiers = Modifiers::NONE;
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers |= Modifiers::SHIFT;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        modifiers |= Modifiers::ALT;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers |= Modifiers::CTRL;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::HYPER)
    {
        modifiers |= Modifiers::SUPER;
    }

    let kind = match key.kind {
        Ckind::Press => KeyEventKind::Press,
        Ckind::Repeat => KeyEventKind::Repeat,
        Ckind::Release => KeyEventKind::Release,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}
