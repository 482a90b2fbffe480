#![forbid(unsafe_code)]

//! Text cursor drawn inside the active buffer.
//!
//! The cursor is a single glyph shown in reverse video. In blink mode the
//! highlight toggles on every tick of an interval subscription; any edit or
//! navigation calls [`BlinkCursor::reset`], which makes it visible again and
//! bumps the phase epoch. Ticks carry the epoch they were scheduled under,
//! so a tick from a superseded phase is ignored.

use std::time::Duration;

/// SGR reverse video on.
const REVERSE_ON: &str = "\x1b[7m";
/// SGR reverse video off.
const REVERSE_OFF: &str = "\x1b[27m";

/// How the cursor is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Highlight toggles on a timer.
    #[default]
    Blink,
    /// Always highlighted.
    Static,
    /// Never highlighted; the glyph is drawn as plain text.
    Hide,
}

impl CursorMode {
    /// Parse `blink`, `static` or `hide`, case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blink" => Some(Self::Blink),
            "static" => Some(Self::Static),
            "hide" | "hidden" => Some(Self::Hide),
            _ => None,
        }
    }
}

/// Cursor visibility state plus blink phase.
#[derive(Debug, Clone)]
pub struct BlinkCursor {
    mode: CursorMode,
    interval: Duration,
    visible: bool,
    epoch: u64,
}

impl BlinkCursor {
    /// Default blink interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(530);

    pub fn new(mode: CursorMode, interval: Duration) -> Self {
        Self {
            mode,
            interval,
            visible: true,
            epoch: 0,
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the highlight is currently shown.
    pub fn is_visible(&self) -> bool {
        match self.mode {
            CursorMode::Blink => self.visible,
            CursorMode::Static => true,
            CursorMode::Hide => false,
        }
    }

    /// Whether a blink timer should be running.
    pub fn is_blinking(&self) -> bool {
        self.mode == CursorMode::Blink
    }

    /// Current blink phase.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Show the cursor and start a new blink phase.
    pub fn reset(&mut self) {
        self.visible = true;
        if self.is_blinking() {
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    /// Apply a blink tick scheduled under `epoch`.
    ///
    /// Returns `true` if the tick belonged to the current phase and toggled
    /// the highlight.
    pub fn on_blink(&mut self, epoch: u64) -> bool {
        if !self.is_blinking() || epoch != self.epoch {
            tracing::trace!(epoch, current = self.epoch, "stale blink tick");
            return false;
        }
        self.visible = !self.visible;
        true
    }

    /// Draw `glyph` with the current highlight.
    pub fn view(&self, glyph: char) -> String {
        if self.is_visible() {
            format!("{REVERSE_ON}{glyph}{REVERSE_OFF}")
        } else {
            glyph.to_string()
        }
    }
}

impl Default for BlinkCursor {
    fn default() -> Self {
        Self::new(CursorMode::Blink, Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_visible_in_blink_mode() {
        let cursor = BlinkCursor::default();
        assert!(cursor.is_visible());
        assert_eq!(cursor.interval(), Duration::from_millis(530));
        assert_eq!(cursor.view('7'), "\x1b[7m7\x1b[27m");
    }

    #[test]
    fn ticks_toggle_visibility() {
        let mut cursor = BlinkCursor::default();
        assert!(cursor.on_blink(0));
        assert!(!cursor.is_visible());
        assert_eq!(cursor.view('7'), "7");
        assert!(cursor.on_blink(0));
        assert!(cursor.is_visible());
    }

    #[test]
    fn reset_shows_cursor_and_invalidates_old_ticks() {
        let mut cursor = BlinkCursor::default();
        cursor.on_blink(0);
        cursor.reset();
        assert!(cursor.is_visible());
        assert_eq!(cursor.epoch(), 1);
        assert!(!cursor.on_blink(0));
        assert!(cursor.is_visible());
    }

    #[test]
    fn static_mode_never_blinks() {
        let mut cursor = BlinkCursor::new(CursorMode::Static, Duration::from_millis(10));
        assert!(!cursor.is_blinking());
        assert!(!cursor.on_blink(0));
        cursor.reset();
        assert_eq!(cursor.epoch(), 0);
        assert_eq!(cursor.view('x'), "\x1b[7mx\x1b[27m");
    }

    #[test]
    fn hide_mode_draws_plain_glyph() {
        let cursor = BlinkCursor::new(CursorMode::Hide, Duration::from_millis(10));
        assert!(!cursor.is_visible());
        assert_eq!(cursor.view(' '), " ");
    }

    #[test]
    fn mode_names() {
        assert_eq!(CursorMode::from_name("Blink"), Some(CursorMode::Blink));
        assert_eq!(CursorMode::from_name("static"), Some(CursorMode::Static));
        assert_eq!(CursorMode::from_name("hide"), Some(CursorMode::Hide));
        assert_eq!(CursorMode::from_name("off"), None);
    }
}
