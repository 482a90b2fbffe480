#![forbid(unsafe_code)]

//! Terminal output coordinator.
//!
//! The writer owns every byte the runtime sends to the terminal so that UI
//! frames and log lines never interleave.
//!
//! # Screen modes
//!
//! - [`ScreenMode::Inline`]: the UI occupies a block of rows at the current
//!   cursor position. Each frame moves back to the top of that block, clears
//!   to the end of the screen and redraws. Log lines are written above the
//!   block, scrolling into the user's scrollback.
//! - [`ScreenMode::AltScreen`]: each frame clears the alternate screen and
//!   draws from the top-left corner. Log lines are dropped.
//!
//! Lines are separated by `\r\n` because the terminal is in raw mode.
//!
//! # Wrapping
//!
//! A line wider than the terminal wraps onto extra physical rows. The block
//! height is counted in physical rows using the terminal width (set with
//! [`TerminalWriter::set_width`]), measured by display width with escape
//! sequences skipped. A width of 0 means unknown: one row per line.

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

/// How the UI is placed on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// Draw in place below the shell prompt, preserving scrollback.
    #[default]
    Inline,
    /// Take over the alternate screen buffer.
    AltScreen,
}

/// Unified terminal output coordinator.
pub struct TerminalWriter<W: Write> {
    out: W,
    mode: ScreenMode,
    /// Terminal width in columns; 0 when unknown.
    term_width: u16,
    /// Physical rows the last frame occupied (0 before the first frame).
    ui_height: u16,
    /// Last presented frame, replayed after log lines in inline mode.
    last_frame: Option<String>,
}

impl<W: Write> TerminalWriter<W> {
    /// Create a writer over `out` with an unknown terminal width.
    pub fn new(out: W, mode: ScreenMode) -> Self {
        Self {
            out,
            mode,
            term_width: 0,
            ui_height: 0,
            last_frame: None,
        }
    }

    /// The screen mode this writer draws in.
    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// Terminal width used for wrap accounting.
    pub fn width(&self) -> u16 {
        self.term_width
    }

    /// Update the terminal width, e.g. after a resize.
    ///
    /// The frame on screen is re-measured against the new width so the next
    /// redraw climbs back to the top of the block as the terminal now lays
    /// it out.
    pub fn set_width(&mut self, width: u16) {
        if width == self.term_width {
            return;
        }
        tracing::debug!(from = self.term_width, to = width, "terminal width changed");
        self.term_width = width;
        if self.ui_height > 0 {
            if let Some(frame) = &self.last_frame {
                self.ui_height = frame_rows(frame, width);
            }
        }
    }

    /// Present a UI frame, replacing the previous one.
    pub fn present_ui(&mut self, frame: &str) -> io::Result<()> {
        match self.mode {
            ScreenMode::Inline => {
                self.clear_inline_ui()?;
                self.draw_lines(frame)?;
            }
            ScreenMode::AltScreen => {
                queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
                self.draw_lines(frame)?;
            }
        }
        self.last_frame = Some(frame.to_owned());
        self.out.flush()
    }

    /// Write a log line above the UI (inline mode only).
    pub fn write_log(&mut self, text: &str) -> io::Result<()> {
        if self.mode == ScreenMode::AltScreen {
            tracing::debug!(text, "log line dropped in alt-screen mode");
            return Ok(());
        }

        self.clear_inline_ui()?;
        for line in text.lines() {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\r\n")?;
        }
        if let Some(frame) = self.last_frame.take() {
            self.draw_lines(&frame)?;
            self.last_frame = Some(frame);
        }
        self.out.flush()
    }

    /// Leave the last frame on screen and move below it.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.mode == ScreenMode::Inline && self.ui_height > 0 {
            self.out.write_all(b"\r\n")?;
            self.ui_height = 0;
        }
        self.out.flush()
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn clear_inline_ui(&mut self) -> io::Result<()> {
        if self.ui_height == 0 {
            return Ok(());
        }
        queue!(self.out, MoveToColumn(0))?;
        // MoveUp(0) is read as MoveUp(1) by most terminals.
        if self.ui_height > 1 {
            queue!(self.out, MoveUp(self.ui_height - 1))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.ui_height = 0;
        Ok(())
    }

    fn draw_lines(&mut self, frame: &str) -> io::Result<()> {
        for (idx, line) in frame.lines().enumerate() {
            if idx > 0 {
                self.out.write_all(b"\r\n")?;
            }
            self.out.write_all(line.as_bytes())?;
        }
        self.ui_height = frame_rows(frame, self.term_width);
        Ok(())
    }
}

/// Physical rows `frame` occupies on a terminal `width` columns wide.
fn frame_rows(frame: &str, width: u16) -> u16 {
    frame
        .lines()
        .map(|line| line_rows(line, width))
        .fold(0u16, u16::saturating_add)
}

fn line_rows(line: &str, width: u16) -> u16 {
    let cols = display_width(line);
    if width == 0 || cols <= usize::from(width) {
        return 1;
    }
    u16::try_from(cols.div_ceil(usize::from(width))).unwrap_or(u16::MAX)
}

/// Columns `line` occupies, skipping CSI escape sequences.
fn display_width(line: &str) -> usize {
    let mut width = 0usize;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.next() == Some('[') {
                // Parameters until the final byte.
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(writer: &TerminalWriter<Vec<u8>>) -> String {
        String::from_utf8_lossy(writer.get_ref()).into_owned()
    }

    #[test]
    fn first_inline_frame_has_no_cursor_movement() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.present_ui("bin: 0\noct: 0\n").unwrap();
        assert_eq!(output(&writer), "bin: 0\r\noct: 0");
    }

    #[test]
    fn inline_redraw_moves_to_top_of_block() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.present_ui("a\nb\nc\nd\n").unwrap();
        let first_len = writer.get_ref().len();
        writer.present_ui("e\nf\ng\nh\n").unwrap();

        let redraw = String::from_utf8_lossy(&writer.get_ref()[first_len..]).into_owned();
        assert!(redraw.contains("\x1b[3A"), "redraw: {redraw:?}");
        assert!(redraw.contains("\x1b[J"), "redraw: {redraw:?}");
        assert!(redraw.ends_with("e\r\nf\r\ng\r\nh"));
    }

    #[test]
    fn single_line_redraw_never_moves_up() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.present_ui("one").unwrap();
        writer.present_ui("two").unwrap();
        let out = output(&writer);
        assert!(!out.contains("\x1b[0A"), "out: {out:?}");
        assert!(!out.contains("\x1b[1A"), "out: {out:?}");
        assert!(out.ends_with("two"));
    }

    #[test]
    fn log_lines_land_above_the_ui() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.present_ui("ui-1\nui-2").unwrap();
        writer.write_log("hello").unwrap();
        let out = output(&writer);
        let log_at = out.find("hello\r\n").expect("log written");
        let replay_at = out.rfind("ui-1\r\nui-2").expect("frame replayed");
        assert!(log_at < replay_at);
    }

    #[test]
    fn alt_screen_drops_logs() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::AltScreen);
        writer.write_log("ignored").unwrap();
        assert!(!output(&writer).contains("ignored"));
    }

    #[test]
    fn alt_screen_frame_starts_at_origin() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::AltScreen);
        writer.present_ui("x").unwrap();
        let out = output(&writer);
        assert!(out.starts_with("\x1b[1;1H"), "out: {out:?}");
        assert!(out.ends_with('x'));
    }

    #[test]
    fn display_width_skips_sgr_sequences() {
        assert_eq!(display_width("dec: 12\x1b[7m3\x1b[27m"), 8);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("ab界"), 4);
    }

    #[test]
    fn line_rows_counts_wraps() {
        assert_eq!(line_rows("", 10), 1);
        assert_eq!(line_rows("0123456789", 10), 1);
        assert_eq!(line_rows("0123456789x", 10), 2);
        assert_eq!(line_rows(&"1".repeat(69), 40), 2);
        assert_eq!(line_rows(&"1".repeat(69), 0), 1);
    }

    #[test]
    fn wrapped_lines_are_climbed_on_redraw() {
        let bin = format!("bin: {}", "1".repeat(64));
        let frame = format!("{bin}\noct: 1777777777777777777777\ndec: 18446744073709551615\nhex: FFFFFFFFFFFFFFFF\n");
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.set_width(40);
        writer.present_ui(&frame).unwrap();
        assert_eq!(writer.ui_height, 5);

        let first_len = writer.get_ref().len();
        writer.present_ui(&frame).unwrap();
        let redraw = String::from_utf8_lossy(&writer.get_ref()[first_len..]).into_owned();
        assert!(redraw.starts_with("\x1b[1G\x1b[4A\x1b[J"), "redraw: {redraw:?}");
    }

    #[test]
    fn highlighted_glyph_does_not_count_as_width() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.set_width(8);
        writer.present_ui("dec: 12\x1b[7m3\x1b[27m\nhex: 7B").unwrap();
        assert_eq!(writer.ui_height, 2);
    }

    #[test]
    fn resize_remeasures_frame_on_screen() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.set_width(80);
        writer.present_ui("0123456789012345\nab").unwrap();
        assert_eq!(writer.ui_height, 2);

        writer.set_width(8);
        assert_eq!(writer.width(), 8);
        assert_eq!(writer.ui_height, 3);

        let before = writer.get_ref().len();
        writer.present_ui("x").unwrap();
        let redraw = String::from_utf8_lossy(&writer.get_ref()[before..]).into_owned();
        assert!(redraw.contains("\x1b[2A"), "redraw: {redraw:?}");
        assert_eq!(writer.ui_height, 1);
    }

    #[test]
    fn finish_moves_below_inline_frame() {
        let mut writer = TerminalWriter::new(Vec::new(), ScreenMode::Inline);
        writer.present_ui("a\nb").unwrap();
        writer.finish().unwrap();
        assert!(output(&writer).ends_with("a\r\nb\r\n"));
    }
}
