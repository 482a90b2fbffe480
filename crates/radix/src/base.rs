#![forbid(unsafe_code)]

//! Numeral systems and their canonical text form.

use std::fmt;

/// One of the four numeral systems the converter displays.
///
/// Ordering follows display order and is the order used for cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Base {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

impl Base {
    /// All bases in display order.
    pub const ALL: [Base; 4] = [
        Base::Binary,
        Base::Octal,
        Base::Decimal,
        Base::Hexadecimal,
    ];

    /// Numeric radix.
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Three-letter label used in the view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Binary => "bin",
            Self::Octal => "oct",
            Self::Decimal => "dec",
            Self::Hexadecimal => "hex",
        }
    }

    /// Parse a label (`bin`, `oct`, `dec`, `hex`), case-insensitive.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(label))
    }

    /// Whether `c` is a digit of this base. Hex letters match in either case.
    #[must_use]
    pub fn is_valid_digit(self, c: char) -> bool {
        c.is_digit(self.radix())
    }

    /// Canonical text for `value`: no sign, separators or leading zeros,
    /// upper-case hex. Zero is the empty string.
    #[must_use]
    pub fn format(self, value: u64) -> String {
        if value == 0 {
            return String::new();
        }
        match self {
            Self::Binary => format!("{value:b}"),
            Self::Octal => format!("{value:o}"),
            Self::Decimal => value.to_string(),
            Self::Hexadecimal => format!("{value:X}"),
        }
    }

    /// Parse digits in this base. The empty string is zero.
    ///
    /// Returns `None` for an invalid digit or a value beyond `u64::MAX`.
    #[must_use]
    pub fn parse(self, text: &str) -> Option<u64> {
        if text.is_empty() {
            return Some(0);
        }
        if !text.chars().all(|c| self.is_valid_digit(c)) {
            return None;
        }
        u64::from_str_radix(text, self.radix()).ok()
    }

    /// The neighbour toward [`Base::Binary`], clamped.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Binary | Self::Octal => Self::Binary,
            Self::Decimal => Self::Octal,
            Self::Hexadecimal => Self::Decimal,
        }
    }

    /// The neighbour toward [`Base::Hexadecimal`], clamped.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Binary => Self::Octal,
            Self::Octal => Self::Decimal,
            Self::Decimal | Self::Hexadecimal => Self::Hexadecimal,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
