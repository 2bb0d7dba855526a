//! Color codec: semantic color codes to ANSI SGR escape bytes.
//!
//! Every color maps to a fixed byte string, so rasterizing never allocates.
//! `Color::None` maps to the reset sequence.

use serde::{Deserialize, Serialize};

/// Escape sequence that resets all styling.
pub const RESET: &[u8] = b"\x1b[0m";

/// Length of the longest escape [`Color::escape`] can return (`ESC[0;107m`).
pub const MAX_ESCAPE_LEN: usize = 8;

/// Foreground and background colors, discriminants are the SGR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Color {
    /// Default terminal styling.
    #[default]
    None = 0,

    FgBlack = 30,
    FgRed = 31,
    FgGreen = 32,
    FgYellow = 33,
    FgBlue = 34,
    FgMagenta = 35,
    FgCyan = 36,
    FgWhite = 37,

    FgHiBlack = 90,
    FgHiRed = 91,
    FgHiGreen = 92,
    FgHiYellow = 93,
    FgHiBlue = 94,
    FgHiMagenta = 95,
    FgHiCyan = 96,
    FgHiWhite = 97,

    BgBlack = 40,
    BgRed = 41,
    BgGreen = 42,
    BgYellow = 43,
    BgBlue = 44,
    BgMagenta = 45,
    BgCyan = 46,
    BgWhite = 47,

    BgHiBlack = 100,
    BgHiRed = 101,
    BgHiGreen = 102,
    BgHiYellow = 103,
    BgHiBlue = 104,
    BgHiMagenta = 105,
    BgHiCyan = 106,
    BgHiWhite = 107,
}

impl Color {
    /// All colors, `None` first.
    pub const ALL: [Color; 33] = [
        Color::None,
        Color::FgBlack,
        Color::FgRed,
        Color::FgGreen,
        Color::FgYellow,
        Color::FgBlue,
        Color::FgMagenta,
        Color::FgCyan,
        Color::FgWhite,
        Color::FgHiBlack,
        Color::FgHiRed,
        Color::FgHiGreen,
        Color::FgHiYellow,
        Color::FgHiBlue,
        Color::FgHiMagenta,
        Color::FgHiCyan,
        Color::FgHiWhite,
        Color::BgBlack,
        Color::BgRed,
        Color::BgGreen,
        Color::BgYellow,
        Color::BgBlue,
        Color::BgMagenta,
        Color::BgCyan,
        Color::BgWhite,
        Color::BgHiBlack,
        Color::BgHiRed,
        Color::BgHiGreen,
        Color::BgHiYellow,
        Color::BgHiBlue,
        Color::BgHiMagenta,
        Color::BgHiCyan,
        Color::BgHiWhite,
    ];

    /// SGR code, 0 for `None`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Bytes that switch subsequent output to this color.
    ///
    /// `None` yields [`RESET`].
    pub const fn escape(self) -> &'static [u8] {
        match self {
            Color::None => RESET,

            Color::FgBlack => b"\x1b[0;30m",
            Color::FgRed => b"\x1b[0;31m",
            Color::FgGreen => b"\x1b[0;32m",
            Color::FgYellow => b"\x1b[0;33m",
            Color::FgBlue => b"\x1b[0;34m",
            Color::FgMagenta => b"\x1b[0;35m",
            Color::FgCyan => b"\x1b[0;36m",
            Color::FgWhite => b"\x1b[0;37m",

            Color::FgHiBlack => b"\x1b[0;90m",
            Color::FgHiRed => b"\x1b[0;91m",
            Color::FgHiGreen => b"\x1b[0;92m",
            Color::FgHiYellow => b"\x1b[0;93m",
            Color::FgHiBlue => b"\x1b[0;94m",
            Color::FgHiMagenta => b"\x1b[0;95m",
            Color::FgHiCyan => b"\x1b[0;96m",
            Color::FgHiWhite => b"\x1b[0;97m",

            Color::BgBlack => b"\x1b[0;40m",
            Color::BgRed => b"\x1b[0;41m",
            Color::BgGreen => b"\x1b[0;42m",
            Color::BgYellow => b"\x1b[0;43m",
            Color::BgBlue => b"\x1b[0;44m",
            Color::BgMagenta => b"\x1b[0;45m",
            Color::BgCyan => b"\x1b[0;46m",
            Color::BgWhite => b"\x1b[0;47m",

            Color::BgHiBlack => b"\x1b[0;100m",
            Color::BgHiRed => b"\x1b[0;101m",
            Color::BgHiGreen => b"\x1b[0;102m",
            Color::BgHiYellow => b"\x1b[0;103m",
            Color::BgHiBlue => b"\x1b[0;104m",
            Color::BgHiMagenta => b"\x1b[0;105m",
            Color::BgHiCyan => b"\x1b[0;106m",
            Color::BgHiWhite => b"\x1b[0;107m",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
