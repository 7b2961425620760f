//! Terminal colors for formatters.

use std::{fmt, io};

/// Whether a formatter should color its output.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Color if the target is a terminal.
    #[default]
    Automatic,
    Always,
    Never,
}

impl From<bool> for ColorSetting {
    fn from(value: bool) -> Self {
        match value {
            true => ColorSetting::Always,
            false => ColorSetting::Never,
        }
    }
}

impl ColorSetting {
    pub fn use_color(self, target: &impl SupportsColor) -> bool {
        match self {
            ColorSetting::Automatic => target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

pub(crate) mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
}

/// Targets that can tell whether they render ANSI colors.
///
/// Implemented for every terminal handle. Implement it for other targets,
/// like an in-memory buffer, to use them with
/// [`ColorSetting::Automatic`].
pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}

/// Text that is wrapped in a color if enabled.
pub(crate) struct Paint<'s> {
    pub text: &'s str,
    pub color: &'static str,
    pub enabled: bool,
}

impl fmt::Display for Paint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.enabled {
            true => write!(f, "{}{}{}", self.color, self.text, colors::RESET),
            false => f.write_str(self.text),
        }
    }
}
