//! Pure level-to-style mapping for console output.

use colored::{Color, Colorize};

use super::level::LogLevel;

/// Background color for a level. Total over the level set.
pub fn background(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Blue,
        LogLevel::Http => Color::Magenta,
        LogLevel::Verbose => Color::Cyan,
        LogLevel::Debug => Color::Green,
        LogLevel::Silly => Color::BrightBlack,
    }
}

/// Same mapping keyed by level name, with a white fallback for any
/// unrecognized input.
pub fn background_for(name: &str) -> Color {
    name.parse::<LogLevel>()
        .map(background)
        .unwrap_or(Color::White)
}

/// The painted level tag that opens every rendered line: upper-cased,
/// space-prefixed, padded to 9 columns.
pub fn level_tag(level: LogLevel) -> String {
    paint_tag(level.as_str())
}

/// [`level_tag`] keyed by level name, falling back to the default style
/// for unknown names rather than failing.
pub fn paint_tag(name: &str) -> String {
    let label = format!("{:<9}", format!(" {}", name.to_uppercase()));
    label.on_color(background_for(name)).to_string()
}
