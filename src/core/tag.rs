//! Record tag: timestamp plus bracketed severity label

use super::severity::Severity;
use colored::Color;

pub const RESET: &str = "\x1b[0m";

/// 24-bit colors are always written as `38;2;r;g;b`, whatever the
/// terminal advertises.
fn escape(color: Color) -> String {
    match color {
        Color::TrueColor { r, g, b } => format!("\x1b[38;2;{r};{g};{b}m"),
        other => format!("\x1b[{}m", other.to_fg_str()),
    }
}

/// Render the tag that precedes every message.
///
/// With `colored` set the timestamp and the label get the severity's two
/// hues and the tag ends with a reset; otherwise the tag is plain text.
pub fn render_tag(level: Severity, timestamp: &str, colored: bool) -> String {
    if !colored {
        return format!("{timestamp}{}", level.label());
    }

    format!(
        "{}{timestamp}{}{}{RESET}",
        escape(level.timestamp_color()),
        escape(level.label_color()),
        level.label()
    )
}
