//! Plain-text formatting helpers shared by the renderers.

use lscope_common::constants::REPORT_SECTION;

/// Formats a section heading: `[container] <label>`.
pub fn section(label: &str) -> String {
    format!("[{REPORT_SECTION}] {label}")
}

/// Formats a labelled value, padding the label to `width` columns.
pub fn field(label: &str, width: usize, value: &str) -> String {
    format!("{label:<width$}{value}")
}

/// Display width of `text` in characters.
pub fn width_of(text: &str) -> usize {
    text.chars().count()
}
