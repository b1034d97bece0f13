//! Utility functions for rendering UI components

/// Narrowest a card may get before the grid drops a column.
pub const CARD_MIN_WIDTH: u16 = 26;
/// Border plus name, artist and status lines.
pub const CARD_HEIGHT: u16 = 5;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// `m:ss` for a position in seconds. Negative or non-finite input shows `0:00`.
pub fn format_duration(secs: f64) -> String {
    let total_seconds = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// How many card columns fit in `width` cells.
pub fn grid_columns(width: u16) -> usize {
    (width / CARD_MIN_WIDTH).max(1) as usize
}

/// How many card rows fit in `height` cells.
pub fn grid_rows(height: u16) -> usize {
    (height / CARD_HEIGHT).max(1) as usize
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
