//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Border of the focused form field.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Header and status bar background.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Destructive confirmation and error status.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Finished tasks read green, everything else red.
pub fn finish_color(finish: &str) -> Color {
    if finish == "Yes" {
        Color::Green
    } else {
        Color::Red
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "High" => Color::LightRed,
        "Medium" => Color::Yellow,
        "Low" => Color::Gray,
        _ => Color::DarkGray,
    }
}
