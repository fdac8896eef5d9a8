//! Layout helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle centered in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    centered_columns(percent_x, rows[1])
}

/// A rectangle centered in `r` with a fixed height (clamped to `r`).
pub fn centered_rect_with_height(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = r.y + (r.height - height) / 2;
    centered_columns(percent_x, Rect::new(r.x, top, r.width, height))
}

fn centered_columns(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r)[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_height_popup_is_clamped_and_centered() {
        let area = Rect::new(0, 0, 100, 10);
        let popup = centered_rect_with_height(50, 30, area);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.y, 0);
        let popup = centered_rect_with_height(50, 4, area);
        assert_eq!((popup.y, popup.height), (3, 4));
        assert_eq!((popup.x, popup.width), (25, 50));
    }
}
