use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::engine::difficulty::Difficulty;

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Columns for the answer grid. Up to two options stack vertically; more
/// spread out as the terminal widens, and the six options of hard mode get a
/// third column on wide terminals.
pub fn option_columns(option_count: usize, difficulty: Difficulty, width: u16) -> usize {
    if option_count <= 2 {
        1
    } else if option_count > 4 {
        match difficulty {
            Difficulty::Hard if width >= 90 => 3,
            Difficulty::Hard if width >= 60 => 2,
            Difficulty::Hard => 1,
            _ => 2,
        }
    } else if width >= 60 {
        2
    } else {
        1
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut current = String::from(" ");

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.trim().is_empty() {
            format!(" {hint}")
        } else {
            format!("{current}   {hint}")
        };
        if candidate.chars().count() <= width || current.trim().is_empty() {
            current = candidate;
        } else {
            out.push(current);
            current = format!(" {hint}");
        }
    }

    if !current.trim().is_empty() {
        out.push(current);
    }
    out
}

/// A popup of roughly `percent_x` by `percent_y` of `area`, never smaller
/// than a readable minimum and never larger than `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 44;
    const MIN_POPUP_HEIGHT: u16 = 9;

    let width = (area.width.saturating_mul(percent_x.min(100)) / 100)
        .max(MIN_POPUP_WIDTH)
        .min(area.width);
    let height = (area.height.saturating_mul(percent_y.min(100)) / 100)
        .max(MIN_POPUP_HEIGHT)
        .min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_columns() {
        assert_eq!(option_columns(2, Difficulty::Easy, 120), 1);
        assert_eq!(option_columns(4, Difficulty::Medium, 120), 2);
        assert_eq!(option_columns(4, Difficulty::Medium, 40), 1);
        assert_eq!(option_columns(6, Difficulty::Hard, 120), 3);
        assert_eq!(option_columns(6, Difficulty::Hard, 70), 2);
        assert_eq!(option_columns(6, Difficulty::Hard, 40), 1);
        // Six options outside hard mode only happen after a difficulty
        // change mid-question; keep them in two columns.
        assert_eq!(option_columns(5, Difficulty::Medium, 40), 2);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[1-4] Answer", "[s] Speak", "[w] Save"], 26);
        assert_eq!(lines, vec![" [1-4] Answer   [s] Speak", " [w] Save"]);
    }

    #[test]
    fn test_pack_hint_lines_empty() {
        assert!(pack_hint_lines(&[], 40).is_empty());
        assert!(pack_hint_lines(&["a"], 0).is_empty());
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 6);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect, area);

        let big = Rect::new(0, 0, 200, 60);
        let rect = centered_rect(50, 50, big);
        assert_eq!(rect, Rect::new(50, 15, 100, 30));
    }
}
