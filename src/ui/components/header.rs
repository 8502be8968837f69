use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::difficulty::Difficulty;
use crate::engine::scoring::format_compact;
use crate::ui::theme::Theme;

pub struct Header<'a> {
    pub points: u64,
    pub streak: u32,
    pub difficulty: Difficulty,
    pub file_name: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(points: u64, streak: u32, difficulty: Difficulty, theme: &'a Theme) -> Self {
        Self {
            points,
            streak,
            difficulty,
            file_name: None,
            theme,
        }
    }

    pub fn file_name(mut self, name: Option<&'a str>) -> Self {
        self.file_name = name;
        self
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                " wordquiz ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut left = vec![
            Span::styled(
                format!(" {} ", format_compact(self.points)),
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("points", Style::default().fg(colors.muted())),
        ];
        if self.streak > 1 {
            left.push(Span::raw("  "));
            left.push(Span::styled(
                format!("{}x streak!", self.streak),
                Style::default()
                    .fg(colors.streak())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let mut right = Vec::new();
        if let Some(name) = self.file_name {
            right.push(Span::styled(name, Style::default().fg(colors.muted())));
            right.push(Span::raw("  "));
        }
        right.push(Span::styled(
            format!("[{}] ", self.difficulty.label()),
            Style::default().fg(colors.accent()),
        ));
        let right = Line::from(right);
        let columns = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(right.width() as u16),
        ])
        .split(inner);

        Paragraph::new(Line::from(left)).render(columns[0], buf);
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(columns[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeColors;

    fn theme() -> Theme {
        Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_header_shows_compact_points_and_streak() {
        let theme = theme();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        Header::new(1_240, 3, Difficulty::Hard, &theme)
            .file_name(Some("fruit.txt"))
            .render(area, &mut buf);

        let line = row_text(&buf, 1);
        assert!(line.contains("1.2K points"));
        assert!(line.contains("3x streak!"));
        assert!(line.contains("fruit.txt"));
        assert!(line.contains("[Hard]"));
    }

    #[test]
    fn test_header_hides_single_streak() {
        let theme = theme();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        Header::new(10, 1, Difficulty::Easy, &theme).render(area, &mut buf);
        assert!(!row_text(&buf, 1).contains("streak"));
    }
}
