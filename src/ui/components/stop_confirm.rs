use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct StopConfirm<'a> {
    pub streak: u32,
    pub theme: &'a Theme,
}

impl Widget for StopConfirm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Stop quiz? ")
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let warning = if self.streak > 0 {
            format!("Your streak of {} will be lost", self.streak)
        } else {
            "Your streak will be lost".to_string()
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                warning,
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Points already earned are kept.",
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[y] Stop   [n] Keep going",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
