use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::engine::difficulty::{ALL_DIFFICULTIES, Difficulty};
use crate::engine::scoring::points_for;
use crate::ui::theme::Theme;

/// Difficulty picker. Each row shows what the level changes.
pub struct SettingsPanel<'a> {
    pub current: Difficulty,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Difficulty ")
            .title_bottom(" [Enter] Choose  [Esc] Close ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        for (i, level) in ALL_DIFFICULTIES.iter().enumerate() {
            let is_selected = i == self.selected;
            let marker = if *level == self.current { "*" } else { " " };
            let style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                Span::styled(if is_selected { " > " } else { "   " }, style),
                Span::styled(format!("{marker} {:<7}", level.label()), style),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "       {}s per question, {} options, up to {} points",
                    level.time_limit(),
                    level.option_count(),
                    points_for(10, *level)
                ),
                Style::default().fg(colors.muted()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
