use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::path_input::PathInput;
use crate::ui::theme::Theme;

/// Idle screen: choose a word list file or restart the loaded one.
pub struct UploadPanel<'a> {
    pub input: &'a PathInput,
    pub label: &'a str,
    pub loaded_words: usize,
    pub saved_count: usize,
    pub theme: &'a Theme,
}

impl Widget for UploadPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

        let intro = vec![
            Line::from(Span::styled(
                "Vocabulary quiz",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "One pair per line, e.g.  apple:olma",
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(intro)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let (before, at, after) = self.input.render_parts();
        let cursor_style = Style::default()
            .fg(colors.bg())
            .bg(colors.fg());
        let mut spans = vec![
            Span::styled(" File: ", Style::default().fg(colors.muted())),
            Span::styled(before, Style::default().fg(colors.fg())),
        ];
        match at {
            Some(ch) => spans.push(Span::styled(ch.to_string(), cursor_style)),
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        spans.push(Span::styled(after, Style::default().fg(colors.fg())));
        Paragraph::new(Line::from(spans))
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .render(rows[2], buf);

        let mut notes = Vec::new();
        if self.input.completion_error {
            notes.push(Line::from(Span::styled(
                " Cannot list that directory",
                Style::default().fg(colors.warning()),
            )));
        }
        if self.loaded_words > 0 {
            notes.push(Line::from(Span::styled(
                format!(" {} word pairs loaded, press [r] to start again", self.loaded_words),
                Style::default().fg(colors.fg()),
            )));
        }
        if self.saved_count > 0 {
            notes.push(Line::from(Span::styled(
                format!(" {} saved word lists, press [f] to open one", self.saved_count),
                Style::default().fg(colors.fg()),
            )));
        }
        Paragraph::new(notes).render(rows[3], buf);
    }
}
