use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::quiz::{Feedback, QuizEngine};
use crate::ui::layout::option_columns;
use crate::ui::theme::Theme;

/// The term, the numbered answer grid and the feedback line.
pub struct QuestionCard<'a> {
    engine: &'a QuizEngine,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(engine: &'a QuizEngine, selected: usize, theme: &'a Theme) -> Self {
        Self {
            engine,
            selected,
            theme,
        }
    }

    fn option_style(&self, index: usize, option: &str, answer: &str) -> Style {
        let colors = &self.theme.colors;
        match self.engine.feedback() {
            None if self.engine.is_input_locked() => Style::default().fg(colors.muted()),
            None if index == self.selected => Style::default()
                .fg(colors.option_selected_fg())
                .bg(colors.option_selected_bg())
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(colors.option_fg()),
            Some(_) if option == answer => Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
            Some(Feedback::Incorrect { .. }) if index == self.selected => {
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
            }
            Some(_) => Style::default().fg(colors.muted()),
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(question) = self.engine.question() else {
            return;
        };

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

        Paragraph::new(Line::from(Span::styled(
            question.pair.term.as_str(),
            Style::default()
                .fg(colors.term())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(rows[1], buf);

        Paragraph::new(Line::from(Span::styled(
            "What is the translation?",
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(rows[2], buf);

        let columns = option_columns(
            question.options.len(),
            self.engine.difficulty(),
            area.width,
        );
        let grid_rows = question.options.len().div_ceil(columns);
        let row_areas = Layout::vertical(vec![Constraint::Length(3); grid_rows]).split(rows[3]);

        for (row, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                .spacing(1)
                .split(*row_area);
            for (col, cell) in cells.iter().enumerate() {
                let index = row * columns + col;
                let Some(option) = question.options.get(index) else {
                    continue;
                };
                let style = self.option_style(index, option, &question.pair.translation);
                let border = if style.bg.is_some() || style.add_modifier.contains(Modifier::BOLD) {
                    style.fg.unwrap_or(colors.border_focused())
                } else {
                    colors.border()
                };
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{} ", index + 1), Style::default().fg(colors.muted())),
                    Span::styled(option.as_str(), style),
                ]))
                .block(Block::bordered().border_style(Style::default().fg(border)))
                .render(*cell, buf);
            }
        }

        if let Some(feedback) = self.engine.feedback() {
            let color = match feedback {
                Feedback::Correct { .. } => colors.success(),
                Feedback::Incorrect { .. } | Feedback::TimeUp { .. } => colors.error(),
            };
            Paragraph::new(feedback.to_string())
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(rows[4], buf);
        }
    }
}
