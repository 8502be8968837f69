use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::store::schema::SavedFile;
use crate::ui::theme::Theme;

pub struct FileManager<'a> {
    pub files: &'a [SavedFile],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl Widget for FileManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Saved word lists ")
            .title_bottom(" [Enter] Load  [d] Delete  [Esc] Close ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.files.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No saved files yet",
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        // Keep the selection visible when the list is taller than the popup.
        let visible = inner.height as usize;
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = self
            .files
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, file)| {
                let is_selected = i == self.selected;
                let name_style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(vec![
                    Span::styled(if is_selected { " > " } else { "   " }, name_style),
                    Span::styled(file.name.as_str(), name_style),
                    Span::styled(
                        format!(
                            "  {} words, saved {}",
                            file.words.len(),
                            file.saved_at.format("%Y-%m-%d %H:%M")
                        ),
                        Style::default().fg(colors.muted()),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeColors;
    use crate::words::WordPair;

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
        }
        out
    }

    #[test]
    fn test_empty_list_message() {
        let theme = Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        };
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        FileManager {
            files: &[],
            selected: 0,
            theme: &theme,
        }
        .render(area, &mut buf);
        assert!(text(&buf).contains("No saved files yet"));
    }

    #[test]
    fn test_lists_word_counts() {
        let theme = Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        };
        let files = vec![SavedFile::new(
            "fruit.txt",
            vec![WordPair::new("apple", "olma"), WordPair::new("pear", "nok")],
        )];
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        FileManager {
            files: &files,
            selected: 0,
            theme: &theme,
        }
        .render(area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("> fruit.txt"));
        assert!(rendered.contains("2 words"));
    }
}
