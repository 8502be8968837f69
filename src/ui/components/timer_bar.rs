use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// One-row countdown bar with the seconds left in the middle.
pub struct TimerBar<'a> {
    pub remaining: u32,
    pub limit: u32,
    pub theme: &'a Theme,
}

impl<'a> TimerBar<'a> {
    pub fn new(remaining: u32, limit: u32, theme: &'a Theme) -> Self {
        Self {
            remaining: remaining.min(limit),
            limit,
            theme,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.remaining as f64 / self.limit as f64
        }
    }
}

impl Widget for TimerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let fill = colors.timer(self.remaining, self.limit);
        let filled_width = (self.ratio() * area.width as f64).round() as u16;

        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_style(style);
        }

        let label = format!("{}s", self.remaining);
        let label_x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
        buf.set_string(label_x, area.y, &label, Style::default());
    }
}
