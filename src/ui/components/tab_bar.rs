use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::navigation::Tab;
use crate::ui::theme::Theme;

pub struct TabBar<'a> {
    active: Tab,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: Tab, theme: &'a Theme) -> Self {
        Self { active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut spans = Vec::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let label = format!("  {} {}  ", i + 1, tab.label());
            let style = if *tab == self.active {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(colors.text_muted())
            };
            spans.push(Span::styled(label, style));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(colors.header_bg()))
            .render(area, buf);
    }
}
