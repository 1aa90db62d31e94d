use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::lesson::VocabItem;
use crate::ui::theme::Theme;

pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 4;
const GAP: u16 = 1;

/// Number of card columns that fit in `width`.
pub fn columns_for(width: u16) -> usize {
    (((width + GAP) / (CARD_WIDTH + GAP)) as usize).max(1)
}

pub struct VocabGrid<'a> {
    items: &'a [VocabItem],
    highlighted: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> VocabGrid<'a> {
    pub fn new(items: &'a [VocabItem], highlighted: usize, focused: bool, theme: &'a Theme) -> Self {
        Self {
            items,
            highlighted,
            focused,
            theme,
        }
    }
}

impl Widget for VocabGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let columns = columns_for(area.width);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let highlighted_row = self.highlighted / columns;
        let first_row = highlighted_row.saturating_sub(visible_rows - 1);

        for (i, item) in self.items.iter().enumerate().skip(first_row * columns) {
            let row = (i / columns - first_row) as u16;
            let col = (i % columns) as u16;
            let x = area.x + col * (CARD_WIDTH + GAP);
            let y = area.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > area.y + area.height {
                break;
            }
            let card = Rect::new(x, y, CARD_WIDTH.min(area.x + area.width - x), CARD_HEIGHT);

            let is_highlighted = i == self.highlighted;
            let border = if is_highlighted && self.focused {
                colors.border_focused()
            } else {
                colors.border()
            };
            let block = Block::bordered()
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg()));

            let en_style = Style::default()
                .fg(if is_highlighted { colors.accent() } else { colors.fg() })
                .add_modifier(Modifier::BOLD);
            let lines = vec![
                Line::from(Span::styled(item.en.as_str(), en_style)),
                Line::from(Span::styled(
                    item.pt.as_str(),
                    Style::default().fg(colors.text_muted()),
                )),
            ];
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .render(card, buf);
        }
    }
}
