use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::lesson::{PhraseItem, PhraseKind};
use crate::ui::layout::scroll_offset;
use crate::ui::theme::{Theme, ThemeColors};

const ITEM_HEIGHT: u16 = 3;

pub struct PhraseList<'a> {
    items: &'a [PhraseItem],
    highlighted: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> PhraseList<'a> {
    pub fn new(items: &'a [PhraseItem], highlighted: usize, focused: bool, theme: &'a Theme) -> Self {
        Self {
            items,
            highlighted,
            focused,
            theme,
        }
    }
}

/// Untyped phrases share the question colour.
fn kind_color(kind: Option<PhraseKind>, colors: &ThemeColors) -> Color {
    match kind {
        Some(PhraseKind::Affirmative) => colors.affirmative(),
        Some(PhraseKind::Negative) => colors.negative(),
        Some(PhraseKind::Interrogative) | None => colors.interrogative(),
    }
}

impl Widget for PhraseList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let tip = Paragraph::new(Line::from(vec![
            Span::styled(" Tip: ", Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)),
            Span::styled(
                "Press Enter on any phrase to hear the pronunciation. Pay attention to the intonation of questions!",
                Style::default().fg(colors.fg()),
            ),
        ]))
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(colors.accent_dim())));
        tip.render(layout[0], buf);

        let list_area = layout[1];
        let offset = scroll_offset(self.highlighted, ITEM_HEIGHT, list_area.height);
        let mut y = list_area.y;

        for (i, item) in self.items.iter().enumerate().skip(offset) {
            if y + ITEM_HEIGHT > list_area.y + list_area.height {
                break;
            }
            let is_highlighted = i == self.highlighted;
            let bar = Style::default().fg(kind_color(item.kind, colors));
            let en_style = Style::default()
                .fg(if is_highlighted { colors.accent() } else { colors.fg() })
                .add_modifier(Modifier::BOLD);
            let marker = if is_highlighted && self.focused { " \u{266a}" } else { "" };

            let lines = vec![
                Line::from(vec![
                    Span::styled(" \u{258c} ", bar),
                    Span::styled(item.en.as_str(), en_style),
                    Span::styled(marker, Style::default().fg(colors.accent())),
                ]),
                Line::from(vec![
                    Span::styled(" \u{258c} ", bar),
                    Span::styled(item.pt.as_str(), Style::default().fg(colors.text_muted())),
                ]),
            ];
            let row = Rect::new(list_area.x, y, list_area.width, ITEM_HEIGHT - 1);
            Paragraph::new(lines).render(row, buf);
            y += ITEM_HEIGHT;
        }
    }
}
