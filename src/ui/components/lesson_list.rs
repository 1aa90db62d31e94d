use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::lesson::Lesson;
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

const ROW_HEIGHT: u16 = 2;

/// Left-hand lesson picker. Only offers lessons that exist in the catalog.
pub struct LessonList<'a> {
    lessons: &'a [Lesson],
    active_id: u32,
    highlighted: usize,
    focused: bool,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> LessonList<'a> {
    pub fn new(lessons: &'a [Lesson], active_id: u32, highlighted: usize, theme: &'a Theme) -> Self {
        Self {
            lessons,
            active_id,
            highlighted,
            focused: false,
            compact: false,
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

impl Widget for LessonList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let base = Style::default().bg(colors.sidebar_bg()).fg(colors.sidebar_fg());

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(if self.focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(base);
        let inner = block.inner(area);
        block.render(area, buf);

        let header_height = if self.compact { 1 } else { 3 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(header_height), Constraint::Min(0)])
            .split(inner);

        let title_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let header = if self.compact {
            vec![Line::from(Span::styled(" EP", title_style))]
        } else {
            vec![
                Line::from(Span::styled(" English Pro", title_style)),
                Line::from(Span::styled(" A1-A2 MASTERY COURSE", base)),
            ]
        };
        Paragraph::new(header).style(base).render(layout[0], buf);

        let list_area = layout[1];
        let offset = scroll_offset(self.highlighted, ROW_HEIGHT, list_area.height);
        let mut y = list_area.y;

        for (i, lesson) in self.lessons.iter().enumerate().skip(offset) {
            if y + ROW_HEIGHT > list_area.y + list_area.height {
                break;
            }
            let is_active = lesson.id == self.active_id;
            let is_highlighted = self.focused && i == self.highlighted;

            let row_style = if is_active {
                Style::default()
                    .bg(colors.highlight_bg())
                    .fg(colors.highlight_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            let indicator = if is_highlighted { ">" } else { " " };
            let badge = format!("{indicator}{:>3} ", lesson.id);

            let mut spans = vec![Span::styled(badge, row_style)];
            if !self.compact {
                let room = list_area.width.saturating_sub(6) as usize;
                let label: String = lesson.short_title().chars().take(room).collect();
                spans.push(Span::styled(label, row_style));
            }

            let row = Rect::new(list_area.x, y, list_area.width, 1);
            Paragraph::new(Line::from(spans))
                .style(row_style)
                .render(row, buf);
            y += ROW_HEIGHT;
        }
    }
}
