use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::{WordCursor, WordRow};
use crate::session::exercise::{CheckStatus, ExerciseState};
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

pub const CARD_HEIGHT: u16 = 10;

pub struct ExerciseCard<'a> {
    state: &'a ExerciseState,
    number: usize,
    total: usize,
    cursor: Option<WordCursor>,
    theme: &'a Theme,
}

impl<'a> ExerciseCard<'a> {
    pub fn new(state: &'a ExerciseState, number: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            number,
            total,
            cursor: None,
            theme,
        }
    }

    /// Show the word cursor; only the focused card gets one.
    pub fn cursor(mut self, cursor: Option<WordCursor>) -> Self {
        self.cursor = cursor;
        self
    }

    fn chips(&self, words: &[String], row: WordRow) -> Vec<Span<'a>> {
        let colors = &self.theme.colors;
        let mut spans = Vec::with_capacity(words.len() * 2);
        for (i, word) in words.iter().enumerate() {
            let is_cursor = self
                .cursor
                .is_some_and(|c| c.row == row && c.index == i && !self.state.is_solved());
            let style = if is_cursor {
                Style::default()
                    .bg(colors.highlight_bg())
                    .fg(colors.highlight_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(colors.word_bg()).fg(colors.word_fg())
            };
            spans.push(Span::styled(format!(" {word} "), style));
            spans.push(Span::raw(" "));
        }
        spans
    }
}

impl Widget for ExerciseCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let status = self.state.status();

        let border = match status {
            CheckStatus::Correct => colors.success(),
            CheckStatus::Wrong => colors.error(),
            CheckStatus::Idle if self.cursor.is_some() => colors.border_focused(),
            CheckStatus::Idle => colors.border(),
        };
        let mut block = Block::bordered()
            .title(Span::styled(
                " TRANSLATE ",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(format!(" {}/{} ", self.number, self.total)).right_aligned())
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        if self.state.is_solved() {
            block = block.title(Line::from(" \u{2714} ").right_aligned());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.state.translation),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .render(layout[0], buf);

        let mut answer = vec![Span::styled(" Answer: ", Style::default().fg(colors.text_muted()))];
        if self.state.selected().is_empty() {
            answer.push(Span::styled(
                "Select words to build the sentence...",
                Style::default()
                    .fg(colors.text_muted())
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            answer.extend(self.chips(self.state.selected(), WordRow::Answer));
        }
        Paragraph::new(Line::from(answer))
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        let mut pool = vec![Span::styled(" Words:  ", Style::default().fg(colors.text_muted()))];
        pool.extend(self.chips(self.state.available(), WordRow::Pool));
        Paragraph::new(Line::from(pool))
            .wrap(Wrap { trim: false })
            .render(layout[2], buf);

        let actions = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(layout[3]);

        Paragraph::new(Span::styled(" [r] Reset", Style::default().fg(colors.text_muted())))
            .render(actions[0], buf);

        let (feedback, feedback_style) = match status {
            CheckStatus::Correct => (
                "Excellent!  ",
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            ),
            CheckStatus::Wrong => (
                "Try again  ",
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
            ),
            CheckStatus::Idle => ("", Style::default()),
        };
        let button = if self.state.is_solved() {
            Span::styled(
                " Correct ",
                Style::default().bg(colors.success()).fg(colors.bg()).add_modifier(Modifier::BOLD),
            )
        } else if self.state.can_check() {
            Span::styled(
                " [c] Check Answer ",
                Style::default()
                    .bg(colors.accent())
                    .fg(colors.highlight_fg())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " [c] Check Answer ",
                Style::default().bg(colors.accent_dim()).fg(colors.text_muted()),
            )
        };
        Paragraph::new(Line::from(vec![Span::styled(feedback, feedback_style), button, Span::raw(" ")]))
            .alignment(Alignment::Right)
            .render(actions[1], buf);
    }
}

/// Heading plus every exercise of the lesson, scrolled to the focused one.
pub struct ExerciseList<'a> {
    states: &'a [ExerciseState],
    focused: usize,
    cursor: Option<WordCursor>,
    theme: &'a Theme,
}

impl<'a> ExerciseList<'a> {
    pub fn new(
        states: &'a [ExerciseState],
        focused: usize,
        cursor: Option<WordCursor>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            states,
            focused,
            cursor,
            theme,
        }
    }
}

impl Widget for ExerciseList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let heading = vec![
            Line::from(Span::styled(
                "Practice Makes Perfect",
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Rearrange the words to form correct sentences.",
                Style::default().fg(colors.text_muted()),
            )),
        ];
        Paragraph::new(heading)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        if self.states.is_empty() {
            Paragraph::new(Span::styled(
                "No exercises in this lesson.",
                Style::default().fg(colors.text_muted()),
            ))
            .alignment(Alignment::Center)
            .render(layout[1], buf);
            return;
        }

        let list_area = layout[1];
        let offset = scroll_offset(self.focused, CARD_HEIGHT, list_area.height);
        let mut y = list_area.y;
        let total = self.states.len();

        for (i, state) in self.states.iter().enumerate().skip(offset) {
            let remaining = list_area.y + list_area.height - y;
            if remaining < CARD_HEIGHT.min(list_area.height) || remaining == 0 {
                break;
            }
            let height = CARD_HEIGHT.min(remaining);
            let card_area = Rect::new(list_area.x, y, list_area.width, height);
            let cursor = if i == self.focused { self.cursor } else { None };
            ExerciseCard::new(state, i + 1, total, self.theme)
                .cursor(cursor)
                .render(card_area, buf);
            y += height;
        }
    }
}
