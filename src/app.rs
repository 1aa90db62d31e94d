use rand::rngs::SmallRng;
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::config::Config;
use crate::lesson::{Lesson, LessonCatalog, Speakable};
use crate::session::exercise::{CheckStatus, ExerciseState};
use crate::session::navigation::{Navigation, Tab};
use crate::speech::Speaker;
use crate::ui::components::vocab_grid;
use crate::ui::layout::AppLayout;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Lessons,
    Content,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordRow {
    #[default]
    Pool,
    Answer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordCursor {
    pub row: WordRow,
    pub index: usize,
}

pub struct App {
    pub catalog: LessonCatalog,
    pub navigation: Navigation,
    /// One per exercise of the active lesson, rebuilt when the lesson changes.
    pub exercises: Vec<ExerciseState>,
    pub pane: Pane,
    pub lesson_cursor: usize,
    pub item_cursor: usize,
    pub exercise_cursor: usize,
    pub word_cursor: WordCursor,
    pub theme: Theme,
    pub config: Config,
    pub viewport: Rect,
    pub should_quit: bool,
    speaker: Box<dyn Speaker>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        catalog: LessonCatalog,
        config: Config,
        theme: Theme,
        speaker: Box<dyn Speaker>,
        rng: SmallRng,
    ) -> Self {
        let navigation = Navigation::new(&catalog);
        let mut app = Self {
            catalog,
            navigation,
            exercises: Vec::new(),
            pane: Pane::Content,
            lesson_cursor: 0,
            item_cursor: 0,
            exercise_cursor: 0,
            word_cursor: WordCursor::default(),
            theme,
            config,
            viewport: Rect::new(0, 0, 120, 40),
            should_quit: false,
            speaker,
            rng,
        };
        app.load_exercises();
        app
    }

    pub fn active_lesson(&self) -> &Lesson {
        self.navigation.active_lesson(&self.catalog)
    }

    pub fn active_tab(&self) -> Tab {
        self.navigation.active_tab()
    }

    fn load_exercises(&mut self) {
        let lesson = self.navigation.active_lesson(&self.catalog);
        self.exercises = lesson
            .exercises
            .iter()
            .map(|item| ExerciseState::new(item, &mut self.rng))
            .collect();
        self.exercise_cursor = 0;
        self.word_cursor = WordCursor::default();
    }

    // --- Lesson list ---

    pub fn focus_lessons(&mut self) {
        self.pane = Pane::Lessons;
        self.lesson_cursor = self
            .catalog
            .position(self.navigation.active_lesson_id())
            .unwrap_or(0);
    }

    pub fn focus_content(&mut self) {
        self.pane = Pane::Content;
    }

    pub fn lesson_cursor_next(&mut self) {
        self.lesson_cursor = (self.lesson_cursor + 1) % self.catalog.len();
    }

    pub fn lesson_cursor_prev(&mut self) {
        if self.lesson_cursor > 0 {
            self.lesson_cursor -= 1;
        } else {
            self.lesson_cursor = self.catalog.len() - 1;
        }
    }

    /// Open the lesson under the list cursor and move focus to its content.
    pub fn open_highlighted_lesson(&mut self) {
        let id = self.catalog.lessons()[self.lesson_cursor.min(self.catalog.len() - 1)].id;
        self.open_lesson(id);
    }

    pub fn open_lesson(&mut self, id: u32) {
        self.navigation.select_lesson(id);
        self.item_cursor = 0;
        self.load_exercises();
        self.pane = Pane::Content;
        info!(lesson_id = self.navigation.active_lesson_id(), "lesson opened");
    }

    // --- Tabs ---

    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.navigation.active_tab() {
            self.item_cursor = 0;
        }
        self.navigation.select_tab(tab);
        self.pane = Pane::Content;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.active_tab().next());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(self.active_tab().prev());
    }

    // --- Vocabulary and phrases ---

    fn item_count(&self) -> usize {
        let lesson = self.active_lesson();
        match self.active_tab() {
            Tab::Vocabulary => lesson.vocabulary.len(),
            Tab::Phrases => lesson.phrases.len(),
            Tab::Exercises => self.exercises.len(),
        }
    }

    /// Vocabulary cards per row, as the grid is drawn at the current terminal size.
    pub fn vocab_columns(&self) -> usize {
        let layout = AppLayout::new(self.viewport, self.config.sidebar_width, 1);
        vocab_grid::columns_for(layout.body().width)
    }

    pub fn move_item(&mut self, delta: isize) {
        let count = self.item_count();
        if count == 0 {
            self.item_cursor = 0;
            return;
        }
        let target = self.item_cursor as isize + delta;
        self.item_cursor = target.clamp(0, count as isize - 1) as usize;
    }

    pub fn move_item_vertical(&mut self, rows: isize) {
        let step = match self.active_tab() {
            Tab::Vocabulary => self.vocab_columns() as isize,
            _ => 1,
        };
        self.move_item(rows * step);
    }

    /// Speak the highlighted vocabulary card or phrase.
    pub fn activate_item(&mut self) -> bool {
        let lesson = self.navigation.active_lesson(&self.catalog);
        match self.navigation.active_tab() {
            Tab::Vocabulary => speak_item(&lesson.vocabulary, self.item_cursor, self.speaker.as_mut()),
            Tab::Phrases => speak_item(&lesson.phrases, self.item_cursor, self.speaker.as_mut()),
            Tab::Exercises => false,
        }
    }

    // --- Exercises ---

    pub fn focused_exercise(&self) -> Option<&ExerciseState> {
        self.exercises.get(self.exercise_cursor)
    }

    pub fn move_exercise(&mut self, delta: isize) {
        if self.exercises.is_empty() {
            return;
        }
        let target = self.exercise_cursor as isize + delta;
        self.exercise_cursor = target.clamp(0, self.exercises.len() as isize - 1) as usize;
        self.word_cursor = WordCursor::default();
        self.clamp_word_cursor();
    }

    pub fn toggle_word_row(&mut self) {
        self.word_cursor.row = match self.word_cursor.row {
            WordRow::Pool => WordRow::Answer,
            WordRow::Answer => WordRow::Pool,
        };
        self.word_cursor.index = 0;
        self.clamp_word_cursor();
    }

    pub fn move_word(&mut self, delta: isize) {
        let len = self.row_len(self.word_cursor.row);
        if len == 0 {
            return;
        }
        let target = self.word_cursor.index as isize + delta;
        self.word_cursor.index = target.clamp(0, len as isize - 1) as usize;
    }

    /// Move the word under the cursor between the pool and the answer.
    pub fn activate_word(&mut self) -> bool {
        let cursor = self.word_cursor;
        let Some(state) = self.exercises.get_mut(self.exercise_cursor) else {
            return false;
        };
        let moved = match cursor.row {
            WordRow::Pool => state.select(cursor.index).is_some(),
            WordRow::Answer => state.deselect(cursor.index).is_some(),
        };
        self.clamp_word_cursor();
        moved
    }

    pub fn check_exercise(&mut self) -> Option<CheckStatus> {
        let state = self.exercises.get_mut(self.exercise_cursor)?;
        let status = state.check(self.speaker.as_mut());
        if status.is_none() {
            debug!(exercise = %state.exercise_id, "check ignored");
        }
        status
    }

    pub fn reset_exercise(&mut self) {
        if let Some(state) = self.exercises.get_mut(self.exercise_cursor) {
            state.reset();
        }
        self.word_cursor = WordCursor::default();
        self.clamp_word_cursor();
    }

    fn row_len(&self, row: WordRow) -> usize {
        self.focused_exercise().map_or(0, |state| match row {
            WordRow::Pool => state.available().len(),
            WordRow::Answer => state.selected().len(),
        })
    }

    /// Keep the cursor on a real word, hopping rows when one empties.
    fn clamp_word_cursor(&mut self) {
        if self.row_len(self.word_cursor.row) == 0 {
            let other = match self.word_cursor.row {
                WordRow::Pool => WordRow::Answer,
                WordRow::Answer => WordRow::Pool,
            };
            if self.row_len(other) > 0 {
                self.word_cursor = WordCursor { row: other, index: 0 };
            } else {
                self.word_cursor.index = 0;
            }
            return;
        }
        let len = self.row_len(self.word_cursor.row);
        self.word_cursor.index = self.word_cursor.index.min(len - 1);
    }

    // --- Footer ---

    pub fn footer_hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        match self.pane {
            Pane::Lessons => {
                hints.extend(["[\u{2191}\u{2193}] Lesson", "[Enter] Open"]);
            }
            Pane::Content => match self.active_tab() {
                Tab::Vocabulary | Tab::Phrases => {
                    hints.extend(["[\u{2191}\u{2193}\u{2190}\u{2192}] Move", "[Enter] Listen", "[Esc] Lessons"]);
                }
                Tab::Exercises => {
                    hints.extend([
                        "[\u{2190}\u{2192}] Word",
                        "[\u{2191}\u{2193}] Row",
                        "[Enter] Move word",
                        "[c] Check",
                        "[r] Reset",
                        "[[/]] Exercise",
                        "[Esc] Lessons",
                    ]);
                }
            },
        }
        hints.extend(["[Tab/1-3] Tab", "[q] Quit"]);
        hints
    }
}

fn speak_item<T: Speakable>(items: &[T], index: usize, speaker: &mut dyn Speaker) -> bool {
    match items.get(index) {
        Some(item) => {
            speaker.speak(item.tts());
            true
        }
        None => false,
    }
}
