use crate::lesson::{Lesson, LessonCatalog};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Vocabulary,
    Phrases,
    Exercises,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Vocabulary, Tab::Phrases, Tab::Exercises];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Vocabulary => "Vocabulary",
            Tab::Phrases => "Phrases",
            Tab::Exercises => "Exercises",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Vocabulary => 0,
            Tab::Phrases => 1,
            Tab::Exercises => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which lesson and which tab the user is looking at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    active_lesson_id: u32,
    active_tab: Tab,
}

impl Navigation {
    pub fn new(catalog: &LessonCatalog) -> Self {
        Self {
            active_lesson_id: catalog.first().id,
            active_tab: Tab::Vocabulary,
        }
    }

    pub fn active_lesson_id(&self) -> u32 {
        self.active_lesson_id
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_lesson<'c>(&self, catalog: &'c LessonCatalog) -> &'c Lesson {
        catalog.get(self.active_lesson_id)
    }

    /// Switching lessons always lands on the vocabulary tab.
    pub fn select_lesson(&mut self, id: u32) {
        self.active_lesson_id = id;
        self.active_tab = Tab::Vocabulary;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }
}
