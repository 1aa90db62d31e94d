use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::lesson::Lesson;

const LESSONS_JSON: &str = include_str!("../../assets/lessons.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("lesson data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("lesson catalog is empty")]
    Empty,

    #[error("duplicate lesson id {0}")]
    DuplicateLesson(u32),

    #[error("duplicate exercise id {0:?}")]
    DuplicateExercise(String),

    #[error("exercise {0:?} has no words")]
    EmptyExercise(String),

    #[error("exercise {id:?}: answer {answer:?} does not use exactly the scrambled words")]
    AnswerMismatch { id: String, answer: String },
}

/// Immutable, ordered set of lessons. Never empty once constructed.
#[derive(Clone, Debug)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Parse and validate the lesson data compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let lessons: Vec<Lesson> = serde_json::from_str(LESSONS_JSON)?;
        Self::from_lessons(lessons)
    }

    pub fn from_lessons(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        if lessons.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut lesson_ids = HashSet::new();
        let mut exercise_ids = HashSet::new();
        for lesson in &lessons {
            if !lesson_ids.insert(lesson.id) {
                return Err(CatalogError::DuplicateLesson(lesson.id));
            }
            for exercise in &lesson.exercises {
                if !exercise_ids.insert(exercise.id.as_str()) {
                    return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
                }
                if exercise.scrambled.is_empty() {
                    return Err(CatalogError::EmptyExercise(exercise.id.clone()));
                }
                let answer_words: Vec<&str> = exercise.answer.split(' ').collect();
                let scrambled: Vec<&str> = exercise.scrambled.iter().map(String::as_str).collect();
                if word_counts(&answer_words) != word_counts(&scrambled) {
                    return Err(CatalogError::AnswerMismatch {
                        id: exercise.id.clone(),
                        answer: exercise.answer.clone(),
                    });
                }
            }
        }

        Ok(Self { lessons })
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn first(&self) -> &Lesson {
        &self.lessons[0]
    }

    /// Look up a lesson, falling back to the first one for unknown ids.
    pub fn get(&self, id: u32) -> &Lesson {
        match self.lessons.iter().find(|l| l.id == id) {
            Some(lesson) => lesson,
            None => {
                debug!(lesson_id = id, "unknown lesson id, using first lesson");
                self.first()
            }
        }
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == id)
    }
}

/// Multiset of words, so repeated tokens like "the" are counted.
fn word_counts<'a>(words: &[&'a str]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for &word in words {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::ExerciseItem;

    fn exercise(id: &str, scrambled: &[&str], answer: &str) -> ExerciseItem {
        ExerciseItem {
            id: id.to_string(),
            scrambled: scrambled.iter().map(|w| w.to_string()).collect(),
            answer: answer.to_string(),
            translation: String::new(),
            tts: None,
        }
    }

    fn lesson(id: u32, exercises: Vec<ExerciseItem>) -> Lesson {
        Lesson {
            id,
            title: format!("Lesson {id}"),
            vocabulary: Vec::new(),
            phrases: Vec::new(),
            exercises,
        }
    }

    #[test]
    fn bundled_catalog_loads() {
        let catalog = LessonCatalog::bundled().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().id, 6);
    }

    #[test]
    fn get_unknown_id_falls_back_to_first() {
        let catalog = LessonCatalog::bundled().unwrap();
        assert_eq!(catalog.get(999).id, catalog.first().id);
        assert_eq!(catalog.get(8).id, 8);
    }

    #[test]
    fn position_of_known_and_unknown_ids() {
        let catalog = LessonCatalog::bundled().unwrap();
        assert_eq!(catalog.position(6), Some(0));
        assert_eq!(catalog.position(10), Some(4));
        assert_eq!(catalog.position(999), None);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            LessonCatalog::from_lessons(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn duplicate_lesson_id_is_rejected() {
        let result = LessonCatalog::from_lessons(vec![lesson(1, Vec::new()), lesson(1, Vec::new())]);
        assert!(matches!(result, Err(CatalogError::DuplicateLesson(1))));
    }

    #[test]
    fn duplicate_exercise_id_across_lessons_is_rejected() {
        let result = LessonCatalog::from_lessons(vec![
            lesson(1, vec![exercise("e1", &["a", "b"], "a b")]),
            lesson(2, vec![exercise("e1", &["c", "d"], "d c")]),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateExercise(id)) if id == "e1"));
    }

    #[test]
    fn answer_must_use_the_scrambled_words() {
        let result =
            LessonCatalog::from_lessons(vec![lesson(1, vec![exercise("e1", &["is", "big"], "It is big")])]);
        assert!(matches!(result, Err(CatalogError::AnswerMismatch { .. })));
    }

    #[test]
    fn repeated_words_are_counted() {
        let ok = LessonCatalog::from_lessons(vec![lesson(
            1,
            vec![exercise("e1", &["the", "on", "the", "book", "desk"], "the book on the desk")],
        )]);
        assert!(ok.is_ok());

        let missing_one = LessonCatalog::from_lessons(vec![lesson(
            1,
            vec![exercise("e1", &["the", "on", "book", "desk"], "the book on the desk")],
        )]);
        assert!(matches!(missing_one, Err(CatalogError::AnswerMismatch { .. })));
    }

    #[test]
    fn empty_scramble_is_rejected() {
        let result = LessonCatalog::from_lessons(vec![lesson(1, vec![exercise("e1", &[], "")])]);
        assert!(matches!(result, Err(CatalogError::EmptyExercise(_))));
    }
}
