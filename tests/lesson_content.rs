use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use regex::Regex;

use lingodeck::app::{App, WordCursor, WordRow};
use lingodeck::config::Config;
use lingodeck::lesson::LessonCatalog;
use lingodeck::session::exercise::{CheckStatus, ExerciseState};
use lingodeck::session::navigation::Tab;
use lingodeck::speech::Speaker;
use lingodeck::ui::theme::Theme;

#[derive(Clone, Default)]
struct Spoken(Rc<RefCell<Vec<String>>>);

impl Speaker for Spoken {
    fn speak(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_string());
    }
}

fn app_with_seed(seed: u64) -> (App, Spoken) {
    let spoken = Spoken::default();
    let app = App::new(
        LessonCatalog::bundled().unwrap(),
        Config::default(),
        Theme::default(),
        Box::new(spoken.clone()),
        SmallRng::seed_from_u64(seed),
    );
    (app, spoken)
}

fn sorted<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut v: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
    v.sort();
    v
}

#[test]
fn every_answer_uses_exactly_its_scrambled_words() {
    let catalog = LessonCatalog::bundled().unwrap();
    for lesson in catalog.lessons() {
        for ex in &lesson.exercises {
            let answer: Vec<&str> = ex.answer.split(' ').collect();
            assert_eq!(sorted(&answer), sorted(&ex.scrambled), "exercise {}", ex.id);
        }
    }
}

#[test]
fn exercise_ids_are_unique_and_named_after_their_lesson() {
    let catalog = LessonCatalog::bundled().unwrap();
    let pattern = Regex::new(r"^l(\d+)e\d+$").unwrap();
    let mut seen = HashSet::new();
    for lesson in catalog.lessons() {
        for ex in &lesson.exercises {
            assert!(seen.insert(ex.id.clone()), "duplicate id {}", ex.id);
            let caps = pattern.captures(&ex.id).unwrap_or_else(|| panic!("bad id {}", ex.id));
            assert_eq!(caps[1].parse::<u32>().unwrap(), lesson.id);
        }
    }
}

#[test]
fn every_lesson_has_content_in_each_tab() {
    let catalog = LessonCatalog::bundled().unwrap();
    let ids: Vec<u32> = catalog.lessons().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    for lesson in catalog.lessons() {
        assert!(!lesson.vocabulary.is_empty());
        assert!(!lesson.phrases.is_empty());
        assert_eq!(lesson.exercises.len(), 5);
        assert!(lesson.vocabulary.iter().all(|v| !v.tts.is_empty()));
        assert!(lesson.phrases.iter().all(|p| !p.tts.is_empty()));
    }
}

#[test]
fn unknown_lesson_id_gives_first_lesson() {
    let catalog = LessonCatalog::bundled().unwrap();
    let lesson = catalog.get(999);
    assert_eq!(lesson.id, 6);
    assert_eq!(lesson.short_title(), "Opposite Adjectives");
}

#[test]
fn shuffles_are_reproducible_per_seed() {
    let (a, _) = app_with_seed(99);
    let (b, _) = app_with_seed(99);
    for (x, y) in a.exercises.iter().zip(&b.exercises) {
        assert_eq!(x.available(), y.available());
    }
}

#[test]
fn every_bundled_exercise_is_solvable_from_its_shuffle() {
    let catalog = LessonCatalog::bundled().unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);
    for lesson in catalog.lessons() {
        for item in &lesson.exercises {
            let mut spoken = Spoken::default();
            let mut state = ExerciseState::new(item, &mut rng);
            for word in item.answer.split(' ') {
                let idx = state.available().iter().position(|w| w == word).unwrap();
                state.select(idx);
            }
            assert_eq!(state.check(&mut spoken), Some(CheckStatus::Correct), "{}", item.id);
            assert_eq!(
                spoken.0.borrow().as_slice(),
                [format!("Correct! {}", item.success_speech())]
            );
        }
    }
}

#[test]
fn switching_lessons_from_exercises_lands_on_vocabulary() {
    let (mut app, _) = app_with_seed(1);
    app.select_tab(Tab::Exercises);
    app.focus_lessons();
    // lesson 8 is third in the list
    app.lesson_cursor_next();
    app.lesson_cursor_next();
    app.open_highlighted_lesson();
    assert_eq!(app.active_lesson().id, 8);
    assert_eq!(app.active_tab(), Tab::Vocabulary);
}

#[test]
fn l6e1_walkthrough() {
    let (mut app, spoken) = app_with_seed(5);
    app.select_tab(Tab::Exercises);
    assert_eq!(app.focused_exercise().unwrap().exercise_id, "l6e1");

    // Wrong order first.
    for word in ["box", "The", "is", "big"] {
        let idx = app.exercises[0].available().iter().position(|w| w == word).unwrap();
        app.word_cursor = WordCursor { row: WordRow::Pool, index: idx };
        app.activate_word();
    }
    assert_eq!(app.check_exercise(), Some(CheckStatus::Wrong));

    app.reset_exercise();
    for word in ["The", "box", "is", "big"] {
        let idx = app.exercises[0].available().iter().position(|w| w == word).unwrap();
        app.word_cursor = WordCursor { row: WordRow::Pool, index: idx };
        app.activate_word();
    }
    assert_eq!(app.check_exercise(), Some(CheckStatus::Correct));
    assert_eq!(app.check_exercise(), None);

    assert_eq!(
        *spoken.0.borrow(),
        vec!["Try again.".to_string(), "Correct! The box is big".to_string()]
    );
}
