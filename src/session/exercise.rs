use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::lesson::ExerciseItem;
use crate::speech::Speaker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Idle,
    Correct,
    /// Cleared by the next select/deselect.
    Wrong,
}

/// Working state of one sentence-building exercise.
///
/// Words are moved between the pool and the answer by position, never by
/// value, so repeated tokens ("the" ... "the") stay distinguishable.
#[derive(Clone, Debug)]
pub struct ExerciseState {
    pub exercise_id: String,
    pub translation: String,
    answer: String,
    success_speech: String,
    initial: Vec<String>,
    available: Vec<String>,
    selected: Vec<String>,
    status: CheckStatus,
}

impl ExerciseState {
    pub fn new<R: Rng + ?Sized>(item: &ExerciseItem, rng: &mut R) -> Self {
        let mut initial = item.scrambled.clone();
        initial.shuffle(rng);

        Self {
            exercise_id: item.id.clone(),
            translation: item.translation.clone(),
            answer: item.answer.clone(),
            success_speech: item.success_speech().to_string(),
            available: initial.clone(),
            initial,
            selected: Vec::new(),
            status: CheckStatus::Idle,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == CheckStatus::Correct
    }

    /// The check action is offered only with a non-empty answer on an unsolved exercise.
    pub fn can_check(&self) -> bool {
        !self.selected.is_empty() && !self.is_solved()
    }

    /// Move the pool word at `pool_index` to the end of the answer.
    pub fn select(&mut self, pool_index: usize) -> Option<&str> {
        if self.is_solved() || pool_index >= self.available.len() {
            return None;
        }
        let word = self.available.remove(pool_index);
        self.selected.push(word);
        self.status = CheckStatus::Idle;
        self.selected.last().map(String::as_str)
    }

    /// Move the answer word at `selected_index` back to the end of the pool.
    pub fn deselect(&mut self, selected_index: usize) -> Option<&str> {
        if self.is_solved() || selected_index >= self.selected.len() {
            return None;
        }
        let word = self.selected.remove(selected_index);
        self.available.push(word);
        self.status = CheckStatus::Idle;
        self.available.last().map(String::as_str)
    }

    /// Compare the built sentence to the answer, byte for byte, and announce the outcome.
    pub fn check(&mut self, speaker: &mut dyn Speaker) -> Option<CheckStatus> {
        if !self.can_check() {
            return None;
        }

        let attempt = self.selected.join(" ");
        if attempt == self.answer {
            self.status = CheckStatus::Correct;
            speaker.speak(&format!("Correct! {}", self.success_speech));
        } else {
            self.status = CheckStatus::Wrong;
            speaker.speak("Try again.");
        }
        debug!(exercise = %self.exercise_id, status = ?self.status, "answer checked");
        Some(self.status)
    }

    /// Back to the original shuffled pool, from any state.
    pub fn reset(&mut self) {
        self.available = self.initial.clone();
        self.selected.clear();
        self.status = CheckStatus::Idle;
    }
}
