pub mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogError, LessonCatalog};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabItem>,
    #[serde(default)]
    pub phrases: Vec<PhraseItem>,
    #[serde(default)]
    pub exercises: Vec<ExerciseItem>,
}

impl Lesson {
    /// Sidebar label: the topic after the "Lesson N –" prefix, or the whole title.
    pub fn short_title(&self) -> &str {
        match self.title.split_once('\u{2013}') {
            Some((_, topic)) if !topic.trim().is_empty() => topic.trim(),
            _ => &self.title,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabItem {
    pub en: String,
    pub pt: String,
    pub tts: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseKind {
    Affirmative,
    Negative,
    Interrogative,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhraseItem {
    pub en: String,
    pub pt: String,
    pub tts: String,
    #[serde(rename = "type", default)]
    pub kind: Option<PhraseKind>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub id: String,
    pub scrambled: Vec<String>,
    /// Exact accepted sentence. Never rendered.
    pub answer: String,
    pub translation: String,
    #[serde(default)]
    pub tts: Option<String>,
}

impl ExerciseItem {
    /// What gets spoken after a correct answer.
    pub fn success_speech(&self) -> &str {
        self.tts.as_deref().unwrap_or(&self.answer)
    }
}

/// Anything that can be read aloud when activated in a list.
pub trait Speakable {
    fn tts(&self) -> &str;
}

impl Speakable for VocabItem {
    fn tts(&self) -> &str {
        &self.tts
    }
}

impl Speakable for PhraseItem {
    fn tts(&self) -> &str {
        &self.tts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_titled(title: &str) -> Lesson {
        Lesson {
            id: 1,
            title: title.to_string(),
            vocabulary: Vec::new(),
            phrases: Vec::new(),
            exercises: Vec::new(),
        }
    }

    #[test]
    fn short_title_strips_lesson_prefix() {
        let lesson = lesson_titled("Lesson 8 \u{2013} Prepositions of Place");
        assert_eq!(lesson.short_title(), "Prepositions of Place");
    }

    #[test]
    fn short_title_without_separator_is_whole_title() {
        let lesson = lesson_titled("Greetings");
        assert_eq!(lesson.short_title(), "Greetings");
    }

    #[test]
    fn short_title_with_empty_topic_is_whole_title() {
        let lesson = lesson_titled("Lesson 1 \u{2013} ");
        assert_eq!(lesson.short_title(), "Lesson 1 \u{2013} ");
    }

    #[test]
    fn phrase_kind_is_optional() {
        let json = r#"{"en": "Hi.", "pt": "Oi.", "tts": "Hi."}"#;
        let phrase: PhraseItem = serde_json::from_str(json).unwrap();
        assert_eq!(phrase.kind, None);

        let json = r#"{"en": "Hi?", "pt": "Oi?", "tts": "Hi?", "type": "interrogative"}"#;
        let phrase: PhraseItem = serde_json::from_str(json).unwrap();
        assert_eq!(phrase.kind, Some(PhraseKind::Interrogative));
    }

    #[test]
    fn success_speech_prefers_tts_over_answer() {
        let mut item = ExerciseItem {
            id: "x1".to_string(),
            scrambled: vec!["b".to_string(), "a".to_string()],
            answer: "a b".to_string(),
            translation: "A B".to_string(),
            tts: None,
        };
        assert_eq!(item.success_speech(), "a b");
        item.tts = Some("A, b.".to_string());
        assert_eq!(item.success_speech(), "A, b.");
    }
}
