pub mod command;

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use command::{CommandSpeaker, TtsProgram};

/// Playback rate relative to the engine's normal speed.
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_LOCALE: &str = "en-US";

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// A single pronunciation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: &'static str,
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            locale: SPEECH_LOCALE,
            rate: SPEECH_RATE,
        }
    }
}

/// Fire-and-forget speech output. Each call preempts whatever is still playing.
pub trait Speaker {
    fn speak(&mut self, text: &str);
}

/// Used when the host has no speech capability.
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, text: &str) {
        debug!(text, "speech unavailable, skipping");
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechBackend {
    #[default]
    Auto,
    EspeakNg,
    Espeak,
    SpdSay,
    Say,
    None,
}

/// Pick a speaker for the configured backend. Falls back to silence when
/// the program cannot be found.
pub fn detect(backend: &SpeechBackend) -> Box<dyn Speaker> {
    let program = match backend {
        SpeechBackend::None => None,
        SpeechBackend::Auto => TtsProgram::ALL
            .iter()
            .copied()
            .find(|p| program_on_path(p.binary())),
        SpeechBackend::EspeakNg => Some(TtsProgram::EspeakNg),
        SpeechBackend::Espeak => Some(TtsProgram::Espeak),
        SpeechBackend::SpdSay => Some(TtsProgram::SpdSay),
        SpeechBackend::Say => Some(TtsProgram::Say),
    };

    match program.filter(|p| program_on_path(p.binary())) {
        Some(program) => {
            info!(program = program.binary(), "speech enabled");
            Box::new(CommandSpeaker::new(program))
        }
        None => {
            info!(?backend, "no speech program available, speech is silent");
            Box::new(SilentSpeaker)
        }
    }
}

fn program_on_path(binary: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| {
        env::split_paths(&paths).any(|dir| is_file(&dir.join(binary)))
    })
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
