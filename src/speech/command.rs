use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::speech::{SpeechError, Speaker, Utterance};

const SPD_SAY_CANCEL_ALL: &[&str] = &["-C"];

/// Host text-to-speech programs, in auto-detection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtsProgram {
    EspeakNg,
    Espeak,
    SpdSay,
    Say,
}

impl TtsProgram {
    pub const ALL: [TtsProgram; 4] = [
        TtsProgram::EspeakNg,
        TtsProgram::Espeak,
        TtsProgram::SpdSay,
        TtsProgram::Say,
    ];

    pub fn binary(self) -> &'static str {
        match self {
            TtsProgram::EspeakNg => "espeak-ng",
            TtsProgram::Espeak => "espeak",
            TtsProgram::SpdSay => "spd-say",
            TtsProgram::Say => "say",
        }
    }

    /// Arguments that flush speech already handed to a daemon. Programs that
    /// speak in-process stop when their child is killed and need none.
    pub fn cancel_args(self) -> Option<&'static [&'static str]> {
        match self {
            // spd-say exits as soon as speech-dispatcher has the message
            TtsProgram::SpdSay => Some(SPD_SAY_CANCEL_ALL),
            TtsProgram::EspeakNg | TtsProgram::Espeak | TtsProgram::Say => None,
        }
    }

    /// Command-line arguments for one utterance.
    pub fn args(self, utterance: &Utterance) -> Vec<String> {
        match self {
            // espeak speaks 175 words/min at normal speed
            TtsProgram::EspeakNg | TtsProgram::Espeak => vec![
                "-v".to_string(),
                utterance.locale.to_ascii_lowercase(),
                "-s".to_string(),
                words_per_minute(175, utterance.rate).to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
            // speech-dispatcher takes a -100..100 offset around normal
            TtsProgram::SpdSay => vec![
                "-l".to_string(),
                utterance.locale.to_string(),
                "-r".to_string(),
                (((utterance.rate - 1.0) * 100.0).round() as i32)
                    .clamp(-100, 100)
                    .to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
            TtsProgram::Say => vec![
                "-r".to_string(),
                words_per_minute(175, utterance.rate).to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
        }
    }
}

fn words_per_minute(normal: u32, rate: f32) -> u32 {
    let percent = (rate * 100.0).round() as u32;
    normal * percent / 100
}

/// Speaks by spawning a TTS program. At most one child is alive at a time.
pub struct CommandSpeaker {
    program: TtsProgram,
    binary: String,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: TtsProgram) -> Self {
        Self {
            program,
            binary: program.binary().to_string(),
            current: None,
        }
    }

    /// Silence the previous utterance, if there was one.
    fn cancel(&mut self) {
        let Some(mut child) = self.current.take() else {
            return;
        };
        // Already finished is fine; kill only fails on an exited child.
        if let Ok(None) = child.try_wait() {
            let _ = child.kill();
        }
        let _ = child.wait();

        if let Some(args) = self.program.cancel_args() {
            // Waited on so the flush reaches the daemon before the next message.
            match self.command().args(args).status() {
                Ok(status) if !status.success() => {
                    debug!(program = %self.binary, %status, "speech cancel failed")
                }
                Ok(_) => {}
                Err(err) => debug!(program = %self.binary, "speech cancel failed: {err}"),
            }
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    fn spawn(&self, utterance: &Utterance) -> Result<Child, SpeechError> {
        self.command()
            .args(self.program.args(utterance))
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.binary.clone(),
                source,
            })
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) {
        self.cancel();
        let utterance = Utterance::new(text);
        match self.spawn(&utterance) {
            Ok(child) => {
                debug!(text, pid = child.id(), "speaking");
                self.current = Some(child);
            }
            Err(err) => warn!("{err}"),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn espeak_args_slow_down_and_set_voice() {
        let args = TtsProgram::EspeakNg.args(&Utterance::new("The box is big"));
        assert_eq!(args, vec!["-v", "en-us", "-s", "157", "--", "The box is big"]);
    }

    #[test]
    fn spd_say_rate_is_an_offset() {
        let args = TtsProgram::SpdSay.args(&Utterance::new("Hi"));
        assert_eq!(args, vec!["-l", "en-US", "-r", "-10", "--", "Hi"]);
    }

    #[test]
    fn say_has_no_locale_flag() {
        let args = TtsProgram::Say.args(&Utterance::new("Hi"));
        assert_eq!(args, vec!["-r", "157", "--", "Hi"]);
    }

    #[test]
    fn text_starting_with_dash_is_not_an_option() {
        let args = TtsProgram::Espeak.args(&Utterance::new("-v"));
        assert_eq!(args.last().map(String::as_str), Some("-v"));
        assert_eq!(args[args.len() - 2], "--");
    }

    #[test]
    fn only_spd_say_needs_a_daemon_cancel() {
        assert_eq!(TtsProgram::SpdSay.cancel_args(), Some(&["-C"][..]));
        assert_eq!(TtsProgram::EspeakNg.cancel_args(), None);
        assert_eq!(TtsProgram::Espeak.cancel_args(), None);
        assert_eq!(TtsProgram::Say.cancel_args(), None);
    }

    #[test]
    fn spawn_failure_is_swallowed() {
        let mut speaker = CommandSpeaker {
            program: TtsProgram::SpdSay,
            binary: "lingodeck-no-such-tts-program".to_string(),
            current: None,
        };
        speaker.speak("hello");
        assert!(speaker.current.is_none());
    }

    #[test]
    fn spawn_error_names_the_program() {
        let speaker = CommandSpeaker {
            program: TtsProgram::Espeak,
            binary: "lingodeck-no-such-tts-program".to_string(),
            current: None,
        };
        let err = speaker.spawn(&Utterance::new("hi")).unwrap_err();
        assert!(err.to_string().starts_with("failed to start lingodeck-no-such-tts-program"));
    }

    #[cfg(unix)]
    #[test]
    fn spd_say_flushes_the_daemon_before_each_new_utterance() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = dir.path().join("fake-spd-say");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$*\" >> '{}'\n", log.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cancels = || {
            std::fs::read_to_string(&log)
                .unwrap_or_default()
                .lines()
                .filter(|line| *line == "-C")
                .count()
        };

        let mut speaker = CommandSpeaker {
            program: TtsProgram::SpdSay,
            binary: script.to_string_lossy().to_string(),
            current: None,
        };
        speaker.speak("Small");
        assert_eq!(cancels(), 0);
        speaker.speak("Try again.");
        assert_eq!(cancels(), 1);
        drop(speaker);
        assert_eq!(cancels(), 2);
    }
}
