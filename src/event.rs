use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyEvent};
use tracing::warn;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Forwards terminal input from a reader thread. Nothing here is timed:
/// the UI only changes in response to input.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(w, h)) => tx.send(AppEvent::Resize(w, h)),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        warn!("terminal read failed: {err}");
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
