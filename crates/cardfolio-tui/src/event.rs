use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Poll interval used when the configured frame rate is zero
const FALLBACK_FRAME: Duration = Duration::from_millis(16);

/// Application events
#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Nothing arrived within the poll interval
    Tick,
}

/// Terminal event source with two poll rates: a slow idle tick and a frame
/// tick used while something on screen is moving
pub struct EventHandler {
    idle: Duration,
    frame: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let frame = match animation_fps {
            0 => FALLBACK_FRAME,
            fps => Duration::from_millis(1000 / fps as u64),
        };
        Self {
            idle: Duration::from_millis(tick_rate_ms),
            frame,
        }
    }

    pub fn poll_interval(&self, animating: bool) -> Duration {
        if animating {
            self.frame
        } else {
            self.idle
        }
    }

    /// Wait for the next event; `Tick` when the interval passes quietly
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.poll_interval(animating))? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Map a crossterm event; key releases and repeats are dropped
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}
