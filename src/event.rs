use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::error::Result;

/// Terminal events the picker reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(u16, u16),
}

impl Event {
    /// Keep only the crossterm events the picker reacts to.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) => Some(Event::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }
}

/// Block until the next relevant terminal event arrives.
pub fn next() -> Result<Event> {
    loop {
        if let Some(event) = Event::from_crossterm(event::read()?) {
            return Ok(event);
        }
    }
}
