use anyhow::Result;
pub use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use std::time::{Duration, Instant};

/// Trait for abstracting event sources to enable testing
pub trait EventSource {
    /// Poll for events with a timeout
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event
    fn read(&mut self) -> Result<Event>;

    /// Timestamp for the event most recently returned by `read`
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Real keyboard event source using crossterm
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// Simulated event source for testing.
///
/// Each event carries the gap since the previous one; time only moves when
/// an event is read.
pub struct SimulatedEventSource {
    pub(crate) events: Vec<(Duration, Event)>,
    current_index: usize,
    clock: Instant,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self::with_gaps(events.into_iter().map(|e| (Duration::ZERO, e)).collect())
    }

    pub fn with_gaps(events: Vec<(Duration, Event)>) -> Self {
        Self {
            events,
            current_index: 0,
            clock: Instant::now(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len().saturating_sub(self.current_index)
    }

    /// Helper method to create a key event
    pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Self::key_event_with_kind(code, modifiers, KeyEventKind::Press)
    }

    pub fn key_event_with_kind(
        code: KeyCode,
        modifiers: KeyModifiers,
        kind: KeyEventKind,
    ) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::empty(),
        })
    }

    /// Helper method to create a simple character key event
    pub fn char_key(c: char) -> Event {
        Self::key_event(KeyCode::Char(c), KeyModifiers::empty())
    }

    /// Helper method to create a Ctrl+char key event
    pub fn ctrl_char_key(c: char) -> Event {
        Self::key_event(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

impl EventSource for SimulatedEventSource {
    /// Always ready: once the script runs out a synthetic quit is pending.
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    fn read(&mut self) -> Result<Event> {
        if let Some((gap, event)) = self.events.get(self.current_index) {
            self.clock += *gap;
            self.current_index += 1;
            Ok(event.clone())
        } else {
            // Quit once the script is exhausted
            Ok(SimulatedEventSource::ctrl_char_key('c'))
        }
    }

    fn now(&self) -> Instant {
        self.clock
    }
}
