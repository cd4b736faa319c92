use crate::code_table::CodeTable;
use crate::config::{InadmissiblePolicy, MatcherConfig};
use log::debug;
use serde::Serialize;
use std::time::{Duration, Instant};

/// A single key press as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub timestamp: Instant,
}

impl KeyPress {
    pub fn new(key: impl AsRef<str>, timestamp: Instant) -> Self {
        Self {
            key: key.as_ref().to_lowercase(),
            timestamp,
        }
    }
}

/// Buffer contents after an event, plus the label when the buffer is a known code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub buffer: String,
    pub label: Option<String>,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }

    pub fn label_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(placeholder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherState {
    Idle,
    Accumulating,
}

pub struct KeystrokeMatcher {
    key_sequence: Vec<String>,
    last_key_time: Option<Instant>,
    delay: Duration,
    admissibility_filter: bool,
    on_inadmissible: InadmissiblePolicy,
    codes: CodeTable,
}

impl Default for KeystrokeMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl KeystrokeMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        let config = config.normalized();
        Self {
            key_sequence: Vec::new(),
            last_key_time: None,
            delay: config.keystroke_delay(),
            admissibility_filter: config.admissibility_filter,
            on_inadmissible: config.on_inadmissible,
            codes: config.code_table,
        }
    }

    /// Only single characters in `[a-z0-9]` pass when the filter is on.
    fn is_admissible(&self, key: &str) -> bool {
        if !self.admissibility_filter {
            return true;
        }
        let mut chars = key.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if c.is_ascii_lowercase() || c.is_ascii_digit()
        )
    }

    /// A gap exactly equal to the delay still continues the sequence.
    fn should_reset_key_sequence(&self, now: Instant) -> bool {
        match self.last_key_time {
            Some(last_time) => now.saturating_duration_since(last_time) > self.delay,
            None => true,
        }
    }

    pub fn on_key_event(&mut self, event: &KeyPress) -> MatchOutcome {
        let key = event.key.to_lowercase();

        if !self.is_admissible(&key) {
            match self.on_inadmissible {
                InadmissiblePolicy::Reset => {
                    debug!("Inadmissible key {key:?}, resetting sequence");
                    self.clear();
                }
                InadmissiblePolicy::Ignore => {
                    debug!("Inadmissible key {key:?} ignored");
                }
            }
            return self.outcome();
        }

        if self.should_reset_key_sequence(event.timestamp) {
            self.key_sequence.clear();
        }

        self.key_sequence.push(key);
        self.last_key_time = Some(event.timestamp);

        self.outcome()
    }

    fn outcome(&self) -> MatchOutcome {
        let buffer = self.current_sequence();
        let label = self.codes.lookup(&buffer).map(str::to_string);
        MatchOutcome { buffer, label }
    }

    pub fn clear(&mut self) {
        self.key_sequence.clear();
        self.last_key_time = None;
    }

    pub fn current_sequence(&self) -> String {
        self.key_sequence.concat()
    }

    pub fn buffer(&self) -> &[String] {
        &self.key_sequence
    }

    pub fn state(&self) -> MatcherState {
        if self.key_sequence.is_empty() {
            MatcherState::Idle
        } else {
            MatcherState::Accumulating
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }
}
