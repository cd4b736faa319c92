pub mod test_helpers {
    use crate::event_source::{Event, KeyCode, KeyEventKind, KeyModifiers, SimulatedEventSource};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    /// Builder for creating test scenarios with simulated, timed user input
    pub struct TestScenarioBuilder {
        events: Vec<(Duration, Event)>,
        pending_gap: Duration,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self {
                events: Vec::new(),
                pending_gap: Duration::ZERO,
            }
        }

        fn push(mut self, event: Event) -> Self {
            let gap = std::mem::take(&mut self.pending_gap);
            self.events.push((gap, event));
            self
        }

        /// Let `ms` milliseconds pass before the next event
        pub fn wait_ms(mut self, ms: u64) -> Self {
            self.pending_gap += Duration::from_millis(ms);
            self
        }

        /// Add a character key press
        pub fn press_char(self, c: char) -> Self {
            self.push(SimulatedEventSource::char_key(c))
        }

        /// Add a key release, which only a key-up listener reacts to
        pub fn release_char(self, c: char) -> Self {
            self.push(SimulatedEventSource::key_event_with_kind(
                KeyCode::Char(c),
                KeyModifiers::empty(),
                KeyEventKind::Release,
            ))
        }

        /// Type every character of `text`, `gap_ms` apart
        pub fn type_text(mut self, text: &str, gap_ms: u64) -> Self {
            for (i, c) in text.chars().enumerate() {
                if i > 0 {
                    self = self.wait_ms(gap_ms);
                }
                self = self.press_char(c);
            }
            self
        }

        /// Press a named key such as Esc or an arrow
        pub fn press_key(self, code: KeyCode) -> Self {
            self.push(SimulatedEventSource::key_event(code, KeyModifiers::empty()))
        }

        /// Quit the application (Ctrl+C)
        pub fn quit(self) -> Self {
            self.push(SimulatedEventSource::ctrl_char_key('c'))
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::with_gaps(self.events)
        }
    }

    /// Create a test terminal for screen assertions
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.hide_cursor().unwrap();
        terminal
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                let cell = buffer.cell((x, y)).unwrap();
                line.push_str(cell.symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            lines.pop();
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use std::time::Duration;

    #[test]
    fn test_scenario_builder() {
        let scenario = TestScenarioBuilder::new()
            .type_text("idfa", 100)
            .wait_ms(1500)
            .press_char('x')
            .quit()
            .build();

        let events = scenario.events;
        assert_eq!(events.len(), 6);
        assert_eq!(events[0].0, Duration::ZERO);
        assert_eq!(events[1].0, Duration::from_millis(100));
        assert_eq!(events[4].0, Duration::from_millis(1500));
        assert_eq!(events[5].0, Duration::ZERO);
    }
}
