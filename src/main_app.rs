use crate::background::{self, BackgroundImage};
use crate::config::{EventTrigger, MatcherConfig};
use crate::inputs::event_source::{Event, EventSource};
use crate::inputs::{KeyPress, KeystrokeMatcher, MatchOutcome, is_quit, key_name};
use crate::theme;
use anyhow::Result;
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owns the single matcher for the session and what the screen shows.
pub struct App {
    matcher: KeystrokeMatcher,
    trigger: EventTrigger,
    trigger_fell_back: bool,
    image_dir: PathBuf,
    image_extension: String,
    placeholder: String,
    last_outcome: MatchOutcome,
    background: Option<BackgroundImage>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl App {
    pub fn new(config: MatcherConfig) -> Self {
        Self::with_release_events(config, true)
    }

    /// Build the app for a terminal that may not report key releases, in
    /// which case a key-up listener falls back to key down.
    pub fn with_release_events(config: MatcherConfig, release_events_supported: bool) -> Self {
        let config = config.normalized();
        let trigger = config.event_type.resolve(release_events_supported);
        let trigger_fell_back = trigger != config.event_type;
        let image_dir = config.image_dir.clone();
        let image_extension = config.image_extension.clone();
        let placeholder = config.placeholder.clone();
        let matcher = KeystrokeMatcher::new(config);
        info!(
            "Listening on {} with {}ms delay, {} codes",
            trigger.as_str(),
            matcher.delay().as_millis(),
            matcher.codes().len()
        );
        Self {
            matcher,
            trigger,
            trigger_fell_back,
            image_dir,
            image_extension,
            placeholder,
            last_outcome: MatchOutcome {
                buffer: String::new(),
                label: None,
            },
            background: None,
        }
    }

    pub fn handle_key_press(&mut self, press: KeyPress) -> &MatchOutcome {
        let outcome = self.matcher.on_key_event(&press);
        if let Some(label) = &outcome.label {
            info!("Cheat code {:?} matched: {label}", outcome.buffer);
        } else {
            debug!("Buffer now {:?}", outcome.buffer);
        }

        self.background =
            background::resolve(&self.image_dir, &outcome.buffer, &self.image_extension);
        self.last_outcome = outcome;
        &self.last_outcome
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_event(&mut self, event: Event, timestamp: Instant) -> bool {
        let Event::Key(key) = event else {
            return false;
        };

        if is_quit(&key) {
            return true;
        }
        if !self.trigger.accepts(key.kind) {
            return false;
        }

        if let Some(name) = key_name(key.code) {
            self.handle_key_press(KeyPress::new(name, timestamp));
        }
        false
    }

    pub fn trigger(&self) -> EventTrigger {
        self.trigger
    }

    /// `true` when key up was configured but the terminal cannot report releases.
    pub fn trigger_fell_back(&self) -> bool {
        self.trigger_fell_back
    }

    pub fn outcome(&self) -> &MatchOutcome {
        &self.last_outcome
    }

    pub fn message(&self) -> &str {
        self.last_outcome.label_or(&self.placeholder)
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn matcher(&self) -> &KeystrokeMatcher {
        &self.matcher
    }

    pub fn draw(&self, f: &mut Frame) {
        let [title, input, message, image, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(f.area());

        let mut title_spans = vec![
            Span::styled("cheatkeys", Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!(
                    "  {} / {}ms",
                    self.trigger.as_str(),
                    self.matcher.delay().as_millis()
                ),
                Style::default().fg(theme::DIM),
            ),
        ];
        if self.trigger_fell_back {
            title_spans.push(Span::styled(
                "  (keyup unsupported)",
                Style::default().fg(theme::MISS),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(title_spans)), title);

        let typing = !self.last_outcome.buffer.is_empty();
        f.render_widget(
            Paragraph::new(self.last_outcome.buffer.as_str())
                .style(Style::default().fg(theme::TEXT))
                .block(
                    Block::bordered()
                        .title("User input")
                        .border_style(theme::border_style(typing)),
                ),
            input,
        );

        f.render_widget(
            Paragraph::new(self.message())
                .style(theme::label_style(self.last_outcome.is_match()))
                .block(
                    Block::bordered()
                        .title("Cheat")
                        .border_style(theme::border_style(self.last_outcome.is_match())),
                ),
            message,
        );

        let background = self
            .background
            .as_ref()
            .map(BackgroundImage::describe)
            .unwrap_or_default();
        f.render_widget(
            Paragraph::new(background)
                .style(Style::default().fg(theme::DIM))
                .block(
                    Block::bordered()
                        .title("Background")
                        .border_style(theme::border_style(false)),
                ),
            image,
        );

        f.render_widget(
            Paragraph::new("type a cheat code  ctrl+c quit")
                .style(Style::default().fg(theme::DIM)),
            footer,
        );
    }
}

pub fn run_app_with_event_source<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut E,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if !event_source.poll(POLL_INTERVAL)? {
            continue;
        }

        let event = event_source.read()?;
        if app.handle_event(event, event_source.now()) {
            info!("Quit requested");
            return Ok(());
        }
    }
}

/// Result of feeding a typed sequence through a fresh matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub buffer: String,
    pub label: Option<String>,
    pub message: String,
    pub image: Option<BackgroundImage>,
}

/// Feed every character of `sequence` as one key press with no gap between them.
pub fn check_sequence(config: MatcherConfig, sequence: &str) -> CheckReport {
    let mut app = App::new(config);
    let now = Instant::now();
    for c in sequence.chars() {
        app.handle_key_press(KeyPress::new(c.to_string(), now));
    }
    CheckReport {
        buffer: app.last_outcome.buffer.clone(),
        label: app.last_outcome.label.clone(),
        message: app.message().to_string(),
        image: app.background.clone(),
    }
}
