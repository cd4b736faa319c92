use std::{env, fs::File, io::stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{LevelFilter, WriteLogger};

use cheatkeys::cli::Args;
use cheatkeys::config::{EventTrigger, MatcherConfig};
use cheatkeys::event_source::KeyboardEventSource;
use cheatkeys::main_app::{App, check_sequence, run_app_with_event_source};
use cheatkeys::panic_handler;

fn main() -> Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::Config::default(),
        File::create("cheatkeys.log")?,
    )?;

    let args = Args::parse_from(env::args().skip(1))?;
    let config = MatcherConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(sequence) = args.check {
        info!("Checking sequence {sequence:?}");
        let report = check_sequence(config, &sequence);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    panic_handler::initialize_panic_handler();

    info!("Starting cheatkeys");

    enable_raw_mode().map_err(|e| {
        error!("Failed to enable raw mode: {e}");
        anyhow::anyhow!(
            "Failed to initialize terminal: {e}\n\
             Make sure you are running cheatkeys in a terminal, not from a pipe or redirection."
        )
    })?;
    let mut stdout = stdout();

    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        error!("Failed to setup terminal: {e}");
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to setup terminal: {e}")
    })?;

    // Release events are only reported with the enhancement flags on
    let mut release_events = false;
    if config.event_type == EventTrigger::KeyUp {
        release_events = supports_keyboard_enhancement().unwrap_or_else(|e| {
            warn!("Failed to query keyboard enhancement support: {e}");
            false
        });
        if release_events {
            match execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            ) {
                Ok(()) => panic_handler::mark_keyboard_flags_pushed(),
                Err(e) => {
                    error!("Failed to enable key release events: {e}");
                    release_events = false;
                }
            }
        }
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_release_events(config, release_events);
    let mut event_source = KeyboardEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    panic_handler::restore_terminal();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(err) = res {
        error!("Application error: {err:?}");
        println!("{err:?}");
    }

    info!("Shutting down cheatkeys");
    Ok(())
}
