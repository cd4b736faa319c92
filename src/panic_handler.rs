use crossterm::{
    event::PopKeyboardEnhancementFlags,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use log::error;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};

static KEYBOARD_FLAGS_PUSHED: AtomicBool = AtomicBool::new(false);

/// Record that keyboard enhancement flags were pushed so teardown pops them.
pub fn mark_keyboard_flags_pushed() {
    KEYBOARD_FLAGS_PUSHED.store(true, Ordering::SeqCst);
}

/// Returns whether flags were pushed, clearing the mark so they pop once.
fn take_keyboard_flags_pushed() -> bool {
    KEYBOARD_FLAGS_PUSHED.swap(false, Ordering::SeqCst)
}

pub fn initialize_panic_handler() {
    better_panic::install();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            error!("Panic: {msg}");
        } else if let Some(msg) = panic_info.payload().downcast_ref::<String>() {
            error!("Panic: {msg}");
        } else {
            error!("Panic with unknown payload");
        }

        restore_terminal();
        if cfg!(debug_assertions) {
            default_hook(panic_info);
        } else {
            report_crash(panic_info);
        }
        std::process::exit(1);
    }));
}

/// Write a crash report through human-panic for release builds
fn report_crash(panic_info: &PanicHookInfo) {
    let meta = human_panic::metadata!();
    let dump = human_panic::handle_dump(&meta, panic_info);
    let _ = human_panic::print_msg(dump, &meta);
}

/// Restore terminal to a clean state
///
/// Specifically handles:
/// - Disabling raw mode
/// - Exiting alternate screen
/// - Popping keyboard enhancement flags pushed for key-up events
/// - Showing the cursor
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    if take_keyboard_flags_pushed() {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = execute!(io::stderr(), crossterm::cursor::Show);
    let _ = writeln!(io::stderr());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_flags_popped_only_once_after_push() {
        assert!(!take_keyboard_flags_pushed());

        mark_keyboard_flags_pushed();
        assert!(take_keyboard_flags_pushed());
        assert!(!take_keyboard_flags_pushed());
    }
}
