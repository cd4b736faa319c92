use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Browser-style lowercase name for a key, or `None` for keys with no
/// sensible name (media keys, caps lock state, ...).
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => " ",
        KeyCode::Char(c) => return Some(c.to_lowercase().collect()),
        KeyCode::F(n) => return Some(format!("f{n}")),
        KeyCode::Enter => "enter",
        KeyCode::Esc => "escape",
        KeyCode::Backspace => "backspace",
        KeyCode::Tab | KeyCode::BackTab => "tab",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::Left => "arrowleft",
        KeyCode::Right => "arrowright",
        KeyCode::Up => "arrowup",
        KeyCode::Down => "arrowdown",
        KeyCode::Modifier(modifier) => modifier_name(modifier),
        _ => return None,
    };
    Some(name.to_string())
}

fn modifier_name(modifier: ModifierKeyCode) -> &'static str {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "control",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "alt",
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => "meta",
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => "hyper",
        ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => "altgraph",
    }
}

/// Ctrl+C quits and never reaches the matcher.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_are_lowercased() {
        assert_eq!(key_name(KeyCode::Char('I')).as_deref(), Some("i"));
        assert_eq!(key_name(KeyCode::Char('3')).as_deref(), Some("3"));
        assert_eq!(key_name(KeyCode::Char('!')).as_deref(), Some("!"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_name(KeyCode::Esc).as_deref(), Some("escape"));
        assert_eq!(key_name(KeyCode::Left).as_deref(), Some("arrowleft"));
        assert_eq!(key_name(KeyCode::F(5)).as_deref(), Some("f5"));
        assert_eq!(
            key_name(KeyCode::Modifier(ModifierKeyCode::RightShift)).as_deref(),
            Some("shift")
        );
        assert_eq!(key_name(KeyCode::Null), None);
    }

    #[test]
    fn test_ctrl_c_is_quit() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty())));
    }
}
