use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys the host keeps for itself; these never reach the practice loop.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Raw identifier for a key-down, as handed to the practice controller.
///
/// Printable keys yield the character itself (`" "` for the space bar);
/// everything else gets a descriptive name that no layout label matches.
pub fn key_identifier(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(ch) => return Some(ch.to_string()),
        KeyCode::F(n) => return Some(format!("F{n}")),
        KeyCode::Esc => "Escape",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::Modifier(_) => "Modifier",
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    #[test]
    fn test_printable_keys_pass_through() {
        assert_eq!(key_identifier(KeyCode::Char('a')), Some("a".to_string()));
        assert_eq!(key_identifier(KeyCode::Char(' ')), Some(" ".to_string()));
        assert_eq!(key_identifier(KeyCode::Char(';')), Some(";".to_string()));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_identifier(KeyCode::Esc), Some("Escape".to_string()));
        assert_eq!(key_identifier(KeyCode::F(5)), Some("F5".to_string()));
        assert_eq!(key_identifier(KeyCode::Null), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(is_quit(&ctrl_c));
        assert!(!is_quit(&plain_c));
        assert_eq!(plain_c.kind, KeyEventKind::Press);
    }
}
