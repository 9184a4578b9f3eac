use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the shell receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Menu navigation and page shortcuts
    #[default]
    Menu,
    /// The masked key field of the contact gate
    GateInput,
    /// The `:` command prompt
    Command,
}

/// What a key press means in the current focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MenuUp,
    MenuDown,
    OpenSelected,
    OpenIndex(usize),
    Back,
    Forward,
    Reveal,
    FocusGate,
    Blur,
    EnterCommand,
    Insert(char),
    Delete,
    Submit,
    ScrollUp,
    ScrollDown,
    None,
}

/// Map a key event to an action
pub fn map_key(focus: Focus, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match focus {
        Focus::Menu => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::MenuUp,
            KeyCode::Down | KeyCode::Char('j') => Action::MenuDown,
            KeyCode::Enter => Action::OpenSelected,
            KeyCode::Char(c @ '1'..='9') => Action::OpenIndex(c as usize - '1' as usize),
            KeyCode::Left | KeyCode::Char('b') => Action::Back,
            KeyCode::Right | KeyCode::Char('f') => Action::Forward,
            KeyCode::Char('d') => Action::Reveal,
            KeyCode::Tab => Action::FocusGate,
            KeyCode::Char(':') => Action::EnterCommand,
            KeyCode::PageUp => Action::ScrollUp,
            KeyCode::PageDown => Action::ScrollDown,
            _ => Action::None,
        },
        Focus::GateInput | Focus::Command => match key.code {
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc | KeyCode::Tab => Action::Blur,
            KeyCode::Backspace => Action::Delete,
            KeyCode::Char(c) => Action::Insert(c),
            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(map_key(Focus::Menu, key(KeyCode::Char('1'))), Action::OpenIndex(0));
        assert_eq!(map_key(Focus::Menu, key(KeyCode::Char('4'))), Action::OpenIndex(3));
        assert_eq!(map_key(Focus::Menu, key(KeyCode::Left)), Action::Back);
        assert_eq!(map_key(Focus::Menu, key(KeyCode::Char('d'))), Action::Reveal);
        assert_eq!(map_key(Focus::Menu, key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_text_fields_capture_letters() {
        // 'q' and 'd' are characters while typing, not shortcuts
        assert_eq!(map_key(Focus::GateInput, key(KeyCode::Char('q'))), Action::Insert('q'));
        assert_eq!(map_key(Focus::Command, key(KeyCode::Char('d'))), Action::Insert('d'));
        assert_eq!(map_key(Focus::GateInput, key(KeyCode::Enter)), Action::Submit);
        assert_eq!(map_key(Focus::GateInput, key(KeyCode::Esc)), Action::Blur);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for focus in [Focus::Menu, Focus::GateInput, Focus::Command] {
            assert_eq!(map_key(focus, ctrl_c), Action::Quit);
        }
    }
}
