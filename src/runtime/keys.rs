//! Key bindings, resolved per focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Focus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Type(char),
    Erase,
    Submit,
    FocusInput,
    FocusLibrary,
    CursorDown,
    CursorUp,
    Click,
    NextActive,
    PrevActive,
    Reload,
}

pub fn intent_for(focus: Focus, key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match focus {
        Focus::Input => match key.code {
            KeyCode::Enter => Some(Intent::Submit),
            KeyCode::Backspace => Some(Intent::Erase),
            KeyCode::Tab | KeyCode::Esc => Some(Intent::FocusLibrary),
            KeyCode::Char(c) if !c.is_control() => Some(Intent::Type(c)),
            _ => None,
        },
        Focus::Library => match key.code {
            KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Intent::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Intent::CursorUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Click),
            KeyCode::Char('l') => Some(Intent::NextActive),
            KeyCode::Char('h') => Some(Intent::PrevActive),
            KeyCode::Char('r') => Some(Intent::Reload),
            KeyCode::Char('i') | KeyCode::Tab => Some(Intent::FocusInput),
            _ => None,
        },
    }
}
