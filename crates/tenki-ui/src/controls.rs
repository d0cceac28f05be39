//! Keyboard focus and key bindings for the forecast screen.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which control receives selection keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Parent,
    Child,
    Fetch,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Parent => Focus::Child,
            Focus::Child => Focus::Fetch,
            Focus::Fetch => Focus::Parent,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Parent => Focus::Fetch,
            Focus::Child => Focus::Parent,
            Focus::Fetch => Focus::Child,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    /// Step the focused selector by the given offset
    Step(isize),
    /// Move the first visible card by the given offset
    Scroll(isize),
    /// Press the fetch control
    Fetch,
}

/// Map a key event to an action. Releases and repeats are ignored.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            Some(Action::Step(-1))
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            Some(Action::Step(1))
        }
        KeyCode::PageUp | KeyCode::Char('[') => Some(Action::Scroll(-1)),
        KeyCode::PageDown | KeyCode::Char(']') => Some(Action::Scroll(1)),
        KeyCode::Enter | KeyCode::Char('f') => Some(Action::Fetch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::default();
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Parent);
        assert_eq!(Focus::Parent.prev(), Focus::Fetch);
        assert_eq!(Focus::Fetch.next(), Focus::Parent);
    }

    #[test]
    fn bindings() {
        assert_eq!(action_for(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(action_for(press(KeyCode::Tab)), Some(Action::FocusNext));
        assert_eq!(action_for(press(KeyCode::BackTab)), Some(Action::FocusPrev));
        assert_eq!(action_for(press(KeyCode::Left)), Some(Action::Step(-1)));
        assert_eq!(action_for(press(KeyCode::Char('l'))), Some(Action::Step(1)));
        assert_eq!(action_for(press(KeyCode::PageDown)), Some(Action::Scroll(1)));
        assert_eq!(action_for(press(KeyCode::Char('['))), Some(Action::Scroll(-1)));
        assert_eq!(action_for(press(KeyCode::Enter)), Some(Action::Fetch));
        assert_eq!(action_for(press(KeyCode::Char('f'))), Some(Action::Fetch));
        assert_eq!(action_for(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for(key), None);
    }
}
