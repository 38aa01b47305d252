//! Keyboard commands understood by the viewer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Resolve a key event to a command. Unbound keys and non-press events map to `None`.
pub fn command_for(key_event: &KeyEvent) -> Option<Command> {
    // Terminals with enhanced keyboard reporting also send release/repeat events
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Command::Quit),

        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Command::Quit),

        KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Command::ScrollUp),

        KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Command::ScrollDown),

        _ => None,
    }
}
