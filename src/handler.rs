use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Command};
use crate::nav::Transition;

/// Map a key press to a picker command.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Left => Some(Command::GoBack),
        KeyCode::Right => Some(Command::EnterDirectory),
        KeyCode::Char(' ') => Some(Command::ToggleSelect),
        KeyCode::Char('q') => Some(Command::Quit),
        // Raw mode delivers Ctrl-C as a key, not SIGINT.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        _ => None,
    }
}

/// Handle a key event.
///
/// Any key clears the previous warning. A staged directory change is
/// committed here so the next frame always plans the settled state.
pub fn handle_key_event(app: &mut App, key: KeyEvent, capacity: usize) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    app.clear_warning();
    let Some(command) = command_for(key) else {
        return;
    };
    if app.apply(command, capacity) == Transition::PendingChange {
        app.commit_directory_change();
    }
}
