mod drag_mode;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::ops::drag::DragEvent;

use drag_mode::handle_drag;
use navigate::handle_navigate;

pub use drag_mode::{Direction, drop_target};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    // Ctrl+C quits from any mode; an active drag is cancelled first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        if app.mode == Mode::Drag {
            app.dispatch(DragEvent::Cancel);
        }
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Drag => handle_drag(app, key),
    }
}

/// The terminal lost focus. A gesture cannot survive that.
pub fn handle_focus_lost(app: &mut App) {
    if app.mode == Mode::Drag {
        tracing::debug!("focus lost during drag");
        app.dispatch(DragEvent::Cancel);
    }
}
