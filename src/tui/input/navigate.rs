use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

use super::drag_mode::enter_drag_mode;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Columns
        KeyCode::Char('h') | KeyCode::Left => move_column(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_column(app, 1),
        KeyCode::Home => {
            app.column_cursor = 0;
            app.clamp_cursor();
        }
        KeyCode::End => {
            app.column_cursor = app.board().len().saturating_sub(1);
            app.clamp_cursor();
        }

        // Items
        KeyCode::Char('j') | KeyCode::Down => move_down(app),
        KeyCode::Char('k') | KeyCode::Up => move_up(app),
        KeyCode::Char('g') => {
            if app.board().item_count_at(app.column_cursor) > 0 {
                app.focus = Focus::Item;
                app.item_cursor = 0;
            }
        }
        KeyCode::Char('G') => {
            let count = app.board().item_count_at(app.column_cursor);
            if count > 0 {
                app.focus = Focus::Item;
                app.item_cursor = count - 1;
            }
        }

        // Lift whatever the cursor is on
        KeyCode::Char('m') | KeyCode::Char(' ') => enter_drag_mode(app),
        _ => {}
    }
}

fn move_column(app: &mut App, delta: isize) {
    app.column_cursor = app.column_cursor.saturating_add_signed(delta);
    app.clamp_cursor();
}

fn move_down(app: &mut App) {
    let count = app.board().item_count_at(app.column_cursor);
    if count == 0 {
        return;
    }
    match app.focus {
        Focus::Header => {
            app.focus = Focus::Item;
            app.item_cursor = 0;
        }
        Focus::Item => app.item_cursor = (app.item_cursor + 1).min(count - 1),
    }
}

fn move_up(app: &mut App) {
    match app.focus {
        Focus::Item if app.item_cursor == 0 => app.focus = Focus::Header,
        Focus::Item => app.item_cursor -= 1,
        Focus::Header => {}
    }
}
