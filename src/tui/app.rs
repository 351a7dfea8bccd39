use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::seed_io;
use crate::model::board::{Board, Column};
use crate::model::config::Config;
use crate::ops::commit::CommitKind;
use crate::ops::drag::{DragEvent, DragSession, SubjectType};
use crate::ops::scroll_sync::ScrollSyncGuard;
use crate::ops::store::{BoardStore, Outcome};
use crate::ops::window::WindowModel;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// A drag gesture is in progress
    Drag,
}

/// What the cursor rests on inside the focused column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The column header; lifting drags the column
    Header,
    /// An item card; lifting drags the item
    Item,
}

/// Main application state
pub struct App {
    pub store: BoardStore,
    pub mode: Mode,
    pub focus: Focus,
    pub should_quit: bool,
    pub theme: Theme,
    /// Help overlay visible
    pub show_help: bool,
    /// Focused column, by position in the column order
    pub column_cursor: usize,
    /// Focused item within the focused column
    pub item_cursor: usize,
    /// Horizontal scroll of the board, in cells
    pub column_scroll: usize,
    /// Geometry of the board: columns side by side
    pub column_window: WindowModel,
    /// Geometry shared by every column's item list
    pub item_window: WindowModel,
    /// Item-list scroll offsets, one per column slot
    pub scroll_guard: ScrollSyncGuard,
    /// Screen rect of the drop target, refreshed every frame while dragging
    pub drag_anchor: Option<Rect>,
    /// One-shot message for the status row
    pub status: Option<String>,
}

impl App {
    pub fn new(board: Board, config: &Config) -> Self {
        App {
            store: BoardStore::new(board),
            mode: Mode::Navigate,
            focus: Focus::Item,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_help: false,
            column_cursor: 0,
            item_cursor: 0,
            column_scroll: 0,
            column_window: WindowModel::new(config.window.column_width, config.window.overscan),
            item_window: WindowModel::new(config.window.item_height, config.window.overscan),
            scroll_guard: ScrollSyncGuard::new(),
            drag_anchor: None,
            status: None,
        }
    }

    pub fn board(&self) -> &Arc<Board> {
        self.store.board()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.store.session()
    }

    pub fn focused_column(&self) -> Option<&Arc<Column>> {
        self.board().at(self.column_cursor)
    }

    /// Keep both cursors inside the current board. An empty column can only
    /// be focused on its header.
    pub fn clamp_cursor(&mut self) {
        let columns = self.board().len();
        self.column_cursor = self.column_cursor.min(columns.saturating_sub(1));
        let items = self.board().item_count_at(self.column_cursor);
        if items == 0 {
            self.focus = Focus::Header;
            self.item_cursor = 0;
        } else {
            self.item_cursor = self.item_cursor.min(items - 1);
        }
    }

    /// Send one gesture event through the store and settle the UI on the
    /// result: the cursor follows a committed subject and returns to the
    /// origin otherwise.
    pub fn dispatch(&mut self, event: DragEvent) {
        let outcome = match self.store.dispatch(event) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        match outcome {
            Outcome::Ignored => {}
            Outcome::Dragging => self.mode = Mode::Drag,
            Outcome::Committed(session) => {
                self.mode = Mode::Navigate;
                self.status = Some(match CommitKind::of(&session) {
                    CommitKind::ColumnReorder => "column moved".to_string(),
                    CommitKind::ItemReorder => "item reordered".to_string(),
                    CommitKind::ItemMove => "item moved".to_string(),
                });
                self.follow_destination(&session);
            }
            Outcome::Unchanged(session) => {
                self.mode = Mode::Navigate;
                self.return_to_source(&session);
            }
            Outcome::Cancelled(session) => {
                self.mode = Mode::Navigate;
                self.status = Some("drag cancelled".to_string());
                self.return_to_source(&session);
            }
            Outcome::Aborted { session, error } => {
                self.mode = Mode::Navigate;
                self.status = Some(format!("move failed: {}", error));
                self.return_to_source(&session);
            }
        }
        if self.mode == Mode::Navigate {
            self.drag_anchor = None;
            self.clamp_cursor();
        }
    }

    fn follow_destination(&mut self, session: &DragSession) {
        let index = session.destination_index.unwrap_or(session.source_index);
        self.place_cursor(session.subject_type, session.destination_container_id.as_deref(), index);
    }

    fn return_to_source(&mut self, session: &DragSession) {
        self.place_cursor(
            session.subject_type,
            session.source_container_id.as_deref(),
            session.source_index,
        );
    }

    /// Point the cursor at `index` of `container` for a subject of `subject_type`.
    pub fn place_cursor(&mut self, subject_type: SubjectType, container: Option<&str>, index: usize) {
        match subject_type {
            SubjectType::Column => {
                self.focus = Focus::Header;
                self.column_cursor = index;
            }
            SubjectType::Item => {
                if let Some(position) = container.and_then(|id| self.board().position(id)) {
                    self.column_cursor = position;
                }
                self.focus = Focus::Item;
                self.item_cursor = index;
            }
        }
    }
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let board = seed_io::seed_board(&config.seed)?;
    seed_io::validate(&board)?;
    let mut app = App::new(board, config);
    app.clamp_cursor();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::FocusLost => input::handle_focus_lost(app),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::seed;

    fn app() -> App {
        let mut app = App::new(seed::generate(3, 2), &Config::default());
        app.clamp_cursor();
        app
    }

    #[test]
    fn committed_item_move_moves_the_cursor_along() {
        let mut app = app();
        app.dispatch(DragEvent::Start {
            subject_type: SubjectType::Item,
            container_id: Some("column-0".into()),
            index: 1,
        });
        assert_eq!(app.mode, Mode::Drag);
        app.dispatch(DragEvent::End {
            container_id: Some("column-2".into()),
            index: Some(0),
        });
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.column_cursor, 2);
        assert_eq!(app.item_cursor, 0);
        assert_eq!(app.status.as_deref(), Some("item moved"));
        assert_eq!(app.board().get("column-2").unwrap().items[0].id, "id:1");
    }

    #[test]
    fn cancel_returns_cursor_to_origin() {
        let mut app = app();
        app.dispatch(DragEvent::Start {
            subject_type: SubjectType::Column,
            container_id: None,
            index: 1,
        });
        app.column_cursor = 2;
        app.dispatch(DragEvent::Cancel);
        assert_eq!(app.column_cursor, 1);
        assert_eq!(app.focus, Focus::Header);
        assert_eq!(app.board().order(), &["column-0", "column-1", "column-2"]);
    }

    #[test]
    fn second_start_reports_instead_of_panicking() {
        let mut app = app();
        let start = DragEvent::Start {
            subject_type: SubjectType::Column,
            container_id: None,
            index: 0,
        };
        app.dispatch(start.clone());
        app.dispatch(start);
        assert_eq!(app.status.as_deref(), Some("a column drag is already in progress"));
        assert_eq!(app.mode, Mode::Drag);
    }

    #[test]
    fn clamp_cursor_on_empty_column_focuses_header() {
        let mut app = App::new(seed::generate(2, 0), &Config::default());
        app.focus = Focus::Item;
        app.column_cursor = 5;
        app.clamp_cursor();
        assert_eq!(app.column_cursor, 1);
        assert_eq!(app.focus, Focus::Header);
    }
}
