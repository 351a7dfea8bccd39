use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::ops::drag::SubjectType;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render a copy of the dragged row over the drop target.
///
/// The clone is positioned from the live drag position, not from the window
/// rows, so it sits one cell to the right of the slot it would land in.
pub fn render_clone_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(session), Some(anchor)) = (app.session(), app.drag_anchor) else {
        return;
    };
    let board = app.board();

    let (title, body): (String, Vec<String>) = match session.subject_type {
        SubjectType::Column => {
            let Some(column) = board.at(session.source_index) else {
                return;
            };
            (
                format!("{} {}", column.title, column.items.len()),
                column.items.iter().map(|i| i.text.clone()).collect(),
            )
        }
        SubjectType::Item => {
            let item = session
                .source_container_id
                .as_deref()
                .and_then(|id| board.get(id))
                .and_then(|c| c.items.get(session.source_index));
            let Some(item) = item else {
                return;
            };
            (item.id.clone(), vec![item.text.clone()])
        }
    };

    let rect = Rect {
        x: anchor.x.saturating_add(1),
        ..anchor
    }
    .intersection(area);
    if rect.width < 3 || rect.height == 0 {
        return;
    }

    let bg = app.theme.clone_bg;
    let inner_width = rect.width.saturating_sub(2) as usize;
    let text_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = body
        .iter()
        .take(rect.height.saturating_sub(2) as usize)
        .map(|text| Line::from(Span::styled(truncate_to_width(text, inner_width), text_style)))
        .collect();

    let block = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(app.theme.clone_border).bg(bg))
        .title(Span::styled(
            truncate_to_width(&title, inner_width),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        rect,
    );
}
