use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::drag::{DragSession, SubjectType};
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match (app.mode, app.session()) {
        (Mode::Drag, Some(session)) => (
            vec![
                Span::styled(
                    " DRAG ",
                    Style::default()
                        .fg(bg)
                        .bg(app.theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", describe_drag(app, session)),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ],
            "\u{2190}\u{2193}\u{2191}\u{2192} move  Enter drop  Esc cancel ",
        ),
        _ => {
            let left = match &app.status {
                Some(message) => Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                None => Span::styled(
                    format!(
                        " {} columns  {} items",
                        app.board().len(),
                        app.board().total_items()
                    ),
                    Style::default().fg(app.theme.dim).bg(bg),
                ),
            };
            (vec![left], "m lift  ? help  q quit ")
        }
    };

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// "id:3 from column-0 → column-2 @ 1"
fn describe_drag(app: &App, session: &DragSession) -> String {
    let board = app.board();
    let subject = match session.subject_type {
        SubjectType::Column => board
            .at(session.source_index)
            .map_or_else(|| "column".to_string(), |c| c.id.clone()),
        SubjectType::Item => session
            .source_container_id
            .as_deref()
            .and_then(|id| board.get(id))
            .and_then(|c| c.items.get(session.source_index))
            .map_or_else(|| "item".to_string(), |i| i.id.clone()),
    };
    let target = match (session.subject_type, &session.destination_index) {
        (_, None) => "no target".to_string(),
        (SubjectType::Column, Some(index)) => format!("slot {}", index),
        (SubjectType::Item, Some(index)) => format!(
            "{} @ {}",
            session.destination_container_id.as_deref().unwrap_or("?"),
            index
        ),
    };
    match &session.source_container_id {
        Some(source) => format!("{} from {} \u{2192} {}", subject, source, target),
        None => format!("{} \u{2192} {}", subject, target),
    }
}
