pub mod board_view;
pub mod confirm_popup;
pub mod helpers;
pub mod search_popup;
pub mod status_row;
pub mod task_editor;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use regex::Regex;

use crate::ops::search::find_matches;

use super::app::App;
use super::popup::Popup;

/// Main render function: board, status row, then the open popup on top
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: column headers + cards | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    board_view::render_board(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);

    match app.popups.active() {
        Some(Popup::TaskEditor(form)) => task_editor::render_task_editor(frame, app, form, area),
        Some(Popup::Confirm(dialog)) => confirm_popup::render_confirm(frame, app, dialog, area),
        Some(Popup::Search(search)) => search_popup::render_search(frame, app, search, area),
        None => {}
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for hit in find_matches(re, text) {
        if hit.start > last_end {
            spans.push(Span::styled(
                text[last_end..hit.start].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(text[hit.clone()].to_string(), highlight_style));
        last_end = hit.end;
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
