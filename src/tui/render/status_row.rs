use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::{display_width, truncate_to_width};

const HINTS: &str = "n new  e edit  d delete  H/L move  / search  q quit";

/// Render the status row (bottom of screen): message or filter on the left,
/// key hints on the right when they fit
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim);

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let style = if status.is_error {
            Style::default().fg(app.theme.error)
        } else {
            Style::default().fg(app.theme.text)
        };
        spans.push(Span::styled(truncate_to_width(&status.text, width), style));
    } else if let Some(filter) = app.nav.filter() {
        spans.push(Span::styled(
            truncate_to_width(&format!("/{}", filter), width),
            Style::default().fg(app.theme.primary),
        ));
    }

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(HINTS);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(HINTS, dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
