use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::tui::popup::{Field, TaskEditor};
use crate::tui::text_field::TextField;

const POPUP_W: u16 = 64;
const POPUP_H: u16 = 14;

/// Render the create/edit task form
pub fn render_task_editor(frame: &mut Frame, app: &App, form: &TaskEditor, area: Rect) {
    let popup = super::helpers::centered_rect_fixed(POPUP_W, POPUP_H, area);
    frame.render_widget(Clear, popup);

    let heading = if form.editing.is_some() {
        " Edit task "
    } else {
        " New task "
    };
    let outer = Block::bordered()
        .title(Span::styled(
            heading,
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.text));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title input
            Constraint::Min(3),    // description input
            Constraint::Length(1), // key hints
        ])
        .split(inner);

    render_input(frame, app, "Title", &form.title, form.field == Field::Title, rows[0]);
    render_input(
        frame,
        app,
        "Description",
        &form.description,
        form.field == Field::Description,
        rows[1],
    );

    let hints = Paragraph::new(Line::from(Span::styled(
        "Tab switch  Enter save  Ctrl+E editor  Esc cancel",
        Style::default().fg(app.theme.dim),
    )));
    frame.render_widget(hints, rows[2]);
}

/// A bordered text field. The active one gets the primary color and a cursor.
pub(super) fn render_input(
    frame: &mut Frame,
    app: &App,
    label: &str,
    field: &TextField,
    active: bool,
    area: Rect,
) {
    let border = if active {
        Style::default().fg(app.theme.primary)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let text = if active {
        field.render_with_cursor()
    } else {
        field.text().to_string()
    };
    let lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(app.theme.text))))
        .collect();
    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", label), border))
        .border_style(border);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
