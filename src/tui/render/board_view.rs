use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use regex::Regex;

use crate::model::task::{Task, TaskId};
use crate::ops::search::highlight_regex;
use crate::tui::app::App;

use super::helpers::{center, wrapped_height};
use super::push_highlighted_spans;

const HEADER_HEIGHT: u16 = 3;
/// Left/right border plus one cell of padding on each side
const CARD_CHROME_W: u16 = 4;

/// Render column headers and the task cards below them
pub fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let board = app.workspace.board();
    let text_style = Style::default().fg(app.theme.text);
    let dim_style = Style::default().fg(app.theme.dim);

    if board.columns.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!("Board \"{}\" has no columns", board.name),
            dim_style,
        )));
        frame.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);
    let n = board.columns.len() as u32;
    let constraints = vec![Constraint::Ratio(1, n); board.columns.len()];
    let headers = Layout::horizontal(constraints.clone()).split(rows[0]);
    let bodies = Layout::horizontal(constraints).split(rows[1]);

    let focused_column = app.nav.focused_column(board);
    let search_re = app.nav.filter().and_then(highlight_regex);

    for (i, column) in board.columns.iter().enumerate() {
        let visible = app.nav.visible_tasks(board, column);
        let hidden = app.nav.hidden_in(board, i);

        let mut label = format!("{} ({})", column, visible.len());
        if hidden > 0 {
            label.push_str(&format!(" +{} newer", hidden));
        }
        let header_style = if focused_column == Some(i) {
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        let inner_w = headers[i].width.saturating_sub(2) as usize;
        let header = Paragraph::new(Line::from(Span::styled(
            center(&label, inner_w),
            header_style,
        )))
        .block(Block::bordered().border_style(text_style));
        frame.render_widget(header, headers[i]);

        render_column(frame, app, &visible, search_re.as_ref(), bodies[i]);
    }

    // Nothing to focus: say why
    if app.nav.current_focus(board).is_none() {
        let msg = match app.nav.filter() {
            Some(filter) => format!("No tasks match \"{}\"  (Esc clears)", filter),
            None => "No tasks yet. Press n to add one.".to_string(),
        };
        let y = rows[1].y + rows[1].height / 2;
        if y < rows[1].bottom() {
            let line = Rect::new(rows[1].x, y, rows[1].width, 1);
            let width = line.width as usize;
            frame.render_widget(
                Paragraph::new(Span::styled(center(&msg, width), dim_style)),
                line,
            );
        }
    }
}

/// Cards of one column, oldest at the top. `visible` is newest first.
fn render_column(
    frame: &mut Frame,
    app: &App,
    visible: &[&Task],
    search_re: Option<&Regex>,
    area: Rect,
) {
    if area.height == 0 || area.width <= CARD_CHROME_W {
        return;
    }
    let inner_w = (area.width - CARD_CHROME_W) as usize;
    let paint: Vec<&Task> = visible.iter().rev().copied().collect();
    let heights: Vec<usize> = paint.iter().map(|t| card_height(t, inner_w)).collect();
    let focus = app.nav.focused_id();
    let focus_pos = paint.iter().position(|t| Some(t.id) == focus);

    let (start, end) = visible_window(&heights, area.height as usize, focus_pos);
    let mut y = area.y;
    for (task, &h) in paint[start..end].iter().zip(&heights[start..end]) {
        if y >= area.bottom() {
            break;
        }
        let h = (h as u16).min(area.bottom() - y);
        let card = Rect::new(area.x, y, area.width, h);
        render_card(frame, app, task, focus, search_re, inner_w, card);
        y += h;
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    task: &Task,
    focus: Option<TaskId>,
    search_re: Option<&Regex>,
    inner_w: usize,
    area: Rect,
) {
    let focused = focus == Some(task.id);
    let text_style = Style::default().fg(app.theme.text);
    let dim_style = Style::default().fg(app.theme.dim);
    let hl_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let border_style = if focused {
        Style::default().fg(app.theme.primary)
    } else {
        text_style
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut title = Vec::new();
    push_highlighted_spans(
        &mut title,
        &task.title,
        text_style.add_modifier(Modifier::BOLD),
        hl_style,
        search_re,
    );
    lines.push(Line::from(title));
    lines.push(Line::from(Span::styled("\u{2500}".repeat(inner_w), dim_style)));
    if task.has_description() {
        for text in task.description.split('\n') {
            let mut spans = Vec::new();
            push_highlighted_spans(&mut spans, text, text_style, hl_style, search_re);
            lines.push(Line::from(spans));
        }
    } else {
        lines.push(Line::from(Span::styled(
            center("No description", inner_w),
            dim_style.add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::bordered()
        .border_style(border_style)
        .padding(Padding::horizontal(1));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Rows a card needs: borders, wrapped title, separator, wrapped description
fn card_height(task: &Task, inner_w: usize) -> usize {
    let body = if task.has_description() {
        wrapped_height(&task.description, inner_w)
    } else {
        1
    };
    2 + wrapped_height(&task.title, inner_w) + 1 + body
}

/// Which cards (by paint index) fit in `room` rows. Bottom-anchored so the
/// newest visible card is shown, unless that would push the focused card
/// off the top.
fn visible_window(heights: &[usize], room: usize, focus: Option<usize>) -> (usize, usize) {
    let n = heights.len();
    let mut start = n;
    let mut used = 0;
    while start > 0 && used + heights[start - 1] <= room {
        start -= 1;
        used += heights[start];
    }
    if let Some(f) = focus
        && f < start
    {
        let mut end = f;
        let mut used = 0;
        while end < n && used + heights[end] <= room {
            used += heights[end];
            end += 1;
        }
        return (f, end.max(f + 1));
    }
    // A lone card taller than the room is still drawn, clipped
    if start == n && n > 0 {
        start = n - 1;
    }
    (start, n)
}
