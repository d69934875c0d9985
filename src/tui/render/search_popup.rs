use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::tui::app::App;
use crate::tui::popup::SearchDialog;

use super::helpers::centered_rect_fixed;
use super::task_editor::render_input;

pub fn render_search(frame: &mut Frame, app: &App, search: &SearchDialog, area: Rect) {
    let popup = centered_rect_fixed(50, 3, area);
    frame.render_widget(Clear, popup);
    render_input(frame, app, "Search For", &search.phrase, true, popup);
}
