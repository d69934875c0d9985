use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::config_io::MemoryStore;
use crate::model::config::UserConfig;
use crate::model::task::Task;
use crate::ops::board_ops::Workspace;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for an app
pub fn render_app(app: &App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// An App on a board named "test" with the given columns. Titles are listed
/// oldest first, as stored.
pub fn app_with(columns: Vec<(&str, Vec<&str>)>) -> App {
    let mut config = UserConfig::default();
    config.create_board("test", "/tmp/test");
    if let Some(board) = config.board_mut("test") {
        board.columns = columns.iter().map(|(c, _)| c.to_string()).collect();
        for (column, titles) in columns {
            board.tasks.insert(
                column.to_string(),
                titles.into_iter().map(|t| Task::new(t, "")).collect(),
            );
        }
    }
    let ws = Workspace::open(Box::new(MemoryStore::with(config)), "test").unwrap();
    App::new(ws, Theme::default(), "true".into())
}
