use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::editor;
use crate::model::board::BoardError;
use crate::ops::board_ops::Workspace;
use crate::tui::input;
use crate::tui::navigation::NavigationController;
use crate::tui::popup::PopupCoordinator;
use crate::tui::render;
use crate::tui::theme::{Theme, ThemeKind};

/// Work that needs the real terminal, run by the event loop after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Open the task editor's description in the external editor
    EditDescription,
}

/// One-line message for the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub workspace: Workspace,
    pub nav: NavigationController,
    pub popups: PopupCoordinator,
    pub theme: Theme,
    /// External editor command
    pub editor: String,
    pub status: Option<StatusMessage>,
    pub pending: Option<PendingAction>,
    pub should_quit: bool,
    /// Set when the loop must stop with an error
    pub fatal: Option<BoardError>,
}

impl App {
    pub fn new(workspace: Workspace, theme: Theme, editor: String) -> Self {
        let mut nav = NavigationController::new();
        nav.ensure_focus(workspace.board());
        App {
            workspace,
            nav,
            popups: PopupCoordinator::new(),
            theme,
            editor,
            status: None,
            pending: None,
            should_quit: false,
            fatal: None,
        }
    }

    /// Log an error and show it in the status row
    pub fn report_error(&mut self, err: &dyn std::error::Error) {
        tracing::error!(error = %err, "command failed");
        self.status = Some(StatusMessage {
            text: err.to_string(),
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the board TUI until the user quits
pub fn run(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::from_config(ThemeKind::from_env(), workspace.config());
    let mut app = App::new(workspace, theme, editor::resolve_editor());
    tracing::info!(board = %app.workspace.board().name, "opening board");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;
    match app.fatal.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn run_event_loop(terminal: &mut Term, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.nav.should_clear() {
            terminal.clear()?;
            app.nav.mark_cleared();
        }
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::Resize(..) => terminal.autoresize()?,
                _ => {}
            }
        }

        if let Some(action) = app.pending.take() {
            run_pending(terminal, app, action)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn run_pending(
    terminal: &mut Term,
    app: &mut App,
    action: PendingAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PendingAction::EditDescription => {
            let Some(form) = app.popups.task_editor_mut() else {
                return Ok(());
            };
            let current = form.description.text().to_string();

            suspend(terminal)?;
            let edited = editor::edit_text(&app.editor, &current);
            resume(terminal)?;

            match edited {
                Ok(text) => {
                    if let Some(form) = app.popups.task_editor_mut() {
                        form.description.set_text(&text);
                    }
                }
                Err(e) => app.report_error(&e),
            }
        }
    }
    Ok(())
}

/// Hand the terminal to a child process
fn suspend(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

fn resume(terminal: &mut Term) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableBracketedPaste
    )?;
    terminal.clear()
}
