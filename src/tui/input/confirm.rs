use crossterm::event::{KeyCode, KeyEvent};

use crate::model::board::BoardError;
use crate::model::task::TaskId;
use crate::ops::board_ops::WorkspaceError;
use crate::tui::app::App;
use crate::tui::popup::ConfirmAction;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let yes = match key.code {
        KeyCode::Char('y' | 'Y') => true,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
        _ => return,
    };
    let Some((action, true)) = app.popups.answer(yes) else {
        return;
    };
    match action {
        ConfirmAction::DeleteTask { task_id } => confirm_delete_task(app, task_id),
    }
}

fn confirm_delete_task(app: &mut App, task_id: TaskId) {
    match app.workspace.delete_task(task_id) {
        Ok(task) => app.set_info(format!("Deleted \"{}\"", task.title)),
        // The focused task has no column: the board and the view disagree
        Err(WorkspaceError::Board(BoardError::TaskNotFound(id))) => {
            tracing::error!(task = %id, "focused task not found on delete");
            app.fatal = Some(BoardError::TaskNotFound(id));
            app.should_quit = true;
        }
        Err(e) => app.report_error(&e),
    }
}
