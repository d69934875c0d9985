use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::board::Direction;
use crate::tui::app::App;
use crate::tui::navigation::Motion;
use crate::tui::popup::{ConfirmAction, ConfirmDialog, Popup, SearchDialog, TaskEditor};

/// Everything a key can ask for on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Motion(Motion),
    MoveTask(Direction),
    NewTask,
    EditTask,
    DeleteTask,
    Search,
    ClearFilter,
    Quit,
}

/// Board key map. `None` for unbound keys.
pub fn parse_command(key: KeyEvent) -> Option<Command> {
    let command = match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => Command::Quit,
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            Command::Motion(Motion::ScrollForward)
        }
        (m, KeyCode::Char('d')) if m.contains(KeyModifiers::CONTROL) => {
            Command::Motion(Motion::ScrollBack)
        }
        (m, KeyCode::Left) if m.contains(KeyModifiers::SHIFT) => Command::MoveTask(Direction::Left),
        (m, KeyCode::Right) if m.contains(KeyModifiers::SHIFT) => {
            Command::MoveTask(Direction::Right)
        }
        (m, _) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => return None,

        (_, KeyCode::Char('q')) => Command::Quit,
        (_, KeyCode::Char('k') | KeyCode::Up) => Command::Motion(Motion::Up),
        (_, KeyCode::Char('j') | KeyCode::Down) => Command::Motion(Motion::Down),
        (_, KeyCode::Char('h') | KeyCode::Left) => Command::Motion(Motion::Left),
        (_, KeyCode::Char('l') | KeyCode::Right) => Command::Motion(Motion::Right),
        (_, KeyCode::PageUp) => Command::Motion(Motion::ScrollForward),
        (_, KeyCode::PageDown) => Command::Motion(Motion::ScrollBack),
        (_, KeyCode::Char('g') | KeyCode::Home) => Command::Motion(Motion::JumpTop),
        (_, KeyCode::Char('G') | KeyCode::End) => Command::Motion(Motion::JumpBottom),
        (_, KeyCode::Char('H')) => Command::MoveTask(Direction::Left),
        (_, KeyCode::Char('L')) => Command::MoveTask(Direction::Right),
        (_, KeyCode::Char('n')) => Command::NewTask,
        (_, KeyCode::Char('e') | KeyCode::Enter) => Command::EditTask,
        (_, KeyCode::Char('d') | KeyCode::Delete) => Command::DeleteTask,
        (_, KeyCode::Char('/')) => Command::Search,
        (_, KeyCode::Esc) => Command::ClearFilter,
        _ => return None,
    };
    Some(command)
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let Some(command) = parse_command(key) else {
        return;
    };
    app.status = None;

    match command {
        Command::Motion(motion) => {
            app.nav.apply(app.workspace.board(), motion);
        }
        Command::MoveTask(direction) => {
            if let Err(e) = app.nav.move_focused(&mut app.workspace, direction) {
                app.report_error(&e);
            }
        }
        Command::NewTask => {
            app.popups.open(Popup::TaskEditor(TaskEditor::create()));
        }
        Command::EditTask => {
            if let Some(task) = app.nav.current_focus(app.workspace.board()) {
                app.popups.open(Popup::TaskEditor(TaskEditor::edit(task)));
            }
        }
        Command::DeleteTask => {
            if let Some(task) = app.nav.current_focus(app.workspace.board()) {
                app.popups.open(Popup::Confirm(ConfirmDialog {
                    message: format!("Delete \"{}\"?", task.title),
                    action: ConfirmAction::DeleteTask { task_id: task.id },
                }));
            }
        }
        Command::Search => {
            app.popups
                .open(Popup::Search(SearchDialog::new(app.nav.filter())));
        }
        Command::ClearFilter => {
            if app.nav.filter().is_some() {
                app.nav.clear_filter();
            }
        }
        Command::Quit => app.should_quit = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_and_arrow_keys_map_to_motions() {
        assert_eq!(
            parse_command(key(KeyCode::Char('k'))),
            Some(Command::Motion(Motion::Up))
        );
        assert_eq!(
            parse_command(key(KeyCode::Down)),
            Some(Command::Motion(Motion::Down))
        );
        assert_eq!(
            parse_command(key(KeyCode::Char('G'))),
            Some(Command::Motion(Motion::JumpBottom))
        );
        assert_eq!(
            parse_command(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Command::Motion(Motion::ScrollForward))
        );
    }

    #[test]
    fn shifted_keys_move_tasks() {
        assert_eq!(
            parse_command(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(Command::MoveTask(Direction::Left))
        );
        assert_eq!(
            parse_command(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(Command::MoveTask(Direction::Right))
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(parse_command(key(KeyCode::Char('z'))), None);
        assert_eq!(
            parse_command(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::ALT)),
            None
        );
    }
}
