mod confirm;
mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;
use super::popup::Popup;

pub use navigate::{Command, parse_command};

/// Route a key to the open popup, or to the board when none is open
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.popups.active() {
        None => navigate::handle_navigate(app, key),
        Some(Popup::TaskEditor(_)) => edit::handle_task_editor(app, key),
        Some(Popup::Confirm(_)) => confirm::handle_confirm(app, key),
        Some(Popup::Search(_)) => search::handle_search(app, key),
    }

    // Deletes and filtered-out edits can leave the focus dangling
    app.nav.ensure_focus(app.workspace.board());
}

/// Bracketed paste: insert into the focused text field. Newlines in titles
/// and search phrases become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    let field = match app.popups.active_mut() {
        Some(Popup::TaskEditor(form)) => {
            let multiline = form.field == crate::tui::popup::Field::Description;
            let field = form.active_field_mut();
            if multiline {
                field.insert(&text.replace('\r', ""));
                return;
            }
            field
        }
        Some(Popup::Search(search)) => &mut search.phrase,
        _ => return,
    };
    let clean = text.replace(['\n', '\r'], " ");
    field.insert(&clean);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config_io::MemoryStore;
    use crate::model::config::UserConfig;
    use crate::model::task::Task;
    use crate::ops::board_ops::Workspace;
    use crate::tui::render::test_helpers::app_with;
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focused(app: &App) -> Option<String> {
        app.nav
            .current_focus(app.workspace.board())
            .map(|t| t.title.clone())
    }

    #[test]
    fn create_task_through_editor() {
        let mut app = app_with(vec![("Todo", vec!["A"]), ("Done", vec![])]);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "New task");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "details");
        press(&mut app, KeyCode::Enter);

        assert!(!app.popups.is_open());
        let todo = app.workspace.board().tasks_in("Todo");
        assert_eq!(todo.len(), 2);
        assert_eq!(todo[1].title, "New task");
        assert_eq!(todo[1].description, "details");
        assert_eq!(focused(&app).as_deref(), Some("New task"));
    }

    #[test]
    fn enter_with_blank_title_keeps_editor_open() {
        let mut app = app_with(vec![("Todo", vec![])]);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);
        assert!(app.popups.is_open());
        assert!(app.workspace.board().is_empty());
        press(&mut app, KeyCode::Esc);
        assert!(!app.popups.is_open());
    }

    #[test]
    fn edit_focused_task() {
        let mut app = app_with(vec![("Todo", vec!["A", "B"])]);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(focused(&app).as_deref(), Some("B2"));
        assert_eq!(app.workspace.board().task_count(), 2);
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut app = app_with(vec![("Todo", vec!["A", "B"])]);
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.popups.active(), Some(Popup::Confirm(_))));
        // Unrelated keys are ignored while confirming
        press(&mut app, KeyCode::Char('x'));
        assert!(app.popups.is_open());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.workspace.board().task_count(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.popups.is_open());
        assert_eq!(app.workspace.board().task_count(), 1);
        assert_eq!(focused(&app).as_deref(), Some("A"));
    }

    #[test]
    fn delete_of_vanished_task_is_fatal() {
        let mut app = app_with(vec![("Todo", vec!["A"])]);
        press(&mut app, KeyCode::Char('d'));
        let id = app.nav.focused_id().unwrap();
        // Remove it behind the dialog's back
        app.workspace.delete_task(id).unwrap();
        press(&mut app, KeyCode::Char('Y'));
        assert!(app.should_quit);
        assert!(app.fatal.is_some());
    }

    #[test]
    fn search_applies_and_esc_clears_filter() {
        let mut app = app_with(vec![("Todo", vec!["Buy groceries", "Fix bike"])]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "GROC");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.nav.filter(), Some("groc"));
        assert_eq!(focused(&app).as_deref(), Some("Buy groceries"));

        press(&mut app, KeyCode::Esc);
        assert!(app.nav.filter().is_none());
        assert_eq!(focused(&app).as_deref(), Some("Fix bike"));
    }

    #[test]
    fn search_esc_keeps_filter() {
        let mut app = app_with(vec![("Todo", vec!["a"])]);
        app.nav.set_filter("a");
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(
            app.popups.search_mut().map(|s| s.phrase.text().to_string()),
            Some("a".to_string())
        );
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.nav.filter(), Some("a"));
    }

    #[test]
    fn move_task_with_shift_keys() {
        let mut app = app_with(vec![("Todo", vec!["A"]), ("Done", vec![])]);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.workspace.board().tasks_in("Done").len(), 1);
        assert_eq!(focused(&app).as_deref(), Some("A"));
        handle_key(&mut app, KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        assert_eq!(app.workspace.board().tasks_in("Todo").len(), 1);
    }

    #[test]
    fn failed_save_shows_error() {
        let mut config = UserConfig::default();
        config.create_board("test", "/tmp/test");
        config
            .board_mut("test")
            .unwrap()
            .add_task(Task::new("A", ""))
            .unwrap();
        let store = MemoryStore::with(config);
        store.fail_saves.set(true);
        let ws = Workspace::open(Box::new(store), "test").unwrap();
        let mut app = App::new(ws, Theme::default(), "true".into());

        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.workspace.board().tasks_in("Todo").len(), 1);
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn ctrl_e_in_editor_requests_external_editor() {
        let mut app = app_with(vec![("Todo", vec!["A"])]);
        press(&mut app, KeyCode::Char('e'));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(app.pending, Some(crate::tui::app::PendingAction::EditDescription));
    }

    #[test]
    fn paste_into_title_flattens_newlines() {
        let mut app = app_with(vec![("Todo", vec![])]);
        press(&mut app, KeyCode::Char('n'));
        handle_paste(&mut app, "one\ntwo");
        let form = app.popups.task_editor_mut().unwrap();
        assert_eq!(form.title.text(), "one two");
    }

    #[test]
    fn quit_keys() {
        let mut app = app_with(vec![("Todo", vec![])]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
        let mut app = app_with(vec![("Todo", vec![])]);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
