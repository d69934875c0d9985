use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, PendingAction};
use crate::tui::text_field::TextField;

/// Apply a line-editing key to a text field. Returns false for keys it
/// doesn't handle.
pub(super) fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    let word_mod = KeyModifiers::ALT | KeyModifiers::CONTROL;
    match (key.modifiers, key.code) {
        // AltGr arrives as Ctrl+Alt on Windows
        (m, KeyCode::Char(c)) if m.contains(word_mod) => field.insert_char(c),

        // Word deletion
        (m, KeyCode::Backspace) if m.intersects(word_mod) => field.delete_word_back(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => field.delete_word_back(),
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete_forward(),

        // Word motion
        (m, KeyCode::Left) if m.intersects(word_mod) => field.move_word_left(),
        (m, KeyCode::Right) if m.intersects(word_mod) => field.move_word_right(),
        (m, KeyCode::Char('b')) if m.contains(KeyModifiers::ALT) => field.move_word_left(),
        (m, KeyCode::Char('f')) if m.contains(KeyModifiers::ALT) => field.move_word_right(),

        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => field.move_home(),
        (_, KeyCode::Home) => field.move_home(),
        (_, KeyCode::End) => field.move_end(),
        (_, KeyCode::Left) => field.move_left(),
        (_, KeyCode::Right) => field.move_right(),

        (m, KeyCode::Char(c)) if !m.intersects(word_mod) => field.insert_char(c),
        _ => return false,
    }
    true
}

pub(super) fn handle_task_editor(app: &mut App, key: KeyEvent) {
    let Some(form) = app.popups.task_editor_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.popups.close();
        }
        (_, KeyCode::Tab | KeyCode::BackTab) => form.toggle_field(),
        (_, KeyCode::Enter) => save_task(app),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.pending = Some(PendingAction::EditDescription);
        }
        _ => {
            edit_field(form.active_field_mut(), key);
        }
    }
}

fn save_task(app: &mut App) {
    let Some(form) = app.popups.task_editor_mut() else {
        return;
    };
    if !form.can_save() {
        return;
    }
    let title = form.title.text().trim().to_string();
    let description = form.description.text().trim().to_string();
    let editing = form.editing;

    let result = match editing {
        Some(id) => app
            .workspace
            .update_task(id, title, description)
            .map(|_| id),
        None => app.workspace.add_task(title, description),
    };
    match result {
        Ok(id) => {
            app.popups.close();
            if editing.is_none() {
                app.nav.focus(app.workspace.board(), id);
            }
        }
        // Keep the form open so the text isn't lost
        Err(e) => app.report_error(&e),
    }
}
