use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::edit::edit_field;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let Some(search) = app.popups.search_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.popups.close();
        }
        (_, KeyCode::Enter) => {
            let phrase = search.phrase.text().to_string();
            app.popups.close();
            app.nav.set_filter(&phrase);
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => search.phrase.move_end(),
        _ => {
            edit_field(&mut search.phrase, key);
        }
    }
}
