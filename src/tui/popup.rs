use crate::model::task::{Task, TaskId};
use crate::tui::text_field::TextField;

/// What a confirmation dialog is asking about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask { task_id: TaskId },
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: ConfirmAction,
}

/// Which field of the task editor has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Description,
}

/// Create/edit form for a task
#[derive(Debug, Clone, Default)]
pub struct TaskEditor {
    /// `None` when creating a new task
    pub editing: Option<TaskId>,
    pub title: TextField,
    pub description: TextField,
    pub field: Field,
}

impl TaskEditor {
    pub fn create() -> Self {
        TaskEditor::default()
    }

    /// Preloaded from an existing task, cursors at the end
    pub fn edit(task: &Task) -> Self {
        TaskEditor {
            editing: Some(task.id),
            title: TextField::with_text(&task.title),
            description: TextField::with_text(&task.description),
            field: Field::Title,
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut TextField {
        match self.field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    /// A task needs a non-blank title
    pub fn can_save(&self) -> bool {
        !self.title.text().trim().is_empty()
    }
}

/// Search phrase input
#[derive(Debug, Clone, Default)]
pub struct SearchDialog {
    pub phrase: TextField,
}

impl SearchDialog {
    /// Starts from the active filter so it can be refined
    pub fn new(current: Option<&str>) -> Self {
        SearchDialog {
            phrase: TextField::with_text(current.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Popup {
    TaskEditor(TaskEditor),
    Confirm(ConfirmDialog),
    Search(SearchDialog),
}

impl Popup {
    fn name(&self) -> &'static str {
        match self {
            Popup::TaskEditor(_) => "task editor",
            Popup::Confirm(_) => "confirm",
            Popup::Search(_) => "search",
        }
    }
}

/// Owns the one popup that may be open. While it is, all keys go to it.
#[derive(Debug, Default)]
pub struct PopupCoordinator {
    active: Option<Popup>,
}

impl PopupCoordinator {
    pub fn new() -> Self {
        PopupCoordinator::default()
    }

    pub fn active(&self) -> Option<&Popup> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Popup> {
        self.active.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Show a popup. Refused while another one is open.
    pub fn open(&mut self, popup: Popup) -> bool {
        if let Some(current) = &self.active {
            tracing::warn!(
                open = current.name(),
                requested = popup.name(),
                "popup already open, ignoring"
            );
            return false;
        }
        tracing::debug!(popup = popup.name(), "popup opened");
        self.active = Some(popup);
        true
    }

    /// Hide the active popup and hand it back
    pub fn close(&mut self) -> Option<Popup> {
        self.active.take()
    }

    pub fn task_editor_mut(&mut self) -> Option<&mut TaskEditor> {
        match &mut self.active {
            Some(Popup::TaskEditor(editor)) => Some(editor),
            _ => None,
        }
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchDialog> {
        match &mut self.active {
            Some(Popup::Search(search)) => Some(search),
            _ => None,
        }
    }

    /// Answer the open confirmation dialog. The dialog closes, so each
    /// answer is delivered once; `None` if no dialog was open.
    pub fn answer(&mut self, yes: bool) -> Option<(ConfirmAction, bool)> {
        match self.active.take() {
            Some(Popup::Confirm(dialog)) => Some((dialog.action, yes)),
            other => {
                self.active = other;
                None
            }
        }
    }
}
