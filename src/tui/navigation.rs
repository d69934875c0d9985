use crate::model::board::{Board, Direction};
use crate::model::task::{Task, TaskId};
use crate::ops::board_ops::{Workspace, WorkspaceError};
use crate::ops::search::task_matches;

/// Focus motions understood by the board view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Toward older tasks in the column
    Up,
    /// Toward newer tasks in the column
    Down,
    Left,
    Right,
    /// Hide one more of the newest tasks of the focused column
    ScrollForward,
    /// Reveal one of the hidden newest tasks again
    ScrollBack,
    /// Oldest visible task
    JumpTop,
    /// Newest task, scroll reset
    JumpBottom,
}

/// Focus, scroll and filter state for one board.
///
/// A column's view `V` is its tasks newest first, minus the first
/// `scroll_offset` entries when it is the focused column, minus the tasks the
/// filter rejects. `V[0]` is the newest visible task. Focus is tracked by id,
/// so it survives edits and moves.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    focused: Option<TaskId>,
    scroll_offset: usize,
    filter: Option<String>,
    should_clear: bool,
}

/// Where the focus sits: column index, index in that column's view, the view
struct Located {
    column: usize,
    index: usize,
    view: Vec<TaskId>,
}

impl NavigationController {
    pub fn new() -> Self {
        NavigationController::default()
    }

    pub fn focused_id(&self) -> Option<TaskId> {
        self.focused
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Whether the last transition changed the scroll offset or the focused column
    pub fn should_clear(&self) -> bool {
        self.should_clear
    }

    /// Called by the event loop once the terminal has been cleared
    pub fn mark_cleared(&mut self) {
        self.should_clear = false;
    }

    /// Apply a filter phrase (lower-cased). An empty phrase clears the filter.
    pub fn set_filter(&mut self, phrase: &str) {
        let phrase = phrase.trim().to_lowercase();
        self.filter = (!phrase.is_empty()).then_some(phrase);
        tracing::debug!(filter = ?self.filter, "filter changed");
        self.reset();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    /// Forget focus and scroll, e.g. after the board was swapped
    pub fn reset(&mut self) {
        self.focused = None;
        self.scroll_offset = 0;
        self.should_clear = true;
    }

    /// Focus a specific task, typically one just created
    pub fn focus(&mut self, board: &Board, id: TaskId) {
        self.focused = Some(id);
        self.scroll_offset = 0;
        self.should_clear = true;
        self.ensure_focus(board);
    }

    /// Tasks of `column` as the user sees them, newest first
    pub fn visible_tasks<'b>(&self, board: &'b Board, column: &str) -> Vec<&'b Task> {
        let index = board.columns.iter().position(|c| c == column);
        let scroll = if index.is_some() && index == self.focused_column(board) {
            self.scroll_offset
        } else {
            0
        };
        board
            .tasks_in(column)
            .iter()
            .rev()
            .skip(scroll)
            .filter(|t| self.passes(t))
            .collect()
    }

    pub fn current_focus<'b>(&self, board: &'b Board) -> Option<&'b Task> {
        self.focused.and_then(|id| board.task(id))
    }

    pub fn focused_column(&self, board: &Board) -> Option<usize> {
        self.focused
            .and_then(|id| board.column_of(id))
            .map(|(_, i)| i)
    }

    /// Number of newest tasks hidden in `column` by scrolling
    pub fn hidden_in(&self, board: &Board, column: usize) -> usize {
        if self.focused_column(board) == Some(column) {
            self.scroll_offset
        } else {
            0
        }
    }

    /// Keep the focus if it still points at a visible task, otherwise pick
    /// the newest task of the leftmost column with anything visible.
    /// Returns whether a task is focused afterwards.
    pub fn ensure_focus(&mut self, board: &Board) -> bool {
        if self.locate(board).is_some() {
            return true;
        }
        self.scroll_offset = 0;
        self.focused = (0..board.columns.len())
            .find_map(|column| self.view(board, column, 0).first().copied());
        self.focused.is_some()
    }

    /// Apply a motion. Returns whether the screen must be cleared before redraw.
    pub fn apply(&mut self, board: &Board, motion: Motion) -> bool {
        let before = (self.scroll_offset, self.focused_column(board));
        self.ensure_focus(board);
        if let Some(at) = self.locate(board) {
            match motion {
                Motion::Up => self.step_older(&at),
                Motion::Down => self.step_newer(board, &at),
                Motion::Left => self.step_column(board, &at, Direction::Left),
                Motion::Right => self.step_column(board, &at, Direction::Right),
                Motion::ScrollForward => self.scroll_forward(board, &at),
                Motion::ScrollBack => self.scroll_back(board, &at),
                Motion::JumpTop => {
                    self.scroll_offset = 0;
                    self.focused = self.view(board, at.column, 0).last().copied();
                }
                Motion::JumpBottom => {
                    self.scroll_offset = 0;
                    self.focused = self.view(board, at.column, 0).first().copied();
                }
            }
        }
        self.should_clear = (self.scroll_offset, self.focused_column(board)) != before;
        self.should_clear
    }

    /// Move the focused task one column over through the workspace.
    /// Focus stays on the task; scroll resets. `Ok(false)` at the board edge.
    pub fn move_focused(
        &mut self,
        workspace: &mut Workspace,
        direction: Direction,
    ) -> Result<bool, WorkspaceError> {
        if !self.ensure_focus(workspace.board()) {
            return Ok(false);
        }
        let Some(id) = self.focused else {
            return Ok(false);
        };
        match workspace.move_task(id, direction) {
            Ok(true) => {
                self.scroll_offset = 0;
                self.should_clear = true;
                Ok(true)
            }
            Ok(false) => {
                self.should_clear = false;
                Ok(false)
            }
            Err(e) => {
                tracing::warn!(task = %id, error = %e, "move failed");
                Err(e)
            }
        }
    }

    fn step_older(&mut self, at: &Located) {
        if let Some(&id) = at.view.get(at.index + 1) {
            self.focused = Some(id);
        }
    }

    fn step_newer(&mut self, board: &Board, at: &Located) {
        if at.index > 0 {
            self.focused = Some(at.view[at.index - 1]);
        } else if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
            if let Some(&id) = self.view(board, at.column, self.scroll_offset).first() {
                self.focused = Some(id);
            }
        }
    }

    fn step_column(&mut self, board: &Board, at: &Located, direction: Direction) {
        let mut column = at.column;
        while let Some(next) = direction.step(column, board.columns.len()) {
            if let Some(&id) = self.view(board, next, 0).first() {
                self.focused = Some(id);
                self.scroll_offset = 0;
                return;
            }
            column = next;
        }
    }

    fn scroll_forward(&mut self, board: &Board, at: &Located) {
        let total = board.tasks_in(&board.columns[at.column]).len();
        let next = self.scroll_offset + 1;
        if next >= total {
            return;
        }
        let view = self.view(board, at.column, next);
        // Scrolling never empties the focused column
        if view.is_empty() {
            return;
        }
        self.scroll_offset = next;
        self.snap_into(&view);
    }

    fn scroll_back(&mut self, board: &Board, at: &Located) {
        if self.scroll_offset == 0 {
            return;
        }
        self.scroll_offset -= 1;
        let view = self.view(board, at.column, self.scroll_offset);
        self.snap_into(&view);
    }

    fn snap_into(&mut self, view: &[TaskId]) {
        if !self.focused.is_some_and(|id| view.contains(&id)) {
            self.focused = view.first().copied();
        }
    }

    fn locate(&self, board: &Board) -> Option<Located> {
        let id = self.focused?;
        let (_, column) = board.column_of(id)?;
        let view = self.view(board, column, self.scroll_offset);
        let index = view.iter().position(|v| *v == id)?;
        Some(Located {
            column,
            index,
            view,
        })
    }

    fn view(&self, board: &Board, column: usize, scroll: usize) -> Vec<TaskId> {
        board
            .tasks_in(&board.columns[column])
            .iter()
            .rev()
            .skip(scroll)
            .filter(|t| self.passes(t))
            .map(|t| t.id)
            .collect()
    }

    fn passes(&self, task: &Task) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|query| task_matches(task, query))
    }
}
