use std::path::Path;

use crate::io::config_io::{ConfigStore, StoreError};
use crate::model::board::{Board, BoardError, Direction};
use crate::model::config::UserConfig;
use crate::model::task::{Task, TaskId};

/// Error type for workspace operations
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The change was applied in memory but could not be written
    #[error("could not save: {0}")]
    Persist(StoreError),
    #[error(transparent)]
    Load(#[from] StoreError),
}

/// The loaded config, the board being worked on, and where to save them.
///
/// Every mutation is one unit: snapshot the board, apply the change, save.
/// If the save fails the board is restored and `WorkspaceError::Persist`
/// returned, so memory never drifts from what is on disk.
pub struct Workspace {
    config: UserConfig,
    board_index: usize,
    store: Box<dyn ConfigStore>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("board", &self.board().name)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Load the config and select a board by name
    pub fn open(store: Box<dyn ConfigStore>, board_name: &str) -> Result<Self, WorkspaceError> {
        let config = store.load()?;
        Workspace::with_config(config, store, board_name)
    }

    pub fn with_config(
        config: UserConfig,
        store: Box<dyn ConfigStore>,
        board_name: &str,
    ) -> Result<Self, WorkspaceError> {
        let board_index = config
            .boards
            .iter()
            .position(|b| b.name == board_name)
            .ok_or_else(|| BoardError::BoardNotFound(board_name.to_string()))?;
        Ok(Workspace {
            config,
            board_index,
            store,
        })
    }

    pub fn board(&self) -> &Board {
        &self.config.boards[self.board_index]
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Create a task in the entry column
    pub fn add_task(&mut self, title: String, description: String) -> Result<TaskId, WorkspaceError> {
        let task = Task::new(title, description);
        let id = task.id;
        self.commit(|board| board.add_task(task))?;
        tracing::info!(task = %id, board = %self.board().name, "task added");
        Ok(id)
    }

    pub fn update_task(
        &mut self,
        id: TaskId,
        title: String,
        description: String,
    ) -> Result<(), WorkspaceError> {
        self.commit(|board| board.update_task(id, title, description))?;
        tracing::info!(task = %id, "task updated");
        Ok(())
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, WorkspaceError> {
        let task = self.commit(|board| board.delete_task(id))?;
        tracing::info!(task = %id, title = %task.title, "task deleted");
        Ok(task)
    }

    /// Move a task one column over. `Ok(false)` at the board edge, nothing saved.
    pub fn move_task(&mut self, id: TaskId, direction: Direction) -> Result<bool, WorkspaceError> {
        let (_, index) = self
            .board()
            .column_of(id)
            .ok_or(BoardError::TaskNotFound(id))?;
        if direction.step(index, self.board().columns.len()).is_none() {
            return Ok(false);
        }
        self.commit(|board| board.move_task(id, direction))
    }

    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> Result<T, WorkspaceError> {
        let snapshot = self.board().clone();
        let out = mutate(&mut self.config.boards[self.board_index])?;
        if let Err(e) = self.store.save(&self.config) {
            tracing::error!(board = %snapshot.name, error = %e, "save failed, rolling back");
            self.config.boards[self.board_index] = snapshot;
            return Err(WorkspaceError::Persist(e));
        }
        Ok(out)
    }
}

/// Name of the board for `dir`: the nearest ancestor (or `dir` itself) whose
/// directory name is a board name.
pub fn resolve_board_for_dir(config: &UserConfig, dir: &Path) -> Option<String> {
    dir.ancestors()
        .filter_map(|p| p.file_name())
        .filter_map(|name| name.to_str())
        .find(|name| config.board(name).is_some())
        .map(str::to_string)
}

/// Open the board for `dir`, creating one named after `dir` if none matches.
pub fn open_for_dir(store: Box<dyn ConfigStore>, dir: &Path) -> Result<Workspace, WorkspaceError> {
    let mut config = store.load()?;
    let name = match resolve_board_for_dir(&config, dir) {
        Some(name) => name,
        None => {
            let name = dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("board")
                .to_string();
            config.create_board(&name, &dir.display().to_string());
            store.save(&config).map_err(WorkspaceError::Persist)?;
            tracing::info!(board = %name, dir = %dir.display(), "created board");
            name
        }
    };
    Workspace::with_config(config, store, &name)
}

/// Append a column to a named board and save
pub fn add_column(store: &dyn ConfigStore, board: &str, column: &str) -> Result<(), WorkspaceError> {
    let mut config = store.load()?;
    config
        .board_mut(board)
        .ok_or_else(|| BoardError::BoardNotFound(board.to_string()))?
        .add_column(column)?;
    store.save(&config).map_err(WorkspaceError::Persist)?;
    tracing::info!(board = %board, column = %column, "column added");
    Ok(())
}

/// One row of `lanes list`
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    pub name: String,
    pub task_count: usize,
    /// Percentage of tasks in the last column
    pub progress: u8,
    pub dir: String,
}

pub fn summarize(config: &UserConfig) -> Vec<BoardSummary> {
    config
        .boards
        .iter()
        .map(|b| BoardSummary {
            name: b.name.clone(),
            task_count: b.task_count(),
            progress: (b.progress() * 100.0).floor() as u8,
            dir: b.dir.clone(),
        })
        .collect()
}
