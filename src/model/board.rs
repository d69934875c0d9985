use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::config::null_as_default;
use super::task::{Task, TaskId};

/// Columns a freshly created board starts with
pub const DEFAULT_COLUMNS: [&str; 3] = ["Todo", "In Progress", "Done"];

/// Error type for board lookups and mutations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("board \"{0}\" not found")]
    BoardNotFound(String),
    #[error("board \"{0}\" has no columns")]
    NoColumns(String),
    #[error("board \"{board}\" already has a column named \"{column}\"")]
    DuplicateColumn { board: String, column: String },
}

/// Horizontal direction across columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Index of the neighbouring column, if it exists
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Left => index.checked_sub(1),
            Direction::Right => (index + 1 < len).then_some(index + 1),
        }
    }
}

/// A named kanban board: ordered columns of ordered tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    /// Directory the board was created from (informational)
    #[serde(default)]
    pub dir: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<String>,
    /// Per-column tasks in insertion order, oldest first
    #[serde(default, deserialize_with = "tasks_or_empty")]
    pub tasks: IndexMap<String, Vec<Task>>,
}

/// Files written by older versions may hold `null` for the map or for a column
fn tasks_or_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<Task>>, D::Error>
where
    D: Deserializer<'de>,
{
    let tasks: Option<IndexMap<String, Option<Vec<Task>>>> = Option::deserialize(deserializer)?;
    Ok(tasks
        .unwrap_or_default()
        .into_iter()
        .map(|(column, list)| (column, list.unwrap_or_default()))
        .collect())
}

impl Board {
    /// A new board with the default columns and no tasks
    pub fn new(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Board {
            name: name.into(),
            dir: dir.into(),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            tasks: IndexMap::new(),
        }
    }

    /// Tasks of a column, oldest first. Unknown or missing columns are empty.
    pub fn tasks_in(&self, column: &str) -> &[Task] {
        self.tasks.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Name and index of the column holding the task
    pub fn column_of(&self, id: TaskId) -> Option<(&str, usize)> {
        self.columns.iter().enumerate().find_map(|(i, column)| {
            self.tasks_in(column)
                .iter()
                .any(|t| t.id == id)
                .then_some((column.as_str(), i))
        })
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|column| self.tasks_in(column))
            .find(|t| t.id == id)
    }

    /// True when no column holds a task
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| self.tasks_in(c).is_empty())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| self.tasks_in(c).len()).sum()
    }

    /// Share of tasks sitting in the rightmost column, in 0.0..=1.0
    pub fn progress(&self) -> f32 {
        let total = self.task_count();
        if total == 0 {
            return 0.0;
        }
        let done = self.columns.last().map_or(0, |c| self.tasks_in(c).len());
        done as f32 / total as f32
    }

    /// Append a task to the entry (leftmost) column, making it the newest there
    pub fn add_task(&mut self, task: Task) -> Result<(), BoardError> {
        let column = self
            .columns
            .first()
            .cloned()
            .ok_or_else(|| BoardError::NoColumns(self.name.clone()))?;
        self.tasks.entry(column).or_default().push(task);
        Ok(())
    }

    /// Replace a task's title and description in place
    pub fn update_task(
        &mut self,
        id: TaskId,
        title: String,
        description: String,
    ) -> Result<(), BoardError> {
        let task = self.task_mut(id).ok_or(BoardError::TaskNotFound(id))?;
        task.title = title;
        task.description = description;
        Ok(())
    }

    /// Remove a task and hand it back
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, BoardError> {
        let column = self
            .column_of(id)
            .map(|(name, _)| name.to_string())
            .ok_or(BoardError::TaskNotFound(id))?;
        let tasks = self
            .tasks
            .get_mut(&column)
            .ok_or(BoardError::TaskNotFound(id))?;
        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;
        Ok(tasks.remove(pos))
    }

    /// Move a task to the neighbouring column, where it becomes the newest task.
    /// Returns `false` when the task already sits in the edge column.
    pub fn move_task(&mut self, id: TaskId, direction: Direction) -> Result<bool, BoardError> {
        let (from, index) = self
            .column_of(id)
            .map(|(name, i)| (name.to_string(), i))
            .ok_or(BoardError::TaskNotFound(id))?;
        let Some(target_index) = direction.step(index, self.columns.len()) else {
            return Ok(false);
        };
        let target = self.columns[target_index].clone();
        let task = self.delete_task(id)?;
        tracing::debug!(task = %id, from = %from, to = %target, "moving task");
        self.tasks.entry(target).or_default().push(task);
        Ok(true)
    }

    /// Append a column on the right
    pub fn add_column(&mut self, column: &str) -> Result<(), BoardError> {
        if self.columns.iter().any(|c| c == column) {
            return Err(BoardError::DuplicateColumn {
                board: self.name.clone(),
                column: column.to_string(),
            });
        }
        self.columns.push(column.to_string());
        Ok(())
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        let (column, _) = self.column_of(id)?;
        let column = column.to_string();
        self.tasks
            .get_mut(&column)?
            .iter_mut()
            .find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(columns: Vec<(&str, Vec<&str>)>) -> Board {
        let mut board = Board::new("test", "/tmp/test");
        board.columns = columns.iter().map(|(c, _)| c.to_string()).collect();
        for (column, titles) in columns {
            board.tasks.insert(
                column.to_string(),
                titles.into_iter().map(|t| Task::new(t, "")).collect(),
            );
        }
        board
    }

    fn id_of(board: &Board, title: &str) -> TaskId {
        board
            .tasks
            .values()
            .flatten()
            .find(|t| t.title == title)
            .map(|t| t.id)
            .unwrap()
    }

    #[test]
    fn new_board_has_default_columns() {
        let board = Board::new("lanes", "/src/lanes");
        assert_eq!(board.columns, vec!["Todo", "In Progress", "Done"]);
        assert!(board.is_empty());
    }

    #[test]
    fn column_of_finds_task() {
        let board = board_with(vec![("Todo", vec!["A"]), ("Doing", vec!["B"])]);
        assert_eq!(board.column_of(id_of(&board, "B")), Some(("Doing", 1)));
        assert_eq!(board.column_of(TaskId::new()), None);
    }

    #[test]
    fn column_without_entry_is_empty() {
        let mut board = board_with(vec![("Todo", vec!["A"])]);
        board.columns.push("Later".into());
        assert!(board.tasks_in("Later").is_empty());
        assert!(!board.is_empty());
    }

    #[test]
    fn tasks_outside_known_columns_are_ignored() {
        let mut board = board_with(vec![("Todo", vec![])]);
        board
            .tasks
            .insert("Orphan".into(), vec![Task::new("lost", "")]);
        assert!(board.is_empty());
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn add_task_appends_to_entry_column() {
        let mut board = board_with(vec![("Todo", vec!["A"]), ("Done", vec![])]);
        board.add_task(Task::new("B", "")).unwrap();
        let titles: Vec<_> = board.tasks_in("Todo").iter().map(|t| &t.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn add_task_without_columns_fails() {
        let mut board = board_with(vec![]);
        let err = board.add_task(Task::new("A", "")).unwrap_err();
        assert!(matches!(err, BoardError::NoColumns(_)));
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn update_keeps_identity() {
        let mut board = board_with(vec![("Todo", vec!["A"])]);
        let id = id_of(&board, "A");
        board
            .update_task(id, "A2".into(), "more".into())
            .unwrap();
        let task = board.task(id).unwrap();
        assert_eq!(task.title, "A2");
        assert_eq!(task.description, "more");
    }

    #[test]
    fn delete_unknown_task_fails_without_mutation() {
        let mut board = board_with(vec![("Todo", vec!["A"])]);
        let err = board.delete_task(TaskId::new()).unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound(_)));
        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn move_right_appends_to_next_column() {
        let mut board = board_with(vec![("Todo", vec!["A", "B"]), ("Doing", vec!["C"])]);
        let id = id_of(&board, "A");
        assert!(board.move_task(id, Direction::Right).unwrap());
        assert_eq!(board.column_of(id), Some(("Doing", 1)));
        let doing: Vec<_> = board.tasks_in("Doing").iter().map(|t| &t.title).collect();
        assert_eq!(doing, vec!["C", "A"]);
        assert_eq!(board.tasks_in("Todo").len(), 1);
    }

    #[test]
    fn move_past_edges_is_noop() {
        let mut board = board_with(vec![("Todo", vec!["A"]), ("Done", vec!["B"])]);
        let a = id_of(&board, "A");
        let b = id_of(&board, "B");
        assert!(!board.move_task(a, Direction::Left).unwrap());
        assert!(!board.move_task(b, Direction::Right).unwrap());
        assert_eq!(board.column_of(a), Some(("Todo", 0)));
        assert_eq!(board.column_of(b), Some(("Done", 1)));
    }

    #[test]
    fn progress_counts_last_column() {
        let board = board_with(vec![("Todo", vec!["A", "B", "C"]), ("Done", vec!["D"])]);
        assert!((board.progress() - 0.25).abs() < f32::EPSILON);
        assert_eq!(board_with(vec![("Todo", vec![])]).progress(), 0.0);
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut board = board_with(vec![("Todo", vec![])]);
        board.add_column("Review").unwrap();
        assert!(matches!(
            board.add_column("Todo"),
            Err(BoardError::DuplicateColumn { .. })
        ));
        assert_eq!(board.columns, vec!["Todo", "Review"]);
    }

    #[test]
    fn null_columns_and_tasks_load_empty() {
        let board: Board = serde_json::from_str(
            r#"{"name":"old","dir":"/tmp/old","columns":null,"tasks":null}"#,
        )
        .unwrap();
        assert!(board.columns.is_empty());
        assert!(board.tasks.is_empty());

        let board: Board = serde_json::from_str(
            r#"{"name":"old","columns":["Todo","Done"],"tasks":{"Todo":null,"Done":[{"title":"A"}]}}"#,
        )
        .unwrap();
        assert!(board.tasks_in("Todo").is_empty());
        assert_eq!(board.tasks_in("Done")[0].title, "A");
    }

    #[test]
    fn direction_step_bounds() {
        assert_eq!(Direction::Left.step(0, 3), None);
        assert_eq!(Direction::Left.step(2, 3), Some(1));
        assert_eq!(Direction::Right.step(2, 3), None);
        assert_eq!(Direction::Right.step(0, 3), Some(1));
    }
}
