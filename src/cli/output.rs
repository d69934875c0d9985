use serde::Serialize;

use crate::ops::board_ops::BoardSummary;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardJson {
    pub name: String,
    pub tasks: usize,
    /// Percentage of tasks in the last column
    pub progress: u8,
    pub path: String,
}

pub fn board_to_json(summary: &BoardSummary) -> BoardJson {
    BoardJson {
        name: summary.name.clone(),
        tasks: summary.task_count,
        progress: summary.progress,
        path: summary.dir.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Replace the home directory prefix with `~`
pub fn abbreviate_path(path: &str) -> String {
    if let Some(home) = dirs::home_dir() {
        let home = home.to_string_lossy();
        if !home.is_empty()
            && let Some(rest) = path.strip_prefix(home.as_ref())
            && (rest.is_empty() || rest.starts_with('/'))
        {
            return format!("~{}", rest);
        }
    }
    path.to_string()
}

/// The `lanes list` table: #, board, task count, progress, path
pub fn format_board_table(rows: &[BoardSummary]) -> Vec<String> {
    let name_w = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Board".len());
    let mut lines = vec![format!(
        "{:>3}  {:<name_w$}  {:>5}  {:>8}  {}",
        "#", "Board", "Tasks", "Progress", "Path"
    )];
    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<name_w$}  {:>5}  {:>7}%  {}",
            i + 1,
            row.name,
            row.task_count,
            row.progress,
            abbreviate_path(&row.dir),
        ));
    }
    lines
}
