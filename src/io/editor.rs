use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

const DEFAULT_EDITOR: &str = "vi";

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("could not launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        source: std::io::Error,
    },
    #[error("editor '{editor}' exited with {status}")]
    Failed { editor: String, status: String },
    #[error("temp file error: {0}")]
    TempFile(#[from] std::io::Error),
}

/// `$EDITOR`, then `$VISUAL`, then vi
pub fn resolve_editor() -> String {
    ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Run the editor on a file and wait for it. The caller owns the terminal state.
pub fn open_file(editor: &str, path: &Path) -> Result<(), EditorError> {
    // Allow "code --wait" style values
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_EDITOR);
    tracing::debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| EditorError::Launch {
            editor: editor.to_string(),
            source: e,
        })?;
    if !status.success() {
        return Err(EditorError::Failed {
            editor: editor.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Round-trip `content` through the editor via a temp file and return the result.
/// A single trailing newline added by the editor is dropped.
pub fn edit_text(editor: &str, content: &str) -> Result<String, EditorError> {
    let mut tmp = NamedTempFile::with_suffix(".md")?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    open_file(editor, tmp.path())?;
    let edited = std::fs::read_to_string(tmp.path())?;
    Ok(match edited.strip_suffix('\n') {
        Some(stripped) if !content.ends_with('\n') => stripped.to_string(),
        _ => edited,
    })
}
