use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::io::paths;
use crate::model::UserConfig;

/// Error type for config persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where the user config lives. Every board mutation ends in `save`.
pub trait ConfigStore {
    fn load(&self) -> Result<UserConfig, StoreError>;
    fn save(&self, config: &UserConfig) -> Result<(), StoreError>;
}

/// The JSON config file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Store at `config.json` inside the resolved config directory
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = paths::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(FileStore::new(paths::config_file(&dir)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    /// Read the config, writing a default one first if the file doesn't exist yet
    fn load(&self) -> Result<UserConfig, StoreError> {
        if !self.path.exists() {
            let config = UserConfig::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "created default config");
            return Ok(config);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, config: &UserConfig) -> Result<(), StoreError> {
        let content = to_tab_indented_json(config)?;
        let write_err = |e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        atomic_write(&self.path, &content).map_err(write_err)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn to_tab_indented_json(config: &UserConfig) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    config.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}

/// In-memory store for tests; can be told to fail saves
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: std::cell::RefCell<Option<UserConfig>>,
    pub initial: UserConfig,
    pub fail_saves: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with(config: UserConfig) -> Self {
        MemoryStore {
            initial: config,
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<UserConfig, StoreError> {
        Ok(self
            .saved
            .borrow()
            .clone()
            .unwrap_or_else(|| self.initial.clone()))
    }

    fn save(&self, config: &UserConfig) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::Write {
                path: PathBuf::from("memory"),
                source: io::Error::other("disk full"),
            });
        }
        self.saved.replace(Some(config.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, Task};
    use tempfile::TempDir;

    #[test]
    fn load_creates_default_config() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nested/config.json"));
        let config = store.load().unwrap();
        assert!(config.boards.is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn save_then_load_keeps_boards() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("config.json"));
        let mut config = UserConfig::default();
        let mut board = Board::new("lanes", "/src/lanes");
        board.add_task(Task::new("Ship it", "soon")).unwrap();
        config.boards.push(board);
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        let board = loaded.board("lanes").unwrap();
        assert_eq!(board.tasks_in("Todo")[0].title, "Ship it");
        assert_eq!(board.tasks_in("Todo")[0].description, "soon");
    }

    #[test]
    fn saved_file_is_tab_indented() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("config.json"));
        store.save(&UserConfig::default()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n\t\"primary_color\": \"blue\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "not json {{{").unwrap();
        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn memory_store_can_fail() {
        let store = MemoryStore::default();
        store.fail_saves.set(true);
        assert!(store.save(&UserConfig::default()).is_err());
        assert!(store.saved.borrow().is_none());
    }
}
