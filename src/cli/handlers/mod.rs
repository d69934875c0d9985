use std::fs;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{ConfigStore, FileStore, StoreError};
use crate::io::{editor, logging};
use crate::model::board::BoardError;
use crate::ops::board_ops::{self, Workspace, WorkspaceError};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        None => cmd_open_cwd(cli.dir.as_deref()),
        Some(cmd) => match cmd {
            Commands::List => cmd_list(json),
            Commands::Board(args) => match args.action {
                BoardAction::Open(args) => cmd_board_open(args),
                BoardAction::AddColumn(args) => cmd_add_column(args),
            },
            Commands::Config => cmd_config(),
            Commands::Logs => cmd_logs(),
        },
    }
}

// ---------------------------------------------------------------------------
// TUI entry points
// ---------------------------------------------------------------------------

/// Working directory, or the `-C` override resolved to an absolute path
fn resolve_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => Ok(fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

fn cmd_open_cwd(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_dir(dir)?;
    let store = FileStore::open_default()?;
    let workspace = board_ops::open_for_dir(Box::new(store), &dir)?;
    crate::tui::run(workspace)
}

fn cmd_board_open(args: BoardOpenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open_default()?;
    let workspace = match Workspace::open(Box::new(store), &args.name) {
        Ok(ws) => ws,
        Err(WorkspaceError::Board(BoardError::BoardNotFound(name))) => {
            return Err(format!(
                "no board named '{}' (run `lanes list` to see your boards)",
                name
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };
    crate::tui::run(workspace)
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

fn cmd_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = FileStore::open_default()?.load()?;
    let rows = board_ops::summarize(&config);

    if json {
        let items: Vec<BoardJson> = rows.iter().map(board_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No boards yet.");
        println!();
        println!("Run `lanes` in a project directory to create one.");
        return Ok(());
    }

    for line in format_board_table(&rows) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_add_column(args: AddColumnArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open_default()?;
    board_ops::add_column(&store, &args.board, &args.column)?;
    println!("Added column '{}' to {}", args.column, args.board);
    Ok(())
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn cmd_config() -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open_default()?;
    // Writes the default config if there is none yet
    store.load()?;
    editor::open_file(&editor::resolve_editor(), store.path())?;
    Ok(())
}

fn cmd_logs() -> Result<(), Box<dyn std::error::Error>> {
    let path = logging::log_path().ok_or(StoreError::NoConfigDir)?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::File::create(&path)?;
    }
    editor::open_file(&editor::resolve_editor(), &path)?;
    Ok(())
}
