use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanes", about = concat!("lanes v", env!("CARGO_PKG_VERSION"), " - kanban boards in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Resolve the board from a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all boards with their task counts and progress
    List,
    /// Open or change a board by name
    Board(BoardCmd),
    /// Open the config file in $EDITOR
    Config,
    /// Open the log file in $EDITOR
    Logs,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardCmd {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Open a board by name
    Open(BoardOpenArgs),
    /// Append a column to a board
    AddColumn(AddColumnArgs),
}

#[derive(Args)]
pub struct BoardOpenArgs {
    /// Board name (see `lanes list`)
    pub name: String,
}

#[derive(Args)]
pub struct AddColumnArgs {
    /// Board name
    pub board: String,
    /// Column name, appended on the right
    pub column: String,
}
