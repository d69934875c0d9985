use clap::Parser;
use lanes::cli::commands::Cli;
use lanes::cli::handlers;
use lanes::io::{logging, paths};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(paths::config_dir().as_deref());

    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
