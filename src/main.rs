use clap::Parser;
use lanes::cli::commands::Cli;
use lanes::cli::handlers;
use lanes::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let mut config = match config_io::load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(board) = &cli.board {
        config.seed.board = Some(board.clone());
    }

    if let Err(e) = logging::init(&config.log) {
        eprintln!("warning: could not open log file: {}", e);
    }

    if let Err(e) = handlers::dispatch(cli, &config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
