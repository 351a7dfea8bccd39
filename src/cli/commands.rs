use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanes", about = concat!("lanes v", env!("CARGO_PKG_VERSION"), " - a windowed board you can drag around"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./lanes.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Load the board from a JSON file instead of generating one
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the seed board
    Check,
    /// Print columns and their items
    Show(ShowArgs),
    /// Compute the window for a container
    Window(WindowArgs),
    /// Run one drag gesture against the seed board
    Drag(DragCmd),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Only print the first N columns
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct WindowArgs {
    /// Logical rows in the container
    #[arg(long)]
    pub count: usize,
    /// Viewport extent
    #[arg(long)]
    pub viewport: usize,
    /// Scroll offset
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Extent of one row (default: item height from config)
    #[arg(long)]
    pub row_extent: Option<usize>,
    /// Overscan rows (default: from config)
    #[arg(long)]
    pub overscan: Option<usize>,
    /// Reserve the placeholder slot
    #[arg(long)]
    pub placeholder: bool,
}

#[derive(Args)]
pub struct DragCmd {
    #[command(subcommand)]
    pub action: DragAction,
}

#[derive(Subcommand)]
pub enum DragAction {
    /// Move the column at SRC to DST
    Column(DragColumnArgs),
    /// Move an item between (or within) columns
    Item(DragItemArgs),
}

#[derive(Args)]
pub struct DragColumnArgs {
    /// Source index
    pub src: usize,
    /// Destination index
    pub dst: usize,
}

#[derive(Args)]
pub struct DragItemArgs {
    /// Source column id
    pub src_col: String,
    /// Index within the source column
    pub src_idx: usize,
    /// Destination column id
    pub dst_col: String,
    /// Index within the destination column
    pub dst_idx: usize,
}
