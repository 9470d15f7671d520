use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tui::ThemeMode;

#[derive(Parser)]
#[command(author, version, about = "A demo chat interface for the terminal", long_about = None)]
pub struct Cli {
    /// Optional command to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Theme to start in
    #[arg(long, value_enum, env = "CHAT_APP_THEME", default_value_t = ThemeMode::Light, global = true)]
    pub theme: ThemeMode,

    /// Directory for the log file
    #[arg(long, env = "CHAT_APP_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one frame of the starting screen to stdout
    Snapshot {
        /// Frame width in cells
        #[arg(long, default_value_t = 80)]
        width: u16,

        /// Frame height in cells
        #[arg(long, default_value_t = 24)]
        height: u16,

        /// Show the search bar
        #[arg(long)]
        search: bool,
    },

    /// Print the starting conversation as JSON lines
    Transcript,
}
