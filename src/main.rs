mod app;
mod cli;
mod logging;
mod store;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tui::{ChatSession, ThemeMode};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let log_path = logging::init_logging(cli.log_dir.as_deref())?;
    tracing::debug!(path = %log_path.display(), "logging initialised");

    match cli.command {
        Some(command) => match command {
            Commands::Snapshot {
                width,
                height,
                search,
            } => {
                print_snapshot(cli.theme, width, height, search)?;
            }
            Commands::Transcript => {
                let session = ChatSession::new(cli.theme);
                for message in session.chat().messages() {
                    let line =
                        serde_json::to_string(message).context("failed to encode message")?;
                    println!("{line}");
                }
            }
        },
        None => {
            tui::run(cli.theme).await?;
        }
    }

    Ok(())
}

fn print_snapshot(theme: ThemeMode, width: u16, height: u16, search: bool) -> Result<()> {
    for line in snapshot_lines(theme, width, height, search)? {
        println!("{line}");
    }
    Ok(())
}

/// One frame of a fresh session, trailing blanks stripped
fn snapshot_lines(theme: ThemeMode, width: u16, height: u16, search: bool) -> Result<Vec<String>> {
    let mut session = ChatSession::new(theme);
    if search {
        session.dispatch(tui::Action::ToggleSearch);
    }

    let view = tui::compose(session.chat(), session.ui());
    let (lines, _) = tui::render_to_lines(&view, width, height)?;
    Ok(lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect())
}
