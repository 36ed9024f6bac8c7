mod app;
mod curriculum;
mod engine;
mod models;
mod tui;
mod vfs;

use anyhow::Result;
use clap::{Parser, Subcommand};

use app::run_tui;

#[derive(Parser)]
#[command(name = "muxdojo")]
#[command(version = "0.1.0")]
#[command(about = "Interactive tmux trainer with guided lessons and challenges")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start in challenge mode instead of the guided lessons
    #[arg(short, long)]
    challenge: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lesson plan and exit
    Lessons,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Lessons) => {
            for chapter in curriculum::CURRICULUM {
                println!("{}", chapter.title);
                for lesson in chapter.lessons {
                    println!("  {:<20} {}", lesson.id, lesson.title);
                }
            }
        }
        None => {
            run_tui(cli.challenge).await?;
        }
    }

    Ok(())
}
