use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod ask;
pub mod chat;

#[derive(Subcommand)]
enum Command {
    /// Start an interactive history chat session
    Chat {},
    /// Ask a single history question and print the reply
    Ask {
        #[arg(long)]
        question: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Chat {}) => {
            chat::run().await?;
        }
        Some(Command::Ask { question }) => {
            ask::run(&question).await?;
        }
        None => {}
    }

    Ok(())
}
