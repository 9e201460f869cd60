// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use solace_input::{ChatInput, HttpRelay, InputConfig, Key};
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;
mod logging;
mod terminal;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let _logger = logging::init()?;

    let args = Cli::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Chat => chat(&args.backend_url).await?,
    }

    Ok(())
}

/// Feeds each stdin line to the input widget as a typed draft followed by Enter.
async fn chat(backend_url: &str) -> Result<()> {
    let config = InputConfig::new(backend_url)?;
    let relay = Arc::new(HttpRelay::new(&config)?);
    let (widget, handle) = ChatInput::new(&config, relay, Arc::new(terminal::TerminalSink));
    let widget_task = tokio::spawn(widget.run());

    log::info!("chatting with {}", config.chat_url()?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        handle.edit(line)?;
        handle.key(Key::Enter)?;
    }

    handle.shutdown()?;
    widget_task.await?;
    Ok(())
}
