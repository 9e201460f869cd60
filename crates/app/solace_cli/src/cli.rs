use clap::{Parser, Subcommand};

/// Terminal client for the Solace chat relay.
#[derive(Parser, Debug)]
#[command(name = "solace_cli", about = "Chat with the Solace wellbeing assistant")]
pub struct Cli {
    /// Base URL of the relay server.
    #[arg(
        long,
        global = true,
        env = "BACKEND_URL",
        default_value = solace_input::config::DEFAULT_BACKEND_URL
    )]
    pub backend_url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read messages from stdin, one per line, and print the replies.
    Chat,
    /// Print the version.
    Version,
}
