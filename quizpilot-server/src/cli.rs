use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quizpilot",
    about = "QuizPilot - quiz answering daemon backed by Gemini",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP daemon (default if no command specified)")]
    Serve {
        #[arg(short, long, env = "QUIZPILOT_PORT", help = "Overrides server.port from config")]
        port: Option<u16>,
    },

    #[command(about = "Answer a single question read from a JSON file")]
    Ask {
        #[arg(short, long, help = "Path to a question JSON file")]
        file: PathBuf,

        #[arg(long, help = "Print the answer as JSON")]
        json: bool,
    },

    #[command(subcommand, about = "Manage the Gemini API key")]
    Credential(CredentialCommands),

    #[command(subcommand, about = "View configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum CredentialCommands {
    #[command(about = "Store a new API key")]
    Set {
        #[arg(help = "Gemini API key")]
        api_key: String,

        #[arg(long, help = "Validate the key before storing it")]
        verify: bool,
    },

    #[command(about = "Show the stored API key (masked)")]
    Show,

    #[command(about = "Check an API key against the provider")]
    Test {
        #[arg(help = "Key to test (defaults to the stored key)")]
        api_key: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },
}
