//! Command-line interface: serve, chat and ingest subcommands.

pub mod chat;
pub mod ingest;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "manual-qa", version, about = "Question answering over a PDF manual")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Interactive question loop in the terminal
    Chat,
    /// Build the vector index from a PDF
    Ingest(ingest::IngestArgs),
}
