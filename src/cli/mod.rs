//! Command line interface

pub mod serve;

use clap::{Parser, Subcommand};

/// Blinkshot server - realtime image generation backend
#[derive(Parser)]
#[command(name = "blinkshot-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
