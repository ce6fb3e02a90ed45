//! CLI module for the user records service

pub mod serve;

use clap::{Args, Parser, Subcommand};

/// User records service - user registration and lookup over HTTP
#[derive(Parser)]
#[command(name = "user-records")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(ServeArgs),
}

/// Overrides applied on top of the loaded configuration
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, short)]
    pub port: Option<u16>,
}
