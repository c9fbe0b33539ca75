//! CLI module for the account service

pub mod serve;

use clap::{Parser, Subcommand};

/// Account Service - user registration and password management over HTTP
#[derive(Parser)]
#[command(name = "account-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
