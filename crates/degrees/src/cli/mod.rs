//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for degrees using clap's
//! derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a new degrees repository
//! - `info`: Show repository information
//! - `user add|list|show`: Provision and inspect users
//! - `connect`: Connect two users
//! - `connections`: List a user's direct connections
//! - `degree`: Degree of separation from the reference user
//! - `path`: Shortest path from the reference user
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! degrees init --reference-user 1
//! degrees user add 1 "Ada Lovelace"
//! degrees user add 2 "Grace Hopper"
//! degrees connect 1 2
//! degrees degree 2
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    ConnectArgs, ConnectionsArgs, DegreeArgs, InfoArgs, InitArgs, PathArgs, UserAction, UserArgs,
};

// Re-export validators for external use
pub use validators::{validate_name, validate_reference_user, validate_user_id};

/// Degrees - degrees of separation in a connection graph
///
/// Users and their connections are stored in `.degrees/graph.jsonl`.
#[derive(Parser, Debug)]
#[command(name = "degrees")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new degrees repository
    ///
    /// Creates the `.degrees/` directory with configuration and an empty graph.
    Init(InitArgs),

    /// Show repository information
    ///
    /// Displays the data file, reference user and graph size.
    Info(InfoArgs),

    /// Add, list or show users
    User(UserArgs),

    /// Connect two users
    ///
    /// Both users must exist. Connecting an already-connected pair is a no-op.
    Connect(ConnectArgs),

    /// List the users directly connected to a user
    Connections(ConnectionsArgs),

    /// Show the degree of separation from the reference user
    Degree(DegreeArgs),

    /// Show the shortest path from the reference user
    Path(PathArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Info(args)) => {
                let app = load_app().await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::User(args)) => {
                let app = load_app().await?;
                execute::execute_user(&app, args, output_mode).await
            }
            Some(Commands::Connect(args)) => {
                let app = load_app().await?;
                execute::execute_connect(&app, args, output_mode).await
            }
            Some(Commands::Connections(args)) => {
                let app = load_app().await?;
                execute::execute_connections(&app, args, output_mode).await
            }
            Some(Commands::Degree(args)) => {
                let app = load_app().await?;
                execute::execute_degree(&app, args, output_mode).await
            }
            Some(Commands::Path(args)) => {
                let app = load_app().await?;
                execute::execute_path(&app, args, output_mode).await
            }
            None => {
                println!("Degrees - degrees of separation in a connection graph");
                println!();
                println!("Run 'degrees --help' for usage information.");
                Ok(())
            }
        }
    }
}

/// Open the repository containing the current directory.
async fn load_app() -> Result<crate::app::App> {
    let app = crate::app::App::from_directory(&std::env::current_dir()?).await?;
    Ok(app)
}
