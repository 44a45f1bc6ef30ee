//! Argument structs for each CLI command.

use super::validators::{validate_name, validate_reference_user, validate_user_id};
use clap::{Parser, Subcommand};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// The user all degrees of separation are measured from
    ///
    /// Must be a positive user ID. Defaults to 1.
    #[arg(short, long, value_parser = validate_reference_user)]
    pub reference_user: Option<i64>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `user` command
#[derive(Parser, Debug, Clone)]
pub struct UserArgs {
    /// User action to perform
    #[command(subcommand)]
    pub action: UserAction,
}

/// User provisioning actions
#[derive(Subcommand, Debug, Clone)]
pub enum UserAction {
    /// Add a user to the network
    Add {
        /// Unique user ID
        #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
        id: i64,

        /// Display name
        #[arg(value_parser = validate_name)]
        name: String,
    },

    /// List all users
    List,

    /// Show a single user
    Show {
        /// User ID
        #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
        id: i64,
    },
}

/// Arguments for the `connect` command
#[derive(Parser, Debug, Clone)]
pub struct ConnectArgs {
    /// First user ID
    #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
    pub first: i64,

    /// Second user ID
    #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
    pub second: i64,
}

/// Arguments for the `connections` command
#[derive(Parser, Debug, Clone)]
pub struct ConnectionsArgs {
    /// User whose direct connections to list
    #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
    pub id: i64,
}

/// Arguments for the `degree` command
#[derive(Parser, Debug, Clone)]
pub struct DegreeArgs {
    /// Target user ID
    #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
    pub target: i64,

    /// Give up on targets further than this many connections away
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Abort the search after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the `path` command
#[derive(Parser, Debug, Clone)]
pub struct PathArgs {
    /// Target user ID
    #[arg(value_parser = validate_user_id, allow_hyphen_values = true)]
    pub target: i64,
}
