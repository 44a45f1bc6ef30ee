//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use std::time::Duration;

use super::args::{
    ConnectArgs, ConnectionsArgs, DegreeArgs, InfoArgs, InitArgs, PathArgs, UserAction, UserArgs,
};
use crate::app::App;
use crate::domain::{ConnectOutcome, User, UserId};
use crate::error::Error;
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.reference_user).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "degrees_dir": result.degrees_dir.display().to_string(),
            "config_file": result.config_file.display().to_string(),
            "graph_file": result.graph_file.display().to_string(),
            "reference_user": result.reference_user,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Initialized degrees in {}", result.degrees_dir.display());
            println!("  Config: {}", result.config_file.display());
            println!("  Graph: {}", result.graph_file.display());
            println!("  Reference user: {}", result.reference_user);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let data_file = app
        .data_path()
        .map_or_else(|| "(in memory)".to_string(), |p| p.display().to_string());
    let users = app.store().export_users().await?;
    let connections = app.store().export_connections().await?;
    let reference = app.service().reference();

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "data_file": data_file,
                "reference_user": reference,
                "users": users.len(),
                "connections": connections.len(),
            }))?;
        }
        OutputMode::Text => {
            println!("Degrees Repository Information");
            println!("==============================");
            println!();
            println!("Data file:      {data_file}");
            println!("Reference user: {reference}");
            println!();
            println!(
                "Graph: {} user(s), {} connection(s)",
                users.len(),
                connections.len()
            );
        }
    }

    Ok(())
}

/// Execute the user command
pub async fn execute_user(app: &App, args: &UserArgs, output_mode: OutputMode) -> Result<()> {
    match &args.action {
        UserAction::Add { id, name } => {
            let user = app.store().add_user(User::new(*id, name.clone())).await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => output::print_user(&user, output_mode)?,
                OutputMode::Text => {
                    output::print_message(&format!("Added user {} {}", user.id, user.name))?;
                }
            }
        }
        UserAction::List => {
            let users = app.store().export_users().await?;
            output::print_users(&users, output_mode)?;
        }
        UserAction::Show { id } => {
            let id = UserId(*id);
            let user = app
                .store()
                .find_user(id)
                .await?
                .ok_or(Error::UserNotFound(id))?;
            output::print_user(&user, output_mode)?;
        }
    }

    Ok(())
}

/// Execute the connect command
pub async fn execute_connect(app: &App, args: &ConnectArgs, output_mode: OutputMode) -> Result<()> {
    let (first, second) = (UserId(args.first), UserId(args.second));
    let outcome = app.service().connect(first, second).await?;

    if outcome == ConnectOutcome::Connected {
        app.save().await?;
    }

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "a": first,
            "b": second,
            "created": outcome == ConnectOutcome::Connected,
        }))?,
        OutputMode::Text => {
            let msg = match outcome {
                ConnectOutcome::Connected => format!("Connected {first} and {second}"),
                ConnectOutcome::AlreadyConnected => {
                    format!("{first} and {second} are already connected")
                }
            };
            output::print_message(&msg)?;
        }
    }

    Ok(())
}

/// Execute the connections command
pub async fn execute_connections(
    app: &App,
    args: &ConnectionsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let users = app.service().connections(UserId(args.id)).await;
    output::print_users(&users, output_mode)?;
    Ok(())
}

/// Execute the degree command
pub async fn execute_degree(app: &App, args: &DegreeArgs, output_mode: OutputMode) -> Result<()> {
    let mut options = app.service().options().clone();
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }
    if let Some(ms) = args.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    let target = UserId(args.target);
    let degree = app.service().connection_degree_with(target, &options).await;
    output::print_degree(app.service().reference(), target, degree, output_mode)?;
    Ok(())
}

/// Execute the path command
pub async fn execute_path(app: &App, args: &PathArgs, output_mode: OutputMode) -> Result<()> {
    let target = UserId(args.target);
    let path = app.service().connection_path(target).await;
    output::print_path(target, path.as_deref(), output_mode)?;
    Ok(())
}
