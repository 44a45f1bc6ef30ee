//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.

use crate::domain::{Degree, User, UserId};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output mode for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

fn colorize_id(id: UserId) -> String {
    id.to_string().cyan().to_string()
}

/// Print a single user
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_user(user: &User, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => writeln!(handle, "{} {}", colorize_id(user.id), user.name),
        OutputMode::Json => write_json(&mut handle, user),
    }
}

/// Print a list of users, e.g. a connection list
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_users(users: &[User], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_users_text(&mut handle, users),
        OutputMode::Json => write_json(&mut handle, users),
    }
}

#[derive(Serialize)]
struct DegreeReport {
    reference: UserId,
    target: UserId,
    /// `null` when there is no path
    degree: Option<usize>,
}

/// Print the degree of separation to `target`
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_degree(
    reference: UserId,
    target: UserId,
    degree: Degree,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => match degree {
            Degree::Separated(d) => writeln!(
                handle,
                "{} is {} from {}",
                colorize_id(target),
                format!("degree {d}").bold(),
                colorize_id(reference)
            ),
            Degree::NoPath => writeln!(
                handle,
                "{} is {} from {}",
                colorize_id(target),
                "not reachable".red(),
                colorize_id(reference)
            ),
        },
        OutputMode::Json => write_json(
            &mut handle,
            &DegreeReport {
                reference,
                target,
                degree: degree.distance(),
            },
        ),
    }
}

/// Print a shortest path, or report that none exists
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_path(target: UserId, path: Option<&[UserId]>, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => match path {
            Some(path) => {
                let hops: Vec<String> = path.iter().map(|id| colorize_id(*id)).collect();
                writeln!(handle, "{}", hops.join(" -> "))
            }
            None => writeln!(handle, "No path to {}", colorize_id(target)),
        },
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({ "target": target, "path": path }),
        ),
    }
}

/// Print a simple message
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn print_users_text<W: Write>(w: &mut W, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        writeln!(w, "No users found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} user(s):", users.len())?;
    writeln!(w)?;

    for user in users {
        writeln!(w, "  {} {}", colorize_id(user.id), user.name)?;
    }

    Ok(())
}
