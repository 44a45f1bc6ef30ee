//! Degrees - degrees of separation in a connection graph.
//!
//! This crate provides both a CLI application and a library for answering
//! "how far apart are these two users?" over an undirected graph of user
//! connections. The graph lives behind the [`storage::GraphStore`] trait and
//! is only ever read one neighborhood at a time, so the search works the same
//! against the bundled in-memory store and against a remote backend.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Application context and presentation
pub mod app;
pub mod config;
pub mod output;
