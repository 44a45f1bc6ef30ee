//! Command implementations that are independent of CLI parsing.

pub mod init;
