//! CLI module for driftr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for stopping and
//! restarting the application's processes.

pub mod commands;

pub use commands::Cli;
