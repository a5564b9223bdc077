//! CLI module - Command-line interface for cinepair
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cinepair - movie discovery and chat backend
#[derive(Parser)]
#[command(name = "cinepair")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve,

    /// Insert the sample movie catalog, skipping titles that already exist
    Seed,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
