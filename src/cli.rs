//! Command-line interface definition for Blesspets
//!
//! This module defines the CLI structure using clap's derive API,
//! providing session commands and the pet inventory subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::petstore::types::PetStatus;

/// Blesspets - pet-store inventory admin CLI
///
/// Manage the remote pet-store inventory from the terminal: log in,
/// browse and search the inventory, and create, update or retire records.
#[derive(Parser, Debug, Clone)]
#[command(name = "blesspets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the API base URL from config
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the session file path from config
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Blesspets
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and persist a session
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Login password
        #[arg(short, long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Manage the pet inventory
    Pets {
        /// Inventory subcommand
        #[command(subcommand)]
        command: PetCommand,
    },
}

/// Inventory subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PetCommand {
    /// List the inventory
    List {
        /// Only query pets with this status
        #[arg(short, long)]
        status: Option<PetStatus>,

        /// Filter by name, category or tag substring
        #[arg(long)]
        search: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single pet
    Get {
        /// Pet identifier
        id: i64,

        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Add a new pet to the inventory
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Initial status
        #[arg(short, long, default_value = "available")]
        status: PetStatus,

        /// Image URL; repeat for multiple
        #[arg(long = "photo-url")]
        photo_urls: Vec<String>,

        /// Category name
        #[arg(long)]
        category: Option<String>,

        /// Tag name; repeat for multiple
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Update an existing pet
    Update {
        /// Pet identifier
        id: i64,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<PetStatus>,

        /// Replacement image URL; repeat for multiple
        #[arg(long = "photo-url")]
        photo_urls: Vec<String>,

        /// New category name
        #[arg(long)]
        category: Option<String>,

        /// Replacement tag name; repeat for multiple
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a pet from the inventory
    Delete {
        /// Pet identifier
        id: i64,
    },

    /// Upload an image for a pet
    UploadImage {
        /// Pet identifier
        id: i64,

        /// Image file to upload
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
