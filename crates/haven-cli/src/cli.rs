//! Command line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "haven", about = "Local-first companion chat", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (the default)
    Chat {
        /// Thread to chat in; defaults to the bootstrap thread
        #[arg(long)]
        thread: Option<String>,
    },
    /// Manage conversation threads
    Thread {
        #[command(subcommand)]
        command: ThreadCommands,
    },
    /// Inspect or edit the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
pub enum ThreadCommands {
    /// List threads, newest first
    List,
    /// Create a thread
    New { name: String },
    /// Rename a thread
    Rename { id: String, name: String },
    /// Delete a thread and its history
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        pronouns: Option<String>,
        /// supportive, balanced or challenging
        #[arg(long)]
        style: Option<String>,
    },
    /// Add a core fact
    AddFact { text: String },
    /// Remove all core facts
    ClearFacts,
}
