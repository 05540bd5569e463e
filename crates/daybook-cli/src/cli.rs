use clap::{Parser, Subcommand};

/// CLI surface definition. The TUI is the default entry point; everything
/// else is a one-shot command against the server.
#[derive(Parser, Debug)]
#[command(
    name = "daybook",
    about = "Personal task and diary manager over a flat-file store",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to launching the TUI when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the interactive dashboard (press q or Esc to exit).
    Tui,
    /// Run the HTTP server backed by the JSON-file store.
    Serve {
        /// Listen address, e.g. 127.0.0.1:5000.
        #[arg(long)]
        addr: Option<String>,
    },
    /// Manage tasks from the command line.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Manage diary entries from the command line.
    #[command(subcommand)]
    Diary(DiaryCommand),
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Check that the server answers on both collections.
    Health,
    /// Print version and exit.
    Version,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// List tasks sorted by priority (high first).
    List,
    /// Add a task.
    Add {
        text: String,
        /// high, medium or low; defaults to medium.
        #[arg(long)]
        priority: Option<String>,
        /// Optional due date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace text and priority of an existing task.
    Edit {
        id: i64,
        text: String,
        #[arg(long)]
        priority: String,
    },
    /// Delete a task by id.
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DiaryCommand {
    /// List diary entries in insertion order.
    List,
    /// Add an entry; the date defaults to now.
    Add {
        text: String,
        /// Entry date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an entry by id.
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}
