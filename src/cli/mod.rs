//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// todos - session-authenticated todo list with tags
#[derive(Parser, Debug)]
#[command(name = "todos", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the store and the session file
    #[arg(short = 'd', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the store database (overrides data dir)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Key namespace prefix
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the store answers
    Health(FormatArgs),

    /// Start a session
    Login(LoginArgs),

    /// Show the current session user
    Whoami(FormatArgs),

    /// End the current session
    Logout,

    /// Create a todo
    Create(CreateArgs),

    /// Show one todo with its tags
    Show(ShowArgs),

    /// Replace a todo's title and done flag
    Update(UpdateArgs),

    /// Delete a todo and its tag associations
    #[command(name = "rm")]
    Delete(DeleteArgs),

    /// List todos
    #[command(name = "ls")]
    List(ListArgs),

    /// Add a tag to a todo
    Tag(TagArgs),

    /// Remove a tag from a todo
    Untag(TagArgs),

    /// List the tags of a todo
    Tags(ShowArgs),

    /// List todos carrying a tag
    ByTag(ByTagArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format flag shared by most commands
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `login` command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Name to log in as
    pub name: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `create` command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Title (1-200 characters)
    pub title: String,

    /// Mark the todo as done
    #[arg(long)]
    pub done: bool,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for commands addressing one todo
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Todo id
    pub id: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `update` command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Todo id
    pub id: String,

    /// New title (1-200 characters)
    pub title: String,

    /// Mark the todo as done; omitting it marks the todo as not done
    #[arg(long)]
    pub done: bool,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Todo id
    pub id: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Maximum number of todos (capped at the configured list limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `tag` and `untag` commands
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Todo id
    pub id: String,

    /// Tag (1-50 characters)
    pub tag: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `by-tag` command
#[derive(Parser, Debug)]
pub struct ByTagArgs {
    /// Tag to look up
    pub tag: String,

    /// Maximum number of todos (capped at the configured list limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
