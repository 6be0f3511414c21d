//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// quill - plain-text notes with tags and a static site
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The project root, with `--dir` taking precedence over the working
    /// directory.
    pub fn project_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a project in the directory
    Init,

    /// List all notes
    Ls(ListArgs),

    /// Create a new note
    #[command(visible_alias = "n")]
    New(NewArgs),

    /// Edit a note in your editor
    #[command(visible_alias = "e")]
    Edit(NoteArgs),

    /// Edit the most recent note
    #[command(visible_alias = "l")]
    Last,

    /// Delete a note
    Rm(NoteArgs),

    /// Print a note's raw text
    #[command(visible_alias = "p")]
    Print(NoteArgs),

    /// Filter notes by keyword (tag or title) or by `:tag`
    #[command(visible_alias = "f")]
    Find(FindArgs),

    /// List all tags with their note counts
    Tags(TagsArgs),

    /// Render the static site into `www`
    #[command(visible_alias = "b")]
    Build,

    /// Rebuild the database from the note files
    Reindex,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Create the note without opening an editor
    #[arg(long)]
    pub no_edit: bool,
}

/// Arguments for commands addressing one note
#[derive(Parser, Debug)]
pub struct NoteArgs {
    /// Note id (YYYY-MM-DD-HHMMSS)
    pub id: String,
}

/// Arguments for the `find` command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Criteria, all of which must match. `:name` matches only tags.
    pub criteria: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
