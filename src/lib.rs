//! quill - plain-text notes with tags and a static site

pub mod cli;
pub mod domain;
pub mod export;
pub mod index;
pub mod infra;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    handlers::{
        handle_build, handle_completions, handle_edit, handle_find, handle_init, handle_last,
        handle_list, handle_new, handle_print, handle_reindex, handle_rm, handle_tags,
    },
};

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "QUILL_LOG";

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = cli.project_dir();
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::Init => handle_init(&root),
        Command::Ls(args) => handle_list(args, &root),
        Command::New(args) => handle_new(args, &root),
        Command::Edit(args) => handle_edit(args, &root),
        Command::Last => handle_last(&root),
        Command::Rm(args) => handle_rm(args, &root),
        Command::Print(args) => handle_print(args, &root),
        Command::Find(args) => handle_find(args, &root),
        Command::Tags(args) => handle_tags(args, &root),
        Command::Build => handle_build(&root),
        Command::Reindex => handle_reindex(&root, verbose),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Logs go to stderr. `QUILL_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("quill={default}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
