//! CLI entry point: parse flags, resolve config, run one reconciliation.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use github_todotxt::io::config::{Config, EnvOverrides, Settings, default_config_path, load_config};
use github_todotxt::io::github::GithubClient;
use github_todotxt::io::todo_file::PersistError;
use github_todotxt::sync::run_sync;
use github_todotxt::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "github-todotxt",
    version,
    about = "Reconcile a todo.txt file with the GitHub issues assigned to you"
)]
struct Cli {
    /// GitHub OAuth token.
    #[arg(short, long)]
    token: Option<String>,

    /// todo.txt file to reconcile.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: ~/.github-todotxt.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress progress notes.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

/// Map an error to a stable exit code. The write-after-backup case gets its
/// own code so callers can tell "file untouched" from "restore from backup".
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err
        .downcast_ref::<PersistError>()
        .is_some_and(PersistError::backup_taken)
    {
        return exit_codes::BACKUP_ONLY;
    }
    exit_codes::FAILURE
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.or_else(default_config_path) {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(cli.token, cli.file, EnvOverrides::from_process(), config)?;

    let source = GithubClient::new(settings.token)?;
    let today = Local::now().date_naive();
    let outcome = run_sync(&settings.file, &source, today)?;

    if !cli.quiet {
        println!(
            "{} lines, {} issues: {} completed, {} unassigned, {} added",
            outcome.lines_read,
            outcome.issues_fetched,
            outcome.summary.completed.len(),
            outcome.summary.orphaned.len(),
            outcome.summary.added.len(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["github-todotxt"]);
        assert!(cli.token.is_none());
        assert!(cli.file.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::parse_from([
            "github-todotxt",
            "-t",
            "abc",
            "--file",
            "todo.txt",
            "--quiet",
        ]);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("todo.txt")));
        assert!(cli.quiet);
    }
}
