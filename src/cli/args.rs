//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--api-base <url>`: Talk to a backend other than the configured one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};

/// gitscope - Browse repository history served by a git-log API
#[derive(Parser, Debug)]
#[command(name = "gitscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the git-log API (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether the backend is up
    Health,

    /// Fetch and display the commit log of a repository
    #[command(after_help = "\
EXAMPLES:
    # Last 50 commits of a repository
    gitscope log --repo ~/src/project --max-count 50

    # Commits grouped by day
    gitscope log --repo ~/src/project --by-date

    # Distinct authors only
    gitscope log --repo ~/src/project --authors")]
    Log {
        /// Repository path on the backend host (overrides the config file)
        #[arg(long, short)]
        repo: Option<String>,

        /// Maximum number of commits; 0 means all
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        max_count: Option<i64>,

        /// Group commits by date
        #[arg(long, conflicts_with = "authors")]
        by_date: bool,

        /// List distinct authors instead of commits
        #[arg(long)]
        authors: bool,
    },

    /// Show repository name, branch and remote
    Info {
        /// Repository path on the backend host (overrides the config file)
        #[arg(long, short)]
        repo: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_log_flags() {
        let cli = Cli::try_parse_from([
            "gitscope", "--json", "log", "--repo", "/repo", "-n", "25", "--by-date",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Log {
                repo,
                max_count,
                by_date,
                authors,
            } => {
                assert_eq!(repo.as_deref(), Some("/repo"));
                assert_eq!(max_count, Some(25));
                assert!(by_date);
                assert!(!authors);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn by_date_conflicts_with_authors() {
        let result = Cli::try_parse_from(["gitscope", "log", "--by-date", "--authors"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["gitscope", "health", "--api-base", "http://x/api"]).unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://x/api"));
        assert!(matches!(cli.command, Command::Health));
    }
}
