//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the static asset tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "staticfind")]
#[command(about = "Resolve, collect, and serve static assets")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        long = "config",
        global = true,
        env = "STATICFIND_CONFIG",
        default_value = "staticfind.toml"
    )]
    pub config: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_parse() {
        let cli = Cli::parse_from([
            "staticfind",
            "--verbose",
            "--config",
            "/tmp/assets.toml",
            "find",
            "css/base.css",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("/tmp/assets.toml"));
    }

    #[test]
    fn find_takes_paths_and_first_flag() {
        let cli = Cli::parse_from(["staticfind", "find", "--first", "a.txt", "b.txt"]);
        match cli.command {
            Some(Commands::Find { paths, first }) => {
                assert!(first);
                assert_eq!(paths, vec!["a.txt", "b.txt"]);
            }
            _ => panic!("expected find command"),
        }
    }
}
