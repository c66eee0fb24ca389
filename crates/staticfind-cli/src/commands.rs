//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands for the static asset tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Find the absolute paths for the given static file(s)
    Find {
        /// Logical asset paths to resolve (e.g. "css/base.css")
        #[arg(required = true)]
        paths: Vec<String>,

        /// Only return the first match for each path
        #[arg(long)]
        first: bool,
    },

    /// List every asset visible through the finder chain
    List {
        /// Skip entries matching this fnmatch-style pattern (repeatable)
        #[arg(short = 'i', long = "ignore", value_name = "PATTERN")]
        ignore: Vec<String>,

        /// Do not apply the default ignore patterns (CVS, .*, *~)
        #[arg(long)]
        no_default_ignore: bool,
    },

    /// Copy every visible asset into the configured root
    Collect {
        /// Report what would be copied without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Skip entries matching this fnmatch-style pattern (repeatable)
        #[arg(short = 'i', long = "ignore", value_name = "PATTERN")]
        ignore: Vec<String>,

        /// Do not apply the default ignore patterns (CVS, .*, *~)
        #[arg(long)]
        no_default_ignore: bool,
    },

    /// Start the development server
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Allow serving static files even when debug mode is off
        #[arg(long)]
        insecure: bool,

        /// Show directory indexes
        #[arg(long)]
        show_indexes: bool,

        /// Serve below this directory instead of the finder chain
        #[arg(long, value_name = "DIR")]
        document_root: Option<PathBuf>,
    },
}
