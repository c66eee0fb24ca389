//! CLI entry point - the composition root.
//!
//! This is the only place where configuration, the finder registry, and
//! the server adapter are wired together. Command dispatch routes to
//! handlers which take the context by reference.

use clap::Parser;

use staticfind_axum::ServeConfig;
use staticfind_cli::{Cli, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads STATICFIND_CONFIG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap::bootstrap(&cli.config)?;

    match command {
        Commands::Find { paths, first } => {
            let found_any = handlers::find::execute(&ctx, &paths, first)?;
            if !found_any {
                std::process::exit(1);
            }
        }
        Commands::List {
            ignore,
            no_default_ignore,
        } => {
            handlers::list::execute(&ctx, ignore, no_default_ignore)?;
        }
        Commands::Collect {
            dry_run,
            ignore,
            no_default_ignore,
        } => {
            handlers::collect::execute(&ctx, dry_run, ignore, no_default_ignore)?;
        }
        Commands::Serve {
            host,
            port,
            insecure,
            show_indexes,
            document_root,
        } => {
            let serve = ServeConfig {
                host,
                port,
                insecure,
                show_indexes,
                document_root,
            };
            handlers::serve::execute(ctx, serve).await?;
        }
    }

    Ok(())
}

/// Initialize logging: `RUST_LOG` wins, `--verbose` raises the default
/// level to debug.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
