//! Collect command handler.

use anyhow::Result;

use staticfind_core::{CollectorOptions, collect};

use crate::bootstrap::CliContext;

/// Copy every visible asset into the configured root and report what
/// happened (or what would happen, under `--dry-run`).
pub fn execute(
    ctx: &CliContext,
    dry_run: bool,
    ignore: Vec<String>,
    no_default_ignore: bool,
) -> Result<()> {
    let options = CollectorOptions {
        ignore_patterns: ignore,
        use_default_ignore: !no_default_ignore,
        dry_run,
    };

    let collected = collect(&ctx.config, &ctx.registry, &options)?;
    for path in &collected {
        println!("{path}");
    }

    if let Some(root) = &ctx.config.root {
        let verb = if dry_run { "Would collect" } else { "Collected" };
        println!("{verb} {} file(s) into {}.", collected.len(), root.display());
    }
    Ok(())
}
