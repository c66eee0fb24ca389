//! List command handler.

use anyhow::Result;

use staticfind_core::{CollectorOptions, visible_files};

use crate::bootstrap::CliContext;

/// Print every logical path visible through the finder chain,
/// deduplicated in finder order.
pub fn execute(ctx: &CliContext, ignore: Vec<String>, no_default_ignore: bool) -> Result<()> {
    let options = CollectorOptions {
        ignore_patterns: ignore,
        use_default_ignore: !no_default_ignore,
        dry_run: false,
    };
    let ignore = options.ignore()?;
    for path in visible_files(&ctx.registry, &ignore)? {
        println!("{path}");
    }
    Ok(())
}
