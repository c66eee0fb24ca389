//! Find command handler.
//!
//! Resolves each requested logical path through the finder chain and
//! prints the matching absolute paths, or a per-path diagnostic when
//! nothing matched.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Execute the find command.
///
/// Returns whether at least one of the requested paths matched; the caller
/// turns an all-miss run into a non-zero exit code.
pub fn execute(ctx: &CliContext, paths: &[String], first: bool) -> Result<bool> {
    let mut found_any = false;
    for path in paths {
        let matches = if first {
            ctx.registry.find(path).into_iter().collect()
        } else {
            ctx.registry.find_all(path)
        };
        if matches.is_empty() {
            tracing::warn!("No matching file found for {path:?}.");
            continue;
        }
        found_any = true;
        println!("Found {path:?} here:\n{}", format_matches(&matches));
    }
    Ok(found_any)
}

/// One canonicalized match per line, indented under the heading.
fn format_matches(matches: &[PathBuf]) -> String {
    matches
        .iter()
        .map(|m| {
            let resolved = fs::canonicalize(m).unwrap_or_else(|_| m.clone());
            format!("  {}", resolved.display())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
