//! README badge update handler

use crate::badges::{self, DocumentOutcome};
use crate::config::ArchiveConfig;
use crate::formatting;
use crate::stats;
use anyhow::Result;
use std::path::PathBuf;

/// Recount every platform and rewrite the README badges
pub fn handle_update_readmes(config: &ArchiveConfig) -> Result<Vec<(PathBuf, DocumentOutcome)>> {
    println!("Counting problems from all platforms...\n");
    let platform_stats = stats::collect_platform_stats(config)?;
    println!("{}\n", formatting::format_platform_stats(&platform_stats));

    let table = stats::stats_table(&platform_stats);
    let outcomes = badges::update_readmes(config, &table)?;
    println!("Updating README files...\n{}", formatting::format_readme_outcomes(&outcomes));

    let updated = outcomes
        .iter()
        .any(|(_, outcome)| matches!(outcome, DocumentOutcome::Updated { .. }));
    if updated {
        println!("\nREADME files updated successfully!");
    } else {
        println!("\nNo changes needed. Statistics are already up to date.");
    }
    Ok(outcomes)
}
