//! Stats handler

use crate::config::ArchiveConfig;
use crate::dashboard;
use crate::formatting;
use crate::stats::{self, PlatformStats};
use anyhow::Result;

/// Print per-platform counts, optionally by month, optionally writing `stats.json`
pub fn handle_stats(config: &ArchiveConfig, by_month: bool, json: bool) -> Result<Vec<PlatformStats>> {
    let platform_stats = stats::collect_platform_stats(config)?;
    println!("{}", formatting::format_platform_stats(&platform_stats));

    if by_month {
        let monthly = dashboard::collect_monthly(config);
        println!("\n{}", formatting::format_monthly(&monthly));
    }

    if json {
        let path = config.resolve(&config.stats_path);
        stats::write_snapshot(&path, config)?;
        println!("\nWrote {}", path.display());
    }

    Ok(platform_stats)
}
