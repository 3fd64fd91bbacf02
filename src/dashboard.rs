//! Monthly progress dashboard

use crate::config::ArchiveConfig;
use crate::stats::{StatsTable, count_by_month};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Monthly counts of one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMonths {
    pub name: String,
    pub months: StatsTable,
}

/// Count every configured platform by month
pub fn collect_monthly(config: &ArchiveConfig) -> Vec<PlatformMonths> {
    config
        .platforms
        .iter()
        .map(|platform| PlatformMonths {
            name: platform.name.clone(),
            months: count_by_month(&config.platform_dir(platform), config),
        })
        .collect()
}

/// Sum of all platforms per month
pub fn overall(platforms: &[PlatformMonths]) -> StatsTable {
    let mut total = StatsTable::new();
    for platform in platforms {
        for (month, count) in &platform.months {
            *total.entry(month.clone()).or_insert(0) += count;
        }
    }
    total
}

fn push_months(lines: &mut Vec<String>, months: &StatsTable) {
    for (month, count) in months {
        lines.push(format!("- **{}**: {} problems", month, count));
    }
}

/// Render the dashboard as Markdown
pub fn render(platforms: &[PlatformMonths], today: NaiveDate) -> String {
    let mut lines = vec![
        "# 📊 DSA Monthly Progress Dashboard\n".to_string(),
        format!("_Auto-updated on {}_\n", today.format("%d %b %Y")),
    ];

    for platform in platforms {
        lines.push(format!("## {}\n", platform.name));
        push_months(&mut lines, &platform.months);
        lines.push(String::new());
    }

    lines.push("## 📈 Overall Monthly Progress\n".to_string());
    push_months(&mut lines, &overall(platforms));

    lines.join("\n")
}

/// Render and write the dashboard to `path`
pub fn write_dashboard(path: &Path, platforms: &[PlatformMonths], today: NaiveDate) -> Result<()> {
    fs::write(path, render(platforms, today))
        .with_context(|| format!("Failed to write {}", path.display()))
}
