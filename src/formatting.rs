//! Plain-text run summaries printed on stdout

use crate::badges::DocumentOutcome;
use crate::dashboard::PlatformMonths;
use crate::difficulty::Difficulty;
use crate::organizer::OrganizeReport;
use crate::stats::PlatformStats;
use std::fmt::Write;
use std::path::PathBuf;

/// Summary block for an organizer run
pub fn format_organize_summary(report: &OrganizeReport) -> String {
    let mut out = String::from("Summary:\n");
    for difficulty in Difficulty::ALL {
        let _ = writeln!(
            out,
            "  {}: {}",
            difficulty.display_name(),
            report.moved(difficulty)
        );
    }
    if report.replaced > 0 {
        let _ = writeln!(out, "  Replaced: {}", report.replaced);
    }
    let _ = writeln!(out, "  Skipped: {}", report.skipped);
    let _ = write!(out, "  Errors: {}", report.errors);
    out
}

/// Per-platform totals, with difficulty breakdown where available
pub fn format_platform_stats(stats: &[PlatformStats]) -> String {
    let mut out = String::from("Statistics:\n");
    let mut total = 0;
    for platform in stats {
        total += platform.total;
        match &platform.breakdown {
            Some(b) => {
                let _ = write!(
                    out,
                    "  {}: {} total ({} easy, {} medium, {} hard",
                    platform.name, platform.total, b.easy, b.medium, b.hard
                );
                if b.unbucketed > 0 {
                    let _ = write!(out, ", {} unsorted", b.unbucketed);
                }
                out.push_str(")\n");
            }
            None => {
                let _ = writeln!(out, "  {}: {}", platform.name, platform.total);
            }
        }
    }
    let _ = write!(out, "  Total (all platforms): {}", total);
    out
}

pub fn format_monthly(platforms: &[PlatformMonths]) -> String {
    let mut out = String::new();
    for platform in platforms {
        let _ = writeln!(out, "{}:", platform.name);
        if platform.months.is_empty() {
            out.push_str("  (no solutions)\n");
        }
        for (month, count) in &platform.months {
            let _ = writeln!(out, "  {}: {}", month, count);
        }
    }
    out.trim_end().to_string()
}

pub fn format_readme_outcomes(outcomes: &[(PathBuf, DocumentOutcome)]) -> String {
    outcomes
        .iter()
        .map(|(path, outcome)| {
            let status = match outcome {
                DocumentOutcome::Missing => "not found, skipped".to_string(),
                DocumentOutcome::Unchanged => "already up to date".to_string(),
                DocumentOutcome::Updated { replacements } => {
                    format!("updated ({} counts)", replacements)
                }
                DocumentOutcome::Failed(e) => format!("failed: {}", e),
            };
            format!("  {}: {}", path.display(), status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
