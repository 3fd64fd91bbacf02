//! Solved-problem statistics
//!
//! Counts are recomputed from the directory tree on every call.

use crate::config::{ArchiveConfig, Platform};
use crate::difficulty::Difficulty;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Category key -> count
pub type StatsTable = BTreeMap<String, usize>;

/// Unique problems of one bucketed platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    /// Problems still sitting at the platform root
    pub unbucketed: usize,
    pub total: usize,
}

impl DifficultyBreakdown {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn set(&mut self, difficulty: Difficulty, count: usize) {
        match difficulty {
            Difficulty::Easy => self.easy = count,
            Difficulty::Medium => self.medium = count,
            Difficulty::Hard => self.hard = count,
        }
    }
}

/// Solution files below `dir`, walking the whole tree
///
/// Unreadable subtrees are logged and left out. A missing directory yields nothing.
fn solution_files<'a>(
    dir: &'a Path,
    config: &'a ArchiveConfig,
) -> impl Iterator<Item = walkdir::DirEntry> + 'a {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                // The root not existing is the common "platform not started yet" case
                if e.depth() > 0 {
                    warn!("Skipping unreadable path under {}: {}", dir.display(), e);
                }
                None
            }
        })
        .filter(move |entry| entry.file_type().is_file() && config.is_solution_file(entry.path()))
}

/// Recursive count of solution files under `dir`
pub fn count_solution_files(dir: &Path, config: &ArchiveConfig) -> usize {
    solution_files(dir, config).count()
}

/// Solution files under `dir` grouped by last-modification month (`YYYY-MM`, local time)
pub fn count_by_month(dir: &Path, config: &ArchiveConfig) -> StatsTable {
    let mut monthly = StatsTable::new();
    for entry in solution_files(dir, config) {
        let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
            warn!("Skipping {} (no modification time)", entry.path().display());
            continue;
        };
        let month = DateTime::<Local>::from(modified).format("%Y-%m").to_string();
        *monthly.entry(month).or_insert(0) += 1;
    }
    monthly
}

/// Unique problems per difficulty bucket plus those not yet bucketed
///
/// Inside a bucket, a solution file directly in the bucket counts by its stem
/// and a deeper file counts by its top-level folder. At the root, solution
/// files count by stem and directories count when they contain at least one
/// solution file.
pub fn count_by_difficulty(root: &Path, config: &ArchiveConfig) -> Result<DifficultyBreakdown> {
    let mut breakdown = DifficultyBreakdown::default();
    if !root.is_dir() {
        return Ok(breakdown);
    }

    for difficulty in Difficulty::ALL {
        let bucket = root.join(difficulty.as_str());
        let mut problems = BTreeSet::new();
        for entry in solution_files(&bucket, config) {
            let Ok(relative) = entry.path().strip_prefix(&bucket) else {
                continue;
            };
            let mut components = relative.components();
            let first = components.next();
            let problem = if components.next().is_none() {
                // Direct file in the bucket
                relative
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            } else {
                first.map(|c| c.as_os_str().to_string_lossy().into_owned())
            };
            if let Some(problem) = problem {
                problems.insert(problem);
            }
        }
        breakdown.set(difficulty, problems.len());
    }

    let mut root_problems = BTreeSet::new();
    for item in fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))? {
        let item = item?;
        let name = item.file_name().to_string_lossy().into_owned();
        if config.is_excluded(&name) || Difficulty::is_bucket_name(&name) {
            continue;
        }

        let path = item.path();
        if path.is_file() && config.is_solution_file(&path) {
            root_problems.insert(config.slug_of(&name));
        } else if path.is_dir() && solution_files(&path, config).next().is_some() {
            root_problems.insert(name);
        }
    }
    breakdown.unbucketed = root_problems.len();

    breakdown.total = breakdown.easy + breakdown.medium + breakdown.hard + breakdown.unbucketed;
    Ok(breakdown)
}

/// Counts for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub key: String,
    pub name: String,
    pub total: usize,
    /// Present for bucketed platforms
    pub breakdown: Option<DifficultyBreakdown>,
}

/// Count every configured platform
pub fn collect_platform_stats(config: &ArchiveConfig) -> Result<Vec<PlatformStats>> {
    config
        .platforms
        .iter()
        .map(|platform| platform_stats(platform, config))
        .collect()
}

fn platform_stats(platform: &Platform, config: &ArchiveConfig) -> Result<PlatformStats> {
    let dir = config.platform_dir(platform);
    let (total, breakdown) = if platform.bucketed {
        let breakdown = count_by_difficulty(&dir, config)?;
        (breakdown.total, Some(breakdown))
    } else {
        (count_solution_files(&dir, config), None)
    };

    Ok(PlatformStats {
        key: platform.key.clone(),
        name: platform.name.clone(),
        total,
        breakdown,
    })
}

/// Flatten platform stats into badge keys
///
/// Produces `<key>_total` for each platform, `<key>_easy` / `_medium` / `_hard`
/// for bucketed ones, and `overall_total`. The overall count covers LeetCode
/// and Codeforces, which are the platforms the main README advertises.
pub fn stats_table(stats: &[PlatformStats]) -> StatsTable {
    let mut table = StatsTable::new();
    for platform in stats {
        table.insert(format!("{}_total", platform.key), platform.total);
        if let Some(breakdown) = &platform.breakdown {
            for difficulty in Difficulty::ALL {
                table.insert(
                    format!("{}_{}", platform.key, difficulty),
                    breakdown.get(difficulty),
                );
            }
        }
    }

    let overall = ["leetcode", "codeforces"]
        .iter()
        .filter_map(|key| table.get(&format!("{}_total", key)))
        .sum::<usize>();
    table.insert("overall_total".to_string(), overall);
    table
}

/// Write the platform -> file count snapshot as JSON
pub fn write_snapshot(path: &Path, config: &ArchiveConfig) -> Result<StatsTable> {
    let snapshot: StatsTable = config
        .platforms
        .iter()
        .map(|p| (p.key.clone(), count_solution_files(&config.platform_dir(p), config)))
        .collect();

    let content = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(snapshot)
}
