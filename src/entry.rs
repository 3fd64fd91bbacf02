use crate::config::ArchiveConfig;
use crate::difficulty::Difficulty;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One solved problem: a solution directory or a single solution file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemEntry {
    /// File or directory name as found on disk
    pub name: String,
    /// Problem slug (the name without its solution extension)
    pub slug: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl ProblemEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// The bucket this entry currently lives in, if its parent directory is one
    pub fn current_bucket(&self) -> Option<Difficulty> {
        self.path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .and_then(|n| n.parse().ok())
    }
}

/// Direct children of `root` that look like problem entries, sorted by name
///
/// Bucket directories and excluded names are not returned. Plain files are
/// only returned when they carry a solution extension.
pub fn discover_entries(root: &Path, config: &ArchiveConfig) -> Result<Vec<ProblemEntry>> {
    let mut entries = Vec::new();

    let read_dir =
        fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))?;

    for item in read_dir {
        let item = item.with_context(|| format!("Failed to list {}", root.display()))?;
        let name = item.file_name().to_string_lossy().into_owned();
        if config.is_excluded(&name) || Difficulty::is_bucket_name(&name) {
            continue;
        }

        let path = item.path();
        let file_type = item.file_type()?;
        if file_type.is_dir() {
            entries.push(ProblemEntry {
                slug: name.clone(),
                name,
                path,
                kind: EntryKind::Dir,
            });
        } else if file_type.is_file() && config.is_solution_file(&path) {
            entries.push(ProblemEntry {
                slug: config.slug_of(&name),
                name,
                path,
                kind: EntryKind::File,
            });
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
