//! Problem organizer
//!
//! Moves root-level problem entries of a platform directory into
//! difficulty buckets (`easy/`, `medium/`, `hard/`).

use crate::config::{ArchiveConfig, DuplicatePolicy};
use crate::difficulty::Difficulty;
use crate::entry::{ProblemEntry, discover_entries};
use crate::git_ops::GitOps;
use crate::resolver::DifficultyResolver;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Per-run options that are not part of the archive layout
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    pub policy: DuplicatePolicy,
    /// Resolve and report without touching the filesystem
    pub dry_run: bool,
}

/// Counters for one organizer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizeReport {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub skipped: usize,
    /// Same-named entries removed from buckets before a move
    pub replaced: usize,
    pub errors: usize,
    /// True when the filesystem was modified
    pub changed: bool,
}

impl OrganizeReport {
    pub fn moved(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total_moved(&self) -> usize {
        self.easy + self.medium + self.hard
    }

    fn record_move(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }
}

pub struct Organizer<'a> {
    root: PathBuf,
    config: &'a ArchiveConfig,
    resolver: Box<dyn DifficultyResolver + 'a>,
    git: GitOps,
    options: OrganizeOptions,
}

impl<'a> Organizer<'a> {
    /// Create an organizer for the platform directory `root`
    pub fn new(
        root: impl AsRef<Path>,
        config: &'a ArchiveConfig,
        resolver: Box<dyn DifficultyResolver + 'a>,
        options: OrganizeOptions,
    ) -> Self {
        let root = root.as_ref().to_path_buf();
        let git = GitOps::new(&root);
        if git.is_git_managed() {
            debug!(root = %root.display(), "git work tree detected, moves will be staged");
        }
        Self {
            root,
            config,
            resolver,
            git,
            options,
        }
    }

    pub fn bucket_dir(&self, difficulty: Difficulty) -> PathBuf {
        self.root.join(difficulty.as_str())
    }

    /// Run one pass over the root directory
    pub fn organize(&self) -> Result<OrganizeReport> {
        if !self.root.is_dir() {
            bail!("Directory {} does not exist!", self.root.display());
        }

        let mut report = OrganizeReport::default();

        // Pointed at a bucket itself: everything below is already organized
        if let Some(bucket) = self.root_bucket() {
            report.skipped += self.count_children(&self.root)?;
            info!(
                "{} is already the {} bucket, nothing to organize",
                self.root.display(),
                bucket
            );
            return Ok(report);
        }

        if !self.options.dry_run {
            for difficulty in Difficulty::ALL {
                let dir = self.bucket_dir(difficulty);
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }

        for difficulty in Difficulty::ALL {
            let organized = self.count_children(&self.bucket_dir(difficulty))?;
            if organized > 0 {
                debug!("Skipping {} entries already in {}/", organized, difficulty);
            }
            report.skipped += organized;
        }

        let entries = discover_entries(&self.root, self.config)?;
        let folders = entries.iter().filter(|e| e.is_dir()).count();
        info!(
            "Found {} problem folders and {} problem files to process (resolver: {})",
            folders,
            entries.len() - folders,
            self.resolver.name()
        );

        for entry in &entries {
            self.process(entry, &mut report);
        }

        Ok(report)
    }

    /// Commit staged moves when the archive is a git work tree
    pub fn commit(&self, report: &OrganizeReport) -> Result<bool> {
        if !report.changed || !self.git.is_git_managed() {
            return Ok(false);
        }
        let message = format!(
            "Organize problems by difficulty ({} easy, {} medium, {} hard)",
            report.easy, report.medium, report.hard
        );
        self.git.commit(&message)
    }

    fn root_bucket(&self) -> Option<Difficulty> {
        self.root
            .canonicalize()
            .ok()?
            .file_name()?
            .to_str()?
            .parse()
            .ok()
    }

    fn count_children(&self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Ok(0);
        }
        let mut count = 0;
        for item in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
            let item = item?;
            if !self.config.is_excluded(&item.file_name().to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn process(&self, entry: &ProblemEntry, report: &mut OrganizeReport) {
        let difficulty = match self.resolver.resolve(entry) {
            Ok(Some(difficulty)) => difficulty,
            Ok(None) => {
                warn!("Skipping {} (could not determine difficulty)", entry.name);
                report.skipped += 1;
                return;
            }
            Err(e) => {
                warn!("Skipping {} ({:#})", entry.name, e);
                report.skipped += 1;
                return;
            }
        };

        let target = self.bucket_dir(difficulty).join(&entry.name);

        match self.options.policy {
            DuplicatePolicy::Skip => {
                if exists(&target) {
                    info!("Skipping {} (already present in {}/)", entry.name, difficulty);
                    report.skipped += 1;
                    return;
                }
            }
            DuplicatePolicy::Replace => {
                for other in Difficulty::ALL {
                    let existing = self.bucket_dir(other).join(&entry.name);
                    if !exists(&existing) {
                        continue;
                    }
                    info!("Removing previous {} from {}/", entry.name, other);
                    if self.options.dry_run {
                        report.replaced += 1;
                        continue;
                    }
                    match self.remove_existing(&existing) {
                        Ok(()) => {
                            report.replaced += 1;
                            report.changed = true;
                        }
                        Err(e) => warn!("Could not remove {}: {:#}", existing.display(), e),
                    }
                }
            }
        }

        if self.options.dry_run {
            info!("Would move {} -> {}/", entry.name, difficulty);
            report.record_move(difficulty);
            return;
        }

        match self.relocate(entry, &target) {
            Ok(()) => {
                info!("Moved {} -> {}/", entry.name, difficulty);
                report.record_move(difficulty);
                report.changed = true;
            }
            Err(e) => {
                error!("Error moving {}: {:#}", entry.name, e);
                report.errors += 1;
            }
        }
    }

    fn tracked(&self, path: &Path) -> Option<PathBuf> {
        self.git.tracked_path(path).unwrap_or_else(|e| {
            warn!("Could not inspect git index for {}: {:#}", path.display(), e);
            None
        })
    }

    fn remove_existing(&self, path: &Path) -> Result<()> {
        let tracked = self.tracked(path);

        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }

        if let Some(relative) = tracked {
            if let Err(e) = self.git.stage_removal(&relative) {
                warn!(
                    "Removed {} but could not update the git index: {:#}",
                    path.display(),
                    e
                );
            }
        }
        Ok(())
    }

    fn relocate(&self, entry: &ProblemEntry, target: &Path) -> Result<()> {
        let tracked = self.tracked(&entry.path);

        fs::rename(&entry.path, target).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                entry.path.display(),
                target.display()
            )
        })?;

        if let Some(relative) = tracked {
            if let Err(e) = self.git.stage_move(&relative, target) {
                warn!("Moved {} but could not update the git index: {:#}", entry.name, e);
            }
        }
        Ok(())
    }
}

fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
