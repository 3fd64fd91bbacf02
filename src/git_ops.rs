use anyhow::{Context, Result};
use git2::{Index, Repository, Signature, Time};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Git index bookkeeping for relocated problem entries
///
/// When the archive lives in a git work tree, moves and removals are mirrored
/// in the index so history follows the files. Outside a repository every
/// operation is a no-op.
pub struct GitOps {
    repo: Option<Repository>,
    workdir: Option<PathBuf>,
}

impl GitOps {
    /// Create a new GitOps instance by detecting if the path is in a git repository
    pub fn new(path: &Path) -> Self {
        let dir = if path.is_file() {
            path.parent().unwrap_or(path).to_path_buf()
        } else {
            path.to_path_buf()
        };

        let repo = Self::find_repository(&dir);
        let workdir = repo
            .as_ref()
            .and_then(|r| r.workdir())
            .and_then(|w| w.canonicalize().ok());
        Self { repo, workdir }
    }

    /// Check if the archive is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some() && self.workdir.is_some()
    }

    /// Find the git repository containing the given path
    fn find_repository(dir: &Path) -> Option<Repository> {
        Repository::discover(dir).ok()
    }

    /// Path relative to the work tree; works for paths that no longer exist
    /// as long as their parent does
    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self
            .workdir
            .as_ref()
            .context("Repository has no working directory")?;

        let absolute = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                let parent = path.parent().context("Path has no parent")?;
                let name = path.file_name().context("Path has no file name")?;
                parent
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve {}", parent.display()))?
                    .join(name)
            }
        };

        absolute
            .strip_prefix(workdir)
            .map(Path::to_path_buf)
            .context("Path is not in repository")
    }

    /// Index-style key: forward slashes, no trailing separator
    fn index_key(relative: &Path) -> String {
        relative.to_string_lossy().replace('\\', "/")
    }

    /// Returns the work-tree relative path of `path` if anything at or below it is tracked
    pub fn tracked_path(&self, path: &Path) -> Result<Option<PathBuf>> {
        let Some(repo) = &self.repo else {
            return Ok(None);
        };
        if self.workdir.is_none() {
            return Ok(None);
        }

        let relative = self.relative_path(path)?;
        let key = Self::index_key(&relative);
        let dir_prefix = format!("{}/", key);

        let index = repo.index().context("Failed to open index")?;
        let tracked = index.iter().any(|entry| {
            let entry_path = String::from_utf8_lossy(&entry.path);
            entry_path == key || entry_path.starts_with(&dir_prefix)
        });

        Ok(tracked.then_some(relative))
    }

    /// Record `old_relative` -> `new_path` in the index (the effect of `git mv`)
    ///
    /// Paths are taken literally; names such as `q[1]` are never globs.
    pub fn stage_move(&self, old_relative: &Path, new_path: &Path) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };

        let new_relative = self.relative_path(new_path)?;

        let mut index = repo.index()?;
        Self::unstage(&mut index, old_relative).context("Failed to unstage old path")?;
        self.stage_tree(repo, &mut index, new_path, &new_relative)
            .context("Failed to stage new path")?;
        index.write()?;
        Ok(())
    }

    /// Drop a removed path from the index (the effect of `git rm -r`)
    pub fn stage_removal(&self, old_relative: &Path) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };

        let mut index = repo.index()?;
        Self::unstage(&mut index, old_relative).context("Failed to unstage removed path")?;
        index.write()?;
        Ok(())
    }

    /// Remove the exact entry `relative`, or every entry below it
    fn unstage(index: &mut Index, relative: &Path) -> Result<()> {
        let key = PathBuf::from(Self::index_key(relative));
        index.remove_path(&key)?;
        index.remove_dir(&key, 0)?;
        Ok(())
    }

    /// Add every non-ignored file at or below `path`
    fn stage_tree(
        &self,
        repo: &Repository,
        index: &mut Index,
        path: &Path,
        relative: &Path,
    ) -> Result<()> {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let file = match entry.path().strip_prefix(path) {
                Ok(rest) if rest.as_os_str().is_empty() => relative.to_path_buf(),
                Ok(rest) => relative.join(rest),
                Err(_) => continue,
            };
            let file = PathBuf::from(Self::index_key(&file));
            if repo.is_path_ignored(&file)? {
                continue;
            }
            index
                .add_path(&file)
                .with_context(|| format!("Failed to stage {}", file.display()))?;
        }
        Ok(())
    }

    /// Commit the current index
    ///
    /// Returns `Ok(false)` without committing when the index matches HEAD.
    pub fn commit(&self, message: &str) -> Result<bool> {
        let Some(repo) = &self.repo else {
            return Ok(false);
        };

        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        // Get the current HEAD commit
        let parent_commit = match repo.head() {
            Ok(head) => {
                let oid = head.target().context("HEAD has no target")?;
                Some(repo.find_commit(oid)?)
            }
            Err(_) => None, // Initial commit
        };

        if parent_commit
            .as_ref()
            .is_some_and(|parent| parent.tree_id() == tree_id)
        {
            return Ok(false);
        }

        let signature = Self::get_signature(repo)?;
        let parents: Vec<_> = parent_commit.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(true)
    }

    /// Get or create a git signature for commits
    fn get_signature(repo: &Repository) -> Result<Signature<'_>> {
        let config = repo.config()?;

        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "solved-archive".to_string());

        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "solved-archive@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            Err(_) => {
                // Fallback to a fixed time if now() fails (e.g., on some CI systems)
                let time = Time::new(1_700_000_000, 0);
                Signature::new(&name, &email, &time)
                    .context("Failed to create signature with fixed time")
            }
        }
    }
}
