//! Common test utilities for integration tests

#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use solved_archive::ArchiveConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway archive with the default layout
pub struct TestArchive {
    pub dir: TempDir,
}

impl TestArchive {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn leetcode(&self) -> PathBuf {
        self.root().join("leetcode")
    }

    pub fn config(&self) -> ArchiveConfig {
        ArchiveConfig::new(self.root())
    }

    /// Write a file (creating parent directories) relative to the archive root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Create `leetcode/<name>/` with a solution and a README carrying `difficulty`
    pub fn leetcode_problem(&self, name: &str, difficulty: &str) -> PathBuf {
        self.write(
            &format!("leetcode/{}/README.md", name),
            &format!(
                "<h2><a href=\"https://leetcode.com/problems/{0}\">{0}</a></h2> <img src='https://img.shields.io/badge/Difficulty-{1}-orange' alt='Difficulty: {1}' /><hr>\n<p>Statement</p>\n",
                name, difficulty
            ),
        );
        self.write(&format!("leetcode/{}/{}.cpp", name, name), "class Solution {};\n");
        self.leetcode().join(name)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }
}

/// Names of the direct children of `dir`, sorted
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// git リポジトリの初期化
pub fn init_repo(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    repo
}

/// Stage everything and create a commit with a fixed timestamp
pub fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    // Use a fixed time for signature to avoid CI issues
    let time = Time::new(1_700_000_000, 0);
    let signature = Signature::new("Test User", "test@example.com", &time).unwrap();

    let parent = repo
        .head()
        .ok()
        .and_then(|h| h.target())
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
    .unwrap();
}

/// Paths recorded in the index, sorted
pub fn index_paths(repo: &Repository) -> Vec<String> {
    let mut index = repo.index().unwrap();
    index.read(true).unwrap();
    let mut paths: Vec<String> = index
        .iter()
        .map(|e| String::from_utf8_lossy(&e.path).into_owned())
        .collect();
    paths.sort();
    paths
}
