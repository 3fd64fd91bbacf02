//! Archive configuration
//!
//! Every path the tools touch is derived from an [`ArchiveConfig`] that is
//! passed explicitly into each operation. The defaults describe the usual
//! layout (`leetcode/`, `codeforces/`, `geeksforgeeks/` next to a top-level
//! `README.md`); an optional TOML file can override any field.

use crate::badges::{BadgeSpec, default_badge_specs};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What the organizer does when the destination bucket already holds an
/// entry with the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Leave the root-level entry where it is
    Skip,
    /// Remove same-named entries from every bucket, then move (keeps the latest solution)
    #[default]
    Replace,
}

/// One judge platform inside the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Short key used for stats lookups (e.g. "leetcode")
    pub key: String,
    /// Human readable name (e.g. "LeetCode")
    pub name: String,
    /// Directory relative to the archive root
    pub dir: PathBuf,
    /// Whether solutions are sorted into difficulty buckets
    #[serde(default)]
    pub bucketed: bool,
}

impl Platform {
    fn new(key: &str, name: &str, bucketed: bool) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            dir: PathBuf::from(key),
            bucketed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Archive root; always taken from the command line
    #[serde(skip)]
    pub root: PathBuf,
    pub platforms: Vec<Platform>,
    /// Solution file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Per-problem metadata snippet file name
    pub readme_name: String,
    /// Number of leading snippet lines searched for a difficulty marker
    pub scan_lines: usize,
    pub duplicate_policy: DuplicatePolicy,
    /// External lookup command; the problem slug is appended as the last argument
    pub lookup_command: String,
    /// Root-level names the organizer never treats as problems
    pub excluded: Vec<String>,
    /// Built-in badges followed by the configuration file's extra ones
    #[serde(skip)]
    pub badges: Vec<BadgeSpec>,
    /// Extra badges from the `[[badges]]` tables of the configuration file
    #[serde(rename = "badges")]
    pub extra_badges: Vec<BadgeSpec>,
    pub dashboard_path: PathBuf,
    pub stats_path: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            platforms: vec![
                Platform::new("leetcode", "LeetCode", true),
                Platform::new("codeforces", "Codeforces", false),
                Platform::new("geeksforgeeks", "GeeksforGeeks", false),
            ],
            extensions: vec!["cpp".to_string(), "py".to_string(), "java".to_string()],
            readme_name: "README.md".to_string(),
            scan_lines: 5,
            duplicate_policy: DuplicatePolicy::default(),
            lookup_command: "leetcode show".to_string(),
            excluded: vec![
                ".git".to_string(),
                "__pycache__".to_string(),
                "README.md".to_string(),
            ],
            badges: default_badge_specs(),
            extra_badges: Vec::new(),
            dashboard_path: PathBuf::from("dashboard.md"),
            stats_path: PathBuf::from("stats.json"),
        }
    }
}

impl ArchiveConfig {
    /// Create the default configuration for an archive rooted at `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load configuration for `root`, applying overrides from a TOML file when given
    ///
    /// An explicitly requested file that does not exist is an error.
    pub fn load(root: impl AsRef<Path>, config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str::<ArchiveConfig>(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.root = root.as_ref().to_path_buf();
        let extra = config.extra_badges.clone();
        config.badges.extend(extra);
        Ok(config)
    }

    pub fn platform(&self, key: &str) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// Absolute-or-relative directory of a platform inside the archive
    pub fn platform_dir(&self, platform: &Platform) -> PathBuf {
        self.root.join(&platform.dir)
    }

    /// Resolve a document path given relative to the archive root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn is_solution_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded.iter().any(|e| e == name)
    }

    /// Strip a recognized solution extension from a file name
    pub fn slug_of(&self, file_name: &str) -> String {
        for ext in &self.extensions {
            if let Some(stem) = file_name.strip_suffix(&format!(".{}", ext)) {
                return stem.to_string();
            }
        }
        file_name.to_string()
    }
}
