//! Solved Archive Library
//!
//! Maintenance tools for a personal archive of solved coding-practice problems
//! (LeetCode, Codeforces, GeeksforGeeks).
//!
//! # Architecture
//!
//! Two independent components, both driven by an explicit [`ArchiveConfig`]:
//! - **Problem Organizer**: [`Organizer`] sorts root-level problem entries of a
//!   platform directory into `easy/`, `medium/` and `hard/` buckets. The
//!   difficulty comes from a [`DifficultyResolver`] ([`ReadmeResolver`] or
//!   [`CommandResolver`]). Inside a git work tree the moves are staged too.
//! - **Stats Reporter**: the [`stats`] module counts solutions per platform,
//!   bucket and month; [`badges`] rewrites counts embedded in README files and
//!   [`dashboard`] renders the monthly progress page.
//!
//! # Example
//!
//! ```no_run
//! use solved_archive::{ArchiveConfig, OrganizeOptions, Organizer, ReadmeResolver};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = ArchiveConfig::new(".");
//!     let resolver = ReadmeResolver::new(&config.readme_name, config.scan_lines)?;
//!     let organizer = Organizer::new(
//!         "leetcode",
//!         &config,
//!         Box::new(resolver),
//!         OrganizeOptions::default(),
//!     );
//!     let report = organizer.organize()?;
//!     println!("moved {}", report.total_moved());
//!     Ok(())
//! }
//! ```

pub mod badges;
pub mod config;
pub mod dashboard;
pub mod difficulty;
pub mod entry;
pub mod formatting;
mod git_ops;
pub mod handlers;
pub mod organizer;
pub mod resolver;
pub mod stats;

// Re-export commonly used types
pub use config::{ArchiveConfig, DuplicatePolicy, Platform};
pub use difficulty::Difficulty;
pub use entry::{EntryKind, ProblemEntry};
pub use git_ops::GitOps;
pub use organizer::{OrganizeOptions, OrganizeReport, Organizer};
pub use resolver::{CommandResolver, DifficultyResolver, ReadmeResolver, SnippetMatcher};
pub use stats::{DifficultyBreakdown, PlatformStats, StatsTable};
