//! Difficulty resolvers
//!
//! The organizer asks a [`DifficultyResolver`] for each entry's difficulty and
//! does not care where the answer comes from. Two sources exist: the README
//! snippet bundled with each solution folder, and an external lookup tool
//! queried by problem slug.

use crate::difficulty::Difficulty;
use crate::entry::ProblemEntry;
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::fs;
use std::process::{Command, Stdio};
use tracing::debug;

/// Capability of deriving a difficulty for a problem entry
///
/// `Ok(None)` means the difficulty is unknown, which is a normal outcome.
/// `Err` is reserved for failures worth reporting (e.g. an unreadable snippet).
pub trait DifficultyResolver {
    fn resolve(&self, entry: &ProblemEntry) -> Result<Option<Difficulty>>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}

/// Ordered difficulty patterns tried against a snippet; first match wins
const SNIPPET_PATTERNS: [&str; 4] = [
    // <img src='...' alt='Difficulty: Medium' />
    r#"(?i)alt=['"]Difficulty:\s*(Easy|Medium|Hard)['"]"#,
    // plain badge text
    r"(?i)Difficulty:\s*(Easy|Medium|Hard)",
    // alt text without the prefix
    r#"(?i)alt=['"](Easy|Medium|Hard)['"]"#,
    // ## Difficulty: Medium
    r"(?i)#+\s*Difficulty:\s*(Easy|Medium|Hard)",
];

/// Extracts difficulty markers from short text snippets
pub struct SnippetMatcher {
    patterns: Vec<Regex>,
    scan_lines: usize,
}

impl SnippetMatcher {
    pub fn new(scan_lines: usize) -> Result<Self> {
        let patterns = SNIPPET_PATTERNS
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid difficulty pattern {}", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            scan_lines,
        })
    }

    /// Look for a difficulty marker in the first `scan_lines` lines of `text`
    pub fn extract(&self, text: &str) -> Option<Difficulty> {
        let head: String = text
            .split_inclusive('\n')
            .take(self.scan_lines)
            .collect();

        self.patterns.iter().find_map(|re| {
            re.captures(&head)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
    }
}

/// Reads the README snippet inside a solution directory
pub struct ReadmeResolver {
    readme_name: String,
    matcher: SnippetMatcher,
}

impl ReadmeResolver {
    pub fn new(readme_name: impl Into<String>, scan_lines: usize) -> Result<Self> {
        Ok(Self {
            readme_name: readme_name.into(),
            matcher: SnippetMatcher::new(scan_lines)?,
        })
    }
}

impl DifficultyResolver for ReadmeResolver {
    fn resolve(&self, entry: &ProblemEntry) -> Result<Option<Difficulty>> {
        if !entry.is_dir() {
            return Ok(None);
        }

        let readme_path = entry.path.join(&self.readme_name);
        if !readme_path.exists() {
            debug!(entry = %entry.name, "no {} found", self.readme_name);
            return Ok(None);
        }

        let bytes = fs::read(&readme_path)
            .with_context(|| format!("Error reading {}", readme_path.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(self.matcher.extract(&content))
    }

    fn name(&self) -> &'static str {
        "readme"
    }
}

/// Queries an external tool, e.g. `leetcode show <slug>`
pub struct CommandResolver {
    program: String,
    args: Vec<String>,
}

impl CommandResolver {
    /// Build from a whitespace separated command line; the slug is appended last
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("Lookup command is empty");
        };
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Parse the first line mentioning `Difficulty` as `...: <level>`
    pub fn parse_output(output: &str) -> Option<Difficulty> {
        let line = output.lines().find(|l| l.contains("Difficulty"))?;
        let (_, value) = line.split_once(':')?;
        value.parse().ok()
    }
}

impl DifficultyResolver for CommandResolver {
    fn resolve(&self, entry: &ProblemEntry) -> Result<Option<Difficulty>> {
        let output = match Command::new(&self.program)
            .args(&self.args)
            .arg(&entry.slug)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!(entry = %entry.name, "lookup command failed to start: {}", e);
                return Ok(None);
            }
        };

        if !output.status.success() {
            debug!(entry = %entry.name, status = %output.status, "lookup command failed");
            return Ok(None);
        }

        Ok(Self::parse_output(&String::from_utf8_lossy(&output.stdout)))
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
