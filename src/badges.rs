//! README badge rewriting
//!
//! A badge template is a regular expression whose named capture groups name
//! stats keys. For every match, the text captured by each group is replaced
//! with the current value of that key; the rest of the document is copied
//! through unchanged.

use crate::config::ArchiveConfig;
use crate::stats::StatsTable;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Serializable badge definition, as found in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSpec {
    pub name: String,
    /// Document path relative to the archive root
    pub document: PathBuf,
    /// Regular expression; named groups are stats keys
    pub pattern: String,
}

impl BadgeSpec {
    fn new(name: &str, document: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            document: PathBuf::from(document),
            pattern: pattern.to_string(),
        }
    }
}

/// Badges maintained in the archive's README files
pub fn default_badge_specs() -> Vec<BadgeSpec> {
    vec![
        BadgeSpec::new(
            "leetcode-badge",
            "README.md",
            r"(?i)!\[LeetCode\]\(https://img\.shields\.io/badge/LeetCode-(?P<leetcode_total>\d+)-FFA116[^\]\s)]*\)",
        ),
        BadgeSpec::new(
            "codeforces-badge",
            "README.md",
            r"(?i)!\[Codeforces\]\(https://img\.shields\.io/badge/Codeforces-(?P<codeforces_total>\d+)-1F8ACB[^\]\s)]*\)",
        ),
        BadgeSpec::new(
            "solved-highlight",
            "README.md",
            r"(?i)- ✅ Solved \*\*(?P<overall_total>\d+)\+ DSA problems",
        ),
        BadgeSpec::new(
            "leetcode-solved",
            "leetcode/README.md",
            r"(?i)!\[LeetCode Solved\]\(https://img\.shields\.io/badge/Problems%20Solved-(?P<leetcode_total>\d+)-FFA116[^\]\s)]*\)",
        ),
        BadgeSpec::new(
            "leetcode-breakdown",
            "leetcode/README.md",
            r"(?i)\*\*Current Breakdown:\*\*\s*\n- Easy: (?P<leetcode_easy>\d+)(?: problems)?\s*\n- Medium: (?P<leetcode_medium>\d+)(?: problems)?\s*\n- Hard: (?P<leetcode_hard>\d+)",
        ),
        BadgeSpec::new(
            "codeforces-solved",
            "codeforces/README.md",
            r"(?i)!\[Codeforces Solved\]\(https://img\.shields\.io/badge/Problems%20Solved-(?P<codeforces_total>\d+)-1F8ACB[^\]\s)]*\)",
        ),
    ]
}

/// Compiled badge template
#[derive(Debug, Clone)]
pub struct BadgeTemplate {
    pub name: String,
    pub document: PathBuf,
    regex: Regex,
}

impl BadgeTemplate {
    pub fn compile(spec: &BadgeSpec) -> Result<Self> {
        let regex = Regex::new(&spec.pattern)
            .with_context(|| format!("Invalid pattern for badge '{}'", spec.name))?;
        Ok(Self {
            name: spec.name.clone(),
            document: spec.document.clone(),
            regex,
        })
    }

    /// Stats keys this template fills in
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }

    /// Substitute counts into `content`
    ///
    /// Returns the new text and the number of substituted spans. Groups whose
    /// key is missing from `table` keep their original text.
    pub fn apply(&self, content: &str, table: &StatsTable) -> (String, usize) {
        let mut spans = Vec::new();
        for caps in self.regex.captures_iter(content) {
            for key in self.keys() {
                if let (Some(m), Some(value)) = (caps.name(key), table.get(key)) {
                    spans.push((m.start(), m.end(), value.to_string()));
                }
            }
        }
        if spans.is_empty() {
            return (content.to_string(), 0);
        }

        // Stable sort: for nested groups the outer one (declared first) wins
        spans.sort_by_key(|(start, _, _)| *start);

        let mut output = String::with_capacity(content.len());
        let mut cursor = 0;
        let mut replaced = 0;
        for (start, end, value) in &spans {
            if *start < cursor {
                continue;
            }
            output.push_str(&content[cursor..*start]);
            output.push_str(value);
            cursor = *end;
            replaced += 1;
        }
        output.push_str(&content[cursor..]);

        (output, replaced)
    }
}

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document does not exist
    Missing,
    /// No template matched, or every count was already current
    Unchanged,
    /// The document was rewritten
    Updated { replacements: usize },
    /// Reading or writing failed
    Failed(String),
}

/// Apply `templates` to a single document
pub fn update_document(
    path: &Path,
    templates: &[&BadgeTemplate],
    table: &StatsTable,
) -> Result<DocumentOutcome> {
    if !path.exists() {
        return Ok(DocumentOutcome::Missing);
    }

    let original =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut content = original.clone();
    let mut replacements = 0;
    for template in templates {
        let (updated, count) = template.apply(&content, table);
        if count == 0 {
            debug!("Badge '{}' not found in {}", template.name, path.display());
        }
        content = updated;
        replacements += count;
    }

    if content == original {
        return Ok(DocumentOutcome::Unchanged);
    }

    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(DocumentOutcome::Updated { replacements })
}

/// Rewrite every configured badge, one document at a time
///
/// Per-document failures are logged and reported, never propagated.
pub fn update_readmes(
    config: &ArchiveConfig,
    table: &StatsTable,
) -> Result<Vec<(PathBuf, DocumentOutcome)>> {
    let templates = config
        .badges
        .iter()
        .map(BadgeTemplate::compile)
        .collect::<Result<Vec<_>>>()?;

    // Documents in first-mention order
    let mut documents: Vec<&Path> = Vec::new();
    for template in &templates {
        if !documents.contains(&template.document.as_path()) {
            documents.push(&template.document);
        }
    }

    let mut outcomes = Vec::new();
    for document in documents {
        let for_document: Vec<&BadgeTemplate> = templates
            .iter()
            .filter(|t| t.document == document)
            .collect();
        let path = config.resolve(document);

        let outcome = match update_document(&path, &for_document, table) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error updating {}: {:#}", document.display(), e);
                DocumentOutcome::Failed(format!("{:#}", e))
            }
        };
        if outcome == DocumentOutcome::Missing {
            warn!("File not found: {}", document.display());
        }
        outcomes.push((document.to_path_buf(), outcome));
    }

    Ok(outcomes)
}
