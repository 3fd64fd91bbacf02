//! Problem organizer tests
mod common;

use common::{TestArchive, list_names};
use solved_archive::{
    DuplicatePolicy, OrganizeOptions, OrganizeReport, Organizer, ReadmeResolver,
};
use std::fs;
use std::path::Path;

fn run(archive: &TestArchive, root: &Path, policy: DuplicatePolicy) -> OrganizeReport {
    let config = archive.config();
    let resolver = ReadmeResolver::new(&config.readme_name, config.scan_lines).unwrap();
    let options = OrganizeOptions {
        policy,
        dry_run: false,
    };
    Organizer::new(root, &config, Box::new(resolver), options)
        .organize()
        .unwrap()
}

#[test]
fn test_medium_badge_moves_to_medium_bucket() {
    let archive = TestArchive::new();
    archive.leetcode_problem("2-add-two-numbers", "Medium");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!(report.medium, 1);
    assert_eq!(report.total_moved(), 1);
    assert!(report.changed);
    assert!(archive.leetcode().join("medium/2-add-two-numbers/README.md").is_file());
    assert!(!archive.leetcode().join("2-add-two-numbers").exists());
}

#[test]
fn test_mixed_difficulties() {
    let archive = TestArchive::new();
    archive.leetcode_problem("1-two-sum", "Easy");
    archive.leetcode_problem("4-median-of-two-sorted-arrays", "Hard");
    archive.leetcode_problem("3-longest-substring", "medium");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!((report.easy, report.medium, report.hard), (1, 1, 1));
    assert_eq!(list_names(&archive.leetcode().join("easy")), vec!["1-two-sum"]);
    assert_eq!(
        list_names(&archive.leetcode().join("hard")),
        vec!["4-median-of-two-sorted-arrays"]
    );
}

#[test]
fn test_missing_snippet_is_skipped_without_changes() {
    let archive = TestArchive::new();
    archive.write("leetcode/5-longest-palindrome/main.py", "pass\n");
    archive.write("leetcode/6-zigzag/README.md", "# Zigzag Conversion\nNo marker here\n");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!(report.skipped, 2);
    assert_eq!(report.total_moved(), 0);
    assert_eq!(report.errors, 0);
    assert!(!report.changed);
    assert!(archive.leetcode().join("5-longest-palindrome/main.py").is_file());
    assert!(archive.leetcode().join("6-zigzag/README.md").is_file());
}

#[test]
fn test_bucketed_entries_are_untouched_and_skipped() {
    let archive = TestArchive::new();
    archive.write(
        "leetcode/easy/1-two-sum/README.md",
        "<img alt='Difficulty: Hard' />\n",
    );
    archive.write("leetcode/hard/10-regex.cpp", "");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!(report.skipped, 2);
    assert_eq!(report.total_moved(), 0);
    // Even a contradicting snippet inside a bucket is left alone
    assert!(archive.leetcode().join("easy/1-two-sum/README.md").is_file());
    assert!(archive.leetcode().join("hard/10-regex.cpp").is_file());
}

#[test]
fn test_pointing_at_a_bucket_skips_everything() {
    let archive = TestArchive::new();
    archive.write("leetcode/easy/1-two-sum/README.md", "<img alt='Difficulty: Hard' />\n");
    archive.write("leetcode/easy/9-palindrome.py", "");

    let bucket = archive.leetcode().join("easy");
    let report = run(&archive, &bucket, DuplicatePolicy::Replace);

    assert_eq!(report.skipped, 2);
    assert_eq!(report.total_moved(), 0);
    assert_eq!(list_names(&bucket), vec!["1-two-sum", "9-palindrome.py"]);
    assert!(!bucket.join("hard").exists());
}

#[test]
fn test_second_run_is_idempotent() {
    let archive = TestArchive::new();
    archive.leetcode_problem("1-two-sum", "Easy");
    archive.leetcode_problem("2-add-two-numbers", "Medium");
    archive.write("leetcode/7-reverse-integer/main.cpp", "");

    let first = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);
    assert_eq!(first.total_moved(), 2);

    let second = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);
    assert_eq!(second.total_moved(), 0);
    assert_eq!(second.replaced, 0);
    assert!(!second.changed);
    // Two organized entries plus the one without a snippet
    assert_eq!(second.skipped, 3);
}

#[test]
fn test_replace_policy_keeps_latest() {
    let archive = TestArchive::new();
    // Stale copy classified differently in the past
    archive.write("leetcode/easy/15-3sum/old.cpp", "old");
    archive.write("leetcode/medium/15-3sum/older.cpp", "older");
    archive.leetcode_problem("15-3sum", "Medium");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!(report.medium, 1);
    assert_eq!(report.replaced, 2);
    assert!(!archive.leetcode().join("easy/15-3sum").exists());
    assert_eq!(
        list_names(&archive.leetcode().join("medium/15-3sum")),
        vec!["15-3sum.cpp", "README.md"]
    );
}

#[test]
fn test_skip_policy_leaves_duplicate_in_place() {
    let archive = TestArchive::new();
    archive.write("leetcode/medium/15-3sum/old.cpp", "old");
    archive.leetcode_problem("15-3sum", "Medium");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Skip);

    assert_eq!(report.total_moved(), 0);
    // The bucketed copy plus the root-level duplicate
    assert_eq!(report.skipped, 2);
    assert!(archive.leetcode().join("15-3sum/README.md").is_file());
    assert_eq!(
        fs::read_to_string(archive.leetcode().join("medium/15-3sum/old.cpp")).unwrap(),
        "old"
    );
}

#[test]
fn test_excluded_and_hidden_entries_are_ignored() {
    let archive = TestArchive::new();
    archive.write("leetcode/README.md", "<img alt='Difficulty: Easy' />\n");
    archive.write("leetcode/.cache/README.md", "<img alt='Difficulty: Easy' />\n");
    archive.write("leetcode/__pycache__/README.md", "<img alt='Difficulty: Easy' />\n");

    let report = run(&archive, &archive.leetcode(), DuplicatePolicy::Replace);

    assert_eq!(report, OrganizeReport::default());
    assert!(archive.leetcode().join("README.md").is_file());
    assert!(archive.leetcode().join(".cache").is_dir());
}

#[cfg(unix)]
#[test]
fn test_command_resolver_moves_solution_files() {
    use solved_archive::CommandResolver;

    let archive = TestArchive::new();
    archive.write("leetcode/42-trapping-rain-water.cpp", "");
    let config = archive.config();

    // printf reuses its format for the slug, printing "Difficulty:Hard" first
    let resolver = CommandResolver::new(r"printf Difficulty:%s\n Hard").unwrap();
    let report = Organizer::new(
        archive.leetcode(),
        &config,
        Box::new(resolver),
        OrganizeOptions::default(),
    )
    .organize()
    .unwrap();

    assert_eq!(report.hard, 1);
    assert!(archive.leetcode().join("hard/42-trapping-rain-water.cpp").is_file());
}
