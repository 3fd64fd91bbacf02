//! Stats reporter tests
mod common;

use common::TestArchive;
use solved_archive::stats::{
    collect_platform_stats, count_by_difficulty, count_by_month, count_solution_files, stats_table,
};
use solved_archive::Difficulty;

#[test]
fn test_total_is_sum_of_buckets_and_unbucketed() {
    let archive = TestArchive::new();
    archive.write("leetcode/easy/1-two-sum/a.cpp", "");
    archive.write("leetcode/easy/1-two-sum/a.py", "");
    archive.write("leetcode/medium/2-add.java", "");
    archive.write("leetcode/medium/3-longest/sol.cpp", "");
    archive.write("leetcode/hard/4-median/sol.py", "");
    archive.write("leetcode/5-palindrome/sol.cpp", "");
    archive.write("leetcode/6-zigzag.py", "");
    archive.write("leetcode/README.md", "# LeetCode\n");

    let config = archive.config();
    let breakdown = count_by_difficulty(&archive.leetcode(), &config).unwrap();

    assert_eq!(breakdown.get(Difficulty::Easy), 1);
    assert_eq!(breakdown.get(Difficulty::Medium), 2);
    assert_eq!(breakdown.get(Difficulty::Hard), 1);
    assert_eq!(breakdown.unbucketed, 2);
    assert_eq!(
        breakdown.total,
        breakdown.easy + breakdown.medium + breakdown.hard + breakdown.unbucketed
    );
    assert_eq!(breakdown.total, 6);
}

#[test]
fn test_monthly_counts_sum_to_file_count() {
    let archive = TestArchive::new();
    archive.write("codeforces/1000A.cpp", "");
    archive.write("codeforces/round-900/B.py", "");
    archive.write("codeforces/round-900/notes.txt", "");

    let config = archive.config();
    let dir = archive.root().join("codeforces");
    let monthly = count_by_month(&dir, &config);

    assert_eq!(monthly.values().sum::<usize>(), 2);
    assert_eq!(count_solution_files(&dir, &config), 2);
    assert!(monthly.keys().all(|m| m.len() == 7 && m.as_bytes()[4] == b'-'));
}

#[test]
fn test_missing_platforms_count_zero() {
    let archive = TestArchive::new();
    archive.write("codeforces/1000A.cpp", "");

    let config = archive.config();
    let stats = collect_platform_stats(&config).unwrap();
    let table = stats_table(&stats);

    assert_eq!(table["leetcode_total"], 0);
    assert_eq!(table["leetcode_easy"], 0);
    assert_eq!(table["codeforces_total"], 1);
    assert_eq!(table["geeksforgeeks_total"], 0);
    assert_eq!(table["overall_total"], 1);
}
