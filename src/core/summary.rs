use crate::domain::model::{SummaryCategory, SummaryLine};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_SUMMARY_LINES: usize = 6;

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-•0-9.:\s]+").expect("bullet prefix pattern is valid"));

// First matching set wins.
const CATEGORY_KEYWORDS: &[(SummaryCategory, &[&str])] = &[
    (SummaryCategory::Distance, &["km", "distance", "approx"]),
    (
        SummaryCategory::Time,
        &["mins", "hours", "time", "drive", "via", "highway"],
    ),
    (
        SummaryCategory::Transit,
        &["lrt", "mrt", "ktm", "bus", "transport", "terminal"],
    ),
    (
        SummaryCategory::Address,
        &["jalan", "no.", "block", "taman", "lebuhraya"],
    ),
];

pub fn classify_line(line: &str) -> SummaryCategory {
    let lower = line.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(SummaryCategory::General)
}

/// Splits an advice message into at most six classified display lines.
pub fn summarize(message: &str) -> Vec<SummaryLine> {
    message
        .lines()
        .map(|line| BULLET_PREFIX.replace(line, "").trim().to_string())
        .filter(|line| line.chars().count() > 2)
        .take(MAX_SUMMARY_LINES)
        .map(|text| SummaryLine {
            category: classify_line(&text),
            text,
        })
        .collect()
}
