//! Content accuracy: how closely a transcript matches the target text.
//!
//! Similarity uses Ratcliff–Obershelp matching over normalized character
//! sequences (recursive longest-common-substring). The feedback tier
//! thresholds are calibrated to this family of ratios; swapping in an
//! edit-distance metric would shift every tier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Missing/added word lists are capped when reported.
pub const WORD_LIST_CAP: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentAccuracy {
    /// round(100 × similarity), 0–100.
    pub accuracy_score: u8,
    pub feedback: String,
    pub missing_words: Vec<String>,
    pub added_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_accuracy: Option<u8>,
}

/// Lowercase, drop punctuation, collapse runs of whitespace, trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ratcliff–Obershelp ratio in [0, 1] over the two strings' characters.
/// Two empty strings are identical (ratio 1).
pub fn similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    (2.0 * matches as f32) / (a.len() + b.len()) as f32
}

/// Total matched characters: the longest common substring, then recursion
/// on the unmatched pieces to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (a_start, b_start, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..a_start], &b[..b_start])
        + matching_chars(&a[a_start + len..], &b[b_start + len..])
}

/// (start in a, start in b, length) of a longest common substring.
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j] = common suffix length ending at a[i] / b[j - 1]
    let mut lengths = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        // Walk j downwards so each entry still holds the previous row.
        for j in (1..=b.len()).rev() {
            if b[j - 1] == ca {
                lengths[j] = lengths[j - 1] + 1;
                if lengths[j] > best.2 {
                    best = (i + 1 - lengths[j], j - lengths[j], lengths[j]);
                }
            } else {
                lengths[j] = 0;
            }
        }
    }
    best
}

fn tier_feedback(score: u8) -> &'static str {
    if score >= 90 {
        "Excellent content accuracy! You delivered the message very close to the intended text."
    } else if score >= 70 {
        "Good content accuracy with some variations from the original text."
    } else if score >= 50 {
        "You captured part of the message, but several passages diverged from the intended text."
    } else {
        "Your delivery varied significantly from the intended text. Consider practicing to improve content accuracy."
    }
}

fn capped_words(words: BTreeSet<&str>) -> Vec<String> {
    words
        .into_iter()
        .take(WORD_LIST_CAP)
        .map(str::to_owned)
        .collect()
}

/// Score one transcript against the target text.
pub fn evaluate(transcript: &str, target: &str) -> ContentAccuracy {
    let spoken = normalize(transcript);
    let intended = normalize(target);

    let ratio = similarity(&spoken, &intended);
    let accuracy_score = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;

    let spoken_words: BTreeSet<&str> = spoken.split_whitespace().collect();
    let target_words: BTreeSet<&str> = intended.split_whitespace().collect();
    let missing_words = capped_words(target_words.difference(&spoken_words).copied().collect());
    let added_words = capped_words(spoken_words.difference(&target_words).copied().collect());

    ContentAccuracy {
        accuracy_score,
        feedback: tier_feedback(accuracy_score).to_owned(),
        missing_words,
        added_words,
        benchmark_accuracy: None,
    }
}

/// Comparative variant: also scores the benchmark transcript against the
/// same target and appends one comparison sentence.
pub fn evaluate_with_benchmark(
    transcript: &str,
    benchmark_transcript: &str,
    target: &str,
) -> ContentAccuracy {
    let mut accuracy = evaluate(transcript, target);
    let benchmark = evaluate(benchmark_transcript, target);
    let comparison = if accuracy.accuracy_score >= benchmark.accuracy_score {
        format!(
            " You matched the benchmark's content accuracy ({}% vs {}%).",
            accuracy.accuracy_score, benchmark.accuracy_score
        )
    } else {
        format!(
            " The benchmark rendition stayed closer to the target text ({}% vs your {}%).",
            benchmark.accuracy_score, accuracy.accuracy_score
        )
    };
    accuracy.feedback.push_str(&comparison);
    accuracy.benchmark_accuracy = Some(benchmark.accuracy_score);
    accuracy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("hello   world."), "hello world");
        assert_eq!(normalize("  Spaced\tout\ntext  "), "spaced out text");
    }

    #[test]
    fn identical_strings_score_100() {
        let acc = evaluate("The quick brown fox", "the QUICK brown fox!");
        assert_eq!(acc.accuracy_score, 100);
        assert!(acc.missing_words.is_empty());
        assert!(acc.added_words.is_empty());
        assert!(acc.feedback.starts_with("Excellent"));
    }

    #[test]
    fn empty_vs_empty_is_identical() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(evaluate("", "").accuracy_score, 100);
    }

    #[test]
    fn empty_transcript_scores_zero_against_text() {
        let acc = evaluate("", "say something");
        assert_eq!(acc.accuracy_score, 0);
        assert_eq!(acc.missing_words, vec!["say", "something"]);
    }

    #[test]
    fn one_missing_word_lands_in_the_good_tier() {
        let acc = evaluate("the quick brown fox", "the quick brown fox jumps");
        assert!(
            (70..=89).contains(&acc.accuracy_score),
            "score {}",
            acc.accuracy_score
        );
        assert_eq!(acc.feedback, tier_feedback(acc.accuracy_score));
        assert!(acc.feedback.starts_with("Good content accuracy"));
        assert_eq!(acc.missing_words, vec!["jumps"]);
        assert!(acc.added_words.is_empty());
    }

    #[test]
    fn missing_and_added_are_disjoint() {
        let acc = evaluate(
            "alpha beta gamma delta epsilon",
            "alpha beta theta delta kappa",
        );
        for w in &acc.missing_words {
            assert!(!acc.added_words.contains(w));
        }
        assert!(acc.missing_words.contains(&"theta".to_owned()));
        assert!(acc.added_words.contains(&"gamma".to_owned()));
    }

    #[test]
    fn word_lists_are_capped() {
        let target: Vec<String> = (0..30).map(|i| format!("target{i}")).collect();
        let spoken: Vec<String> = (0..30).map(|i| format!("spoken{i}")).collect();
        let acc = evaluate(&spoken.join(" "), &target.join(" "));
        assert_eq!(acc.missing_words.len(), WORD_LIST_CAP);
        assert_eq!(acc.added_words.len(), WORD_LIST_CAP);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = "practice makes perfect";
        let b = "practice sometimes makes perfect";
        assert!((similarity(a, b) - similarity(b, a)).abs() < 1e-6);
    }

    #[test]
    fn benchmark_comparison_appends_one_sentence() {
        let acc = evaluate_with_benchmark(
            "the quick brown fox",
            "the quick brown fox jumps",
            "the quick brown fox jumps",
        );
        assert_eq!(acc.benchmark_accuracy, Some(100));
        assert!(acc.feedback.contains("benchmark"));
        assert!(acc.accuracy_score < 100);
    }

    #[test]
    fn benchmark_comparison_when_user_is_closer() {
        let acc = evaluate_with_benchmark(
            "the quick brown fox jumps",
            "the quick fox",
            "the quick brown fox jumps",
        );
        assert_eq!(acc.accuracy_score, 100);
        assert!(acc.feedback.contains("matched the benchmark"));
    }

    #[test]
    fn longest_common_substring_basic() {
        let a: Vec<char> = "xabcy".chars().collect();
        let b: Vec<char> = "zabcw".chars().collect();
        assert_eq!(longest_common_substring(&a, &b), (1, 1, 3));
    }
}
