mod keyword;

pub use keyword::KeywordEmotionClassifier;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NEUTRAL_LABEL: &str = "neutral";

/// Tones worth steering a delivery toward; used when comparing against a
/// benchmark recording.
pub const DESIRABLE_EMOTIONS: [&str; 3] = ["confident", "joy", "enthusiasm"];

pub fn is_desirable(label: &str) -> bool {
    DESIRABLE_EMOTIONS.contains(&label)
}

/// Emotion label → confidence. Confidences are non-negative and sum to
/// roughly 1.0 for a well-formed classifier output.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EmotionProfile {
    confidences: BTreeMap<String, f32>,
}

impl EmotionProfile {
    /// Builds a profile, dropping negative confidences.
    pub fn new(confidences: BTreeMap<String, f32>) -> Self {
        let confidences = confidences
            .into_iter()
            .filter(|(_, c)| *c >= 0.0)
            .collect();
        Self { confidences }
    }

    /// The fallback profile when no classifier output is available.
    pub fn neutral() -> Self {
        let mut confidences = BTreeMap::new();
        confidences.insert(NEUTRAL_LABEL.to_owned(), 1.0);
        Self { confidences }
    }

    pub fn is_empty(&self) -> bool {
        self.confidences.is_empty()
    }

    /// The highest-confidence label. Ties resolve to the lexicographically
    /// first label so reports stay deterministic; an empty profile reads as
    /// neutral.
    pub fn primary(&self) -> &str {
        let mut best: Option<(&str, f32)> = None;
        for (label, &confidence) in &self.confidences {
            let beats = best.map_or(true, |(_, c)| confidence > c);
            if beats {
                best = Some((label.as_str(), confidence));
            }
        }
        best.map(|(label, _)| label).unwrap_or(NEUTRAL_LABEL)
    }

    pub fn confidence(&self, label: &str) -> f32 {
        self.confidences.get(label).copied().unwrap_or(0.0)
    }

    pub fn primary_confidence(&self) -> f32 {
        self.confidence(self.primary())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.confidences.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmotionError {
    #[error("emotion classification failed: {0}")]
    ClassificationFailed(String),
}

/// Text-emotion collaborator seam. Implementations load their model once at
/// construction and stay read-only afterwards.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, text: String) -> BoxFuture<'_, Result<EmotionProfile, EmotionError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_profile_has_full_confidence() {
        let p = EmotionProfile::neutral();
        assert_eq!(p.primary(), "neutral");
        assert!((p.primary_confidence() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn primary_picks_max_confidence() {
        let mut m = BTreeMap::new();
        m.insert("joy".to_owned(), 0.7);
        m.insert("sadness".to_owned(), 0.3);
        let p = EmotionProfile::new(m);
        assert_eq!(p.primary(), "joy");
        assert!((p.confidence("sadness") - 0.3).abs() < 1e-6);
    }

    #[test]
    fn ties_resolve_to_first_label() {
        let mut m = BTreeMap::new();
        m.insert("surprise".to_owned(), 0.5);
        m.insert("anger".to_owned(), 0.5);
        let p = EmotionProfile::new(m);
        assert_eq!(p.primary(), "anger");
    }

    #[test]
    fn empty_profile_reads_as_neutral_with_zero_confidence() {
        let p = EmotionProfile::default();
        assert_eq!(p.primary(), "neutral");
        assert_eq!(p.primary_confidence(), 0.0);
    }

    #[test]
    fn negative_confidences_are_dropped() {
        let mut m = BTreeMap::new();
        m.insert("joy".to_owned(), -0.4);
        m.insert("fear".to_owned(), 0.4);
        let p = EmotionProfile::new(m);
        assert_eq!(p.confidence("joy"), 0.0);
        assert_eq!(p.primary(), "fear");
    }

    #[test]
    fn desirable_set_is_fixed() {
        assert!(is_desirable("confident"));
        assert!(is_desirable("joy"));
        assert!(is_desirable("enthusiasm"));
        assert!(!is_desirable("neutral"));
        assert!(!is_desirable("anger"));
    }
}
