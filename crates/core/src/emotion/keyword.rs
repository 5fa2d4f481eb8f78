use crate::emotion::{EmotionClassifier, EmotionError, EmotionProfile};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::BTreeMap;

/// Cue words per emotion label. Deliberately small: this is the stand-in
/// collaborator for environments without a real text-emotion model, not an
/// attempt at one.
const LEXICON: &[(&str, &[&str])] = &[
    (
        "anger",
        &["angry", "mad", "furious", "outraged", "hate", "annoyed"],
    ),
    (
        "confident",
        &["confident", "certain", "sure", "assured", "definitely", "believe"],
    ),
    (
        "disgust",
        &["disgust", "disgusting", "gross", "awful", "revolting"],
    ),
    (
        "enthusiasm",
        &["thrilled", "eager", "passionate", "enthusiastic", "excited"],
    ),
    (
        "fear",
        &["scared", "afraid", "fear", "worried", "anxious", "nervous"],
    ),
    (
        "joy",
        &["happy", "joy", "glad", "delighted", "wonderful", "love", "great"],
    ),
    (
        "sadness",
        &["sad", "unhappy", "depressed", "lonely", "sorry", "regret"],
    ),
    (
        "surprise",
        &["surprised", "surprise", "amazing", "wow", "unexpected", "incredible"],
    ),
];

/// Keyword-count classifier over the transcript text.
#[derive(Clone, Debug, Default)]
pub struct KeywordEmotionClassifier;

impl KeywordEmotionClassifier {
    pub fn new() -> Self {
        Self
    }

    fn profile_for(text: &str) -> EmotionProfile {
        let words: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();

        let mut hits: BTreeMap<String, f32> = BTreeMap::new();
        let mut total = 0.0f32;
        for (label, cues) in LEXICON {
            let count = words.iter().filter(|w| cues.contains(&w.as_str())).count();
            if count > 0 {
                hits.insert((*label).to_owned(), count as f32);
                total += count as f32;
            }
        }

        if total == 0.0 {
            return EmotionProfile::neutral();
        }
        let normalized = hits.into_iter().map(|(l, c)| (l, c / total)).collect();
        EmotionProfile::new(normalized)
    }
}

impl EmotionClassifier for KeywordEmotionClassifier {
    fn classify(&self, text: String) -> BoxFuture<'_, Result<EmotionProfile, EmotionError>> {
        async move { Ok(Self::profile_for(&text)) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn joyful_text_reads_as_joy() {
        let c = KeywordEmotionClassifier::new();
        let p = c
            .classify("I am so happy and delighted to be here, it is wonderful".to_owned())
            .await
            .expect("classification succeeds");
        assert_eq!(p.primary(), "joy");
        assert!(p.primary_confidence() > 0.5);
    }

    #[tokio::test]
    async fn plain_text_falls_back_to_neutral() {
        let c = KeywordEmotionClassifier::new();
        let p = c
            .classify("the meeting is on tuesday at nine".to_owned())
            .await
            .expect("classification succeeds");
        assert_eq!(p.primary(), "neutral");
        assert!((p.primary_confidence() - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn mixed_text_splits_confidence() {
        let c = KeywordEmotionClassifier::new();
        let p = c
            .classify("I am happy but also worried and worried again".to_owned())
            .await
            .expect("classification succeeds");
        assert_eq!(p.primary(), "fear");
        let sum: f32 = p.iter().map(|(_, c)| c).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn punctuation_does_not_block_matches() {
        let p = KeywordEmotionClassifier::profile_for("Happy! Really happy.");
        assert_eq!(p.primary(), "joy");
    }
}
