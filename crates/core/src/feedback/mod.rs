pub mod buckets;

mod compare;

pub use compare::{
    generate_comparative, Comparison, ComparativeReport, DEFAULT_MATCH_TOLERANCE,
    RATE_MATCH_TOLERANCE,
};

use crate::accuracy::{self, ContentAccuracy};
use crate::emotion::{self, EmotionProfile, NEUTRAL_LABEL};
use crate::features::AcousticDescriptorSet;
use buckets::{BucketTable, EMPHASIS, ENERGY, PAUSE, PITCH, RATE};
use serde::{Deserialize, Serialize};

/// Deterministic, human-readable coaching output for one recording.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub overall_assessment: String,
    /// One sentence per analyzed dimension, fixed order: pitch, energy,
    /// pace, pause, emphasis, emotion.
    pub specific_feedback: Vec<String>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_accuracy: Option<ContentAccuracy>,
}

pub const NO_STRENGTHS_FALLBACK: &str =
    "You're making steady progress with your speaking practice - keep recording and reviewing.";
pub const NO_SUGGESTIONS_FALLBACK: &str =
    "Keep building on your delivery - it's already well balanced.";

/// Tier label for a composite expressiveness score.
pub fn expressiveness_tier(score: f32) -> &'static str {
    if score >= 80.0 {
        "very expressive"
    } else if score >= 60.0 {
        "expressive"
    } else if score >= 40.0 {
        "moderately expressive"
    } else if score >= 20.0 {
        "fairly subdued"
    } else {
        "monotonous"
    }
}

fn dimension_rows(
    descriptors: &AcousticDescriptorSet,
) -> [(&'static BucketTable, f32); 5] {
    [
        (&PITCH, descriptors.pitch_variability),
        (&ENERGY, descriptors.energy_variability),
        (&RATE, descriptors.speech_rate),
        (&PAUSE, descriptors.pause_ratio),
        (&EMPHASIS, descriptors.emphasis_ratio),
    ]
}

fn emotion_sentence(primary: &str) -> String {
    if emotion::is_desirable(primary) {
        format!("Your {primary} tone comes through clearly and suits the delivery.")
    } else if primary == NEUTRAL_LABEL {
        "Your tone reads as mostly neutral. Letting more feeling into your voice will help the message land.".to_owned()
    } else {
        format!("Your delivery carries a {primary} tone; make sure that matches the message you intend.")
    }
}

fn emotion_suggestion(primary: &str) -> String {
    if primary == NEUTRAL_LABEL {
        "Pick an emotion for the passage before you read it and let it color your voice.".to_owned()
    } else {
        format!("Your delivery carries a {primary} tone; if that's not the intent, steer it toward warmth or confidence.")
    }
}

/// Builds a report from descriptors, emotion profile and composite score.
///
/// Absent collaborator output is represented by zeros and a neutral profile;
/// every such input still yields a complete report with non-empty strengths
/// and suggestions.
pub fn generate(
    descriptors: &AcousticDescriptorSet,
    emotions: &EmotionProfile,
    score: f32,
    transcript: Option<&str>,
    target_text: Option<&str>,
) -> FeedbackReport {
    let primary = emotions.primary();
    let rows = dimension_rows(descriptors);

    let overall_assessment = format!(
        "Your delivery comes across as {}. {} {} {} Your speech conveys a primarily {} tone.",
        expressiveness_tier(score),
        PITCH.bucket_for(descriptors.pitch_variability).summary,
        ENERGY.bucket_for(descriptors.energy_variability).summary,
        RATE.bucket_for(descriptors.speech_rate).summary,
        primary,
    );

    let mut specific_feedback: Vec<String> = rows
        .iter()
        .map(|(table, value)| table.bucket_for(*value).feedback.to_owned())
        .collect();
    specific_feedback.push(emotion_sentence(primary));

    let mut strengths: Vec<String> = rows
        .iter()
        .filter(|(table, value)| table.is_good(*value))
        .map(|(table, _)| table.strength.to_owned())
        .collect();
    if emotion::is_desirable(primary) {
        strengths.push(format!("A {primary} tone that carries conviction."));
    }
    if strengths.is_empty() {
        strengths.push(NO_STRENGTHS_FALLBACK.to_owned());
    }

    let mut suggestions: Vec<String> = rows
        .iter()
        .filter(|(table, value)| !table.is_good(*value))
        .map(|(table, value)| table.bucket_for(*value).suggestion.to_owned())
        .collect();
    if !emotion::is_desirable(primary) {
        suggestions.push(emotion_suggestion(primary));
    }
    if suggestions.is_empty() {
        suggestions.push(NO_SUGGESTIONS_FALLBACK.to_owned());
    }

    let content_accuracy = match (transcript, target_text) {
        (Some(t), Some(target)) if !t.trim().is_empty() => Some(accuracy::evaluate(t, target)),
        _ => None,
    };

    FeedbackReport {
        overall_assessment,
        specific_feedback,
        strengths,
        suggestions,
        content_accuracy,
    }
}
