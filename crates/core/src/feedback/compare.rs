//! Benchmark comparison: classifies each dimension of a user recording
//! against a reference recording and composes a similarity-based
//! assessment. The rules are symmetric in the inputs apart from the
//! directional wording of the produced sentences.

use crate::accuracy;
use crate::emotion::{self, EmotionProfile};
use crate::features::AcousticDescriptorSet;
use crate::feedback::buckets::{BucketTable, Quality, ENERGY, PAUSE, PITCH, RATE};
use crate::feedback::{self, FeedbackReport};
use serde::{Deserialize, Serialize};

/// Speech rate must sit within 10% of the benchmark to count as a match.
pub const RATE_MATCH_TOLERANCE: f32 = 0.1;

/// The other acoustic dimensions allow 20%.
pub const DEFAULT_MATCH_TOLERANCE: f32 = 0.2;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub general: Vec<String>,
    pub strengths: Vec<String>,
    pub matches: Vec<String>,
    pub improvements: Vec<String>,
}

/// A [`FeedbackReport`] whose assessment is driven by benchmark similarity,
/// plus the per-dimension comparison lists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeReport {
    #[serde(flatten)]
    pub report: FeedbackReport,
    pub comparison: Comparison,
}

fn relative_diff(user: f32, benchmark: f32) -> f32 {
    if benchmark == 0.0 {
        return 0.0;
    }
    (user - benchmark).abs() / benchmark
}

/// Per-dimension similarity in [0, 1]; a zero benchmark gives no usable
/// scale, so it contributes a neutral 0.5.
fn similarity_factor(user: f32, benchmark: f32) -> f32 {
    if benchmark == 0.0 {
        return 0.5;
    }
    1.0 - (relative_diff(user, benchmark)).min(1.0)
}

fn classify_dimension(
    table: &BucketTable,
    user: f32,
    benchmark: f32,
    tolerance: f32,
    comparison: &mut Comparison,
) {
    let dim = table.dimension;
    if relative_diff(user, benchmark) <= tolerance {
        comparison
            .matches
            .push(format!("Your {dim} closely matches the benchmark."));
    } else if user > benchmark {
        if table.is_high(user) && !table.is_high(benchmark) {
            comparison.improvements.push(format!(
                "Your {dim} goes further than the benchmark's; rein it in for a more controlled delivery."
            ));
        } else {
            comparison
                .strengths
                .push(format!("Your {dim} exceeds the benchmark recording's."));
        }
    } else if table.bucket_for(benchmark).quality == Quality::Below {
        comparison.general.push(format!(
            "Your {dim} is lower than the benchmark's, though the benchmark also leaves room on this dimension."
        ));
    } else {
        comparison.improvements.push(format!(
            "Your {dim} falls short of the benchmark's; work toward its level."
        ));
    }
}

fn similarity_tier(composite: f32) -> &'static str {
    if composite >= 80.0 {
        "Your delivery closely mirrors the benchmark recording."
    } else if composite >= 60.0 {
        "Your delivery is broadly similar to the benchmark, with a few gaps."
    } else if composite >= 40.0 {
        "Your delivery shares some qualities with the benchmark but diverges in places."
    } else {
        "Your delivery differs substantially from the benchmark recording."
    }
}

fn comparative_assessment(
    composite: f32,
    user_score: f32,
    benchmark_score: f32,
    user_rate: f32,
    benchmark_rate: f32,
    user_primary: &str,
    benchmark_primary: &str,
) -> String {
    let expressiveness = if user_score >= benchmark_score {
        format!(
            "Your expressiveness score ({user_score:.0}) meets or exceeds the benchmark's ({benchmark_score:.0})."
        )
    } else {
        format!(
            "Your expressiveness score ({user_score:.0}) trails the benchmark's ({benchmark_score:.0})."
        )
    };
    let pace = if relative_diff(user_rate, benchmark_rate) <= RATE_MATCH_TOLERANCE {
        "Your pacing is in step with the benchmark.".to_owned()
    } else if user_rate > benchmark_rate {
        "You speak faster than the benchmark.".to_owned()
    } else {
        "You speak more slowly than the benchmark.".to_owned()
    };
    let tone = if user_primary == benchmark_primary {
        format!("Both deliveries convey a primarily {benchmark_primary} tone.")
    } else {
        format!(
            "The benchmark conveys {benchmark_primary} where your delivery conveys {user_primary}."
        )
    };
    format!(
        "{} {expressiveness} {pace} {tone}",
        similarity_tier(composite)
    )
}

/// Composite similarity percentage and the comparison report.
pub fn generate_comparative(
    user: &AcousticDescriptorSet,
    user_emotions: &EmotionProfile,
    user_score: f32,
    benchmark: &AcousticDescriptorSet,
    benchmark_emotions: &EmotionProfile,
    benchmark_score: f32,
    user_transcript: Option<&str>,
    benchmark_transcript: Option<&str>,
    target_text: Option<&str>,
) -> ComparativeReport {
    let mut comparison = Comparison::default();

    let dims: [(&BucketTable, f32, f32, f32); 4] = [
        (
            &PITCH,
            user.pitch_variability,
            benchmark.pitch_variability,
            DEFAULT_MATCH_TOLERANCE,
        ),
        (
            &ENERGY,
            user.energy_variability,
            benchmark.energy_variability,
            DEFAULT_MATCH_TOLERANCE,
        ),
        (
            &RATE,
            user.speech_rate,
            benchmark.speech_rate,
            RATE_MATCH_TOLERANCE,
        ),
        (
            &PAUSE,
            user.pause_ratio,
            benchmark.pause_ratio,
            DEFAULT_MATCH_TOLERANCE,
        ),
    ];
    for (table, user_value, benchmark_value, tolerance) in dims {
        classify_dimension(table, user_value, benchmark_value, tolerance, &mut comparison);
    }

    let user_primary = user_emotions.primary();
    let benchmark_primary = benchmark_emotions.primary();
    let emotion_matches = user_primary == benchmark_primary;
    if emotion_matches {
        comparison.matches.push(format!(
            "Your overall tone matches the benchmark's {benchmark_primary} delivery."
        ));
    } else if emotion::is_desirable(benchmark_primary) && !emotion::is_desirable(user_primary) {
        comparison.improvements.push(format!(
            "The benchmark projects a {benchmark_primary} tone while yours reads {user_primary}; work toward that {benchmark_primary} quality."
        ));
    } else {
        comparison.general.push(format!(
            "Your primary tone ({user_primary}) differs from the benchmark's ({benchmark_primary})."
        ));
    }

    let factors = [
        similarity_factor(user.pitch_variability, benchmark.pitch_variability),
        similarity_factor(user.energy_variability, benchmark.energy_variability),
        similarity_factor(user.speech_rate, benchmark.speech_rate),
        similarity_factor(user.pause_ratio, benchmark.pause_ratio),
        if emotion_matches { 1.0 } else { 0.5 },
    ];
    let composite = 100.0 * factors.iter().sum::<f32>() / factors.len() as f32;

    let mut report = feedback::generate(user, user_emotions, user_score, user_transcript, target_text);
    report.overall_assessment = comparative_assessment(
        composite,
        user_score,
        benchmark_score,
        user.speech_rate,
        benchmark.speech_rate,
        user_primary,
        benchmark_primary,
    );

    if let (Some(transcript), Some(bench_transcript), Some(target)) =
        (user_transcript, benchmark_transcript, target_text)
    {
        if !transcript.trim().is_empty() && !bench_transcript.trim().is_empty() {
            report.content_accuracy =
                Some(accuracy::evaluate_with_benchmark(transcript, bench_transcript, target));
        }
    }

    ComparativeReport { report, comparison }
}
