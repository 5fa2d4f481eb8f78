//! End-to-end analysis of one recording.
//!
//! One call, one recording: decode, extract descriptors, consult the
//! transcription and emotion collaborators, score, and (optionally) build a
//! feedback or comparative report. A decode failure aborts the analysis;
//! collaborator failures degrade to their documented fallbacks. No state is
//! shared between calls, so independent analyses may run concurrently.

use crate::config::AnalysisConfig;
use crate::decode::{AudioDecoder, AudioSource, DecodeError};
use crate::emotion::{EmotionClassifier, EmotionProfile};
use crate::features::{AcousticDescriptorSet, FeatureExtractor};
use crate::feedback::{self, ComparativeReport, FeedbackReport};
use crate::score;
use crate::transcribe::Transcriber;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("audio decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Everything measured and inferred from one recording.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordingAnalysis {
    #[serde(flatten)]
    pub descriptors: AcousticDescriptorSet,
    /// Absent when the transcriber failed or returned the sentinel.
    pub transcription: Option<String>,
    pub emotions: EmotionProfile,
    pub primary_emotion: String,
    pub expressiveness_score: f32,
}

/// Analysis plus its coaching report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachingReview {
    pub analysis: RecordingAnalysis,
    pub report: FeedbackReport,
}

/// Analysis of both recordings plus the comparative report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeReview {
    pub analysis: RecordingAnalysis,
    pub benchmark: RecordingAnalysis,
    pub report: ComparativeReport,
}

/// The analysis engine wired to its three collaborators. Collaborators are
/// read-only once constructed; the pipeline itself holds no mutable state.
pub struct AnalysisPipeline<D, T, C> {
    decoder: D,
    transcriber: T,
    classifier: C,
    extractor: FeatureExtractor,
}

impl<D, T, C> AnalysisPipeline<D, T, C>
where
    D: AudioDecoder,
    T: Transcriber,
    C: EmotionClassifier,
{
    pub fn new(decoder: D, transcriber: T, classifier: C, config: AnalysisConfig) -> Self {
        Self {
            decoder,
            transcriber,
            classifier,
            extractor: FeatureExtractor::new(config),
        }
    }

    /// Decode and measure one recording.
    ///
    /// Transcription and emotion classification are allowed to fail: the
    /// analysis continues with the sentinel transcript and the neutral
    /// profile respectively.
    pub async fn analyze(&self, source: AudioSource) -> Result<RecordingAnalysis, PipelineError> {
        let audio = self.decoder.decode(source).await?;
        tracing::debug!(
            sample_rate = audio.sample_rate,
            samples = audio.samples.len(),
            "decoded recording"
        );

        let descriptors = self.extractor.extract(&audio);

        let transcription = match self.transcriber.transcribe(audio).await {
            Ok(t) if t.is_usable() => Some(t.text),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "transcription unavailable, continuing without a transcript");
                None
            }
        };

        let emotions = match &transcription {
            Some(text) => match self.classifier.classify(text.clone()).await {
                Ok(profile) if !profile.is_empty() => profile,
                Ok(_) => EmotionProfile::neutral(),
                Err(e) => {
                    tracing::warn!(error = %e, "emotion classification unavailable, assuming neutral");
                    EmotionProfile::neutral()
                }
            },
            None => EmotionProfile::neutral(),
        };

        let primary_emotion = emotions.primary().to_owned();
        let expressiveness_score =
            score::expressiveness_score(&descriptors, emotions.confidence(&primary_emotion));
        tracing::info!(
            expressiveness_score,
            primary_emotion = %primary_emotion,
            duration = descriptors.duration,
            "recording analyzed"
        );

        Ok(RecordingAnalysis {
            descriptors,
            transcription,
            emotions,
            primary_emotion,
            expressiveness_score,
        })
    }

    /// Analyze one recording and generate its feedback report.
    pub async fn review(
        &self,
        source: AudioSource,
        target_text: Option<&str>,
    ) -> Result<CoachingReview, PipelineError> {
        let analysis = self.analyze(source).await?;
        let report = feedback::generate(
            &analysis.descriptors,
            &analysis.emotions,
            analysis.expressiveness_score,
            analysis.transcription.as_deref(),
            target_text,
        );
        Ok(CoachingReview { analysis, report })
    }

    /// Analyze a recording and a benchmark and generate the comparative
    /// report. Without a benchmark recording, use [`Self::review`].
    pub async fn review_against_benchmark(
        &self,
        source: AudioSource,
        benchmark_source: AudioSource,
        target_text: Option<&str>,
    ) -> Result<ComparativeReview, PipelineError> {
        let analysis = self.analyze(source).await?;
        let benchmark = self.analyze(benchmark_source).await?;
        let report = feedback::generate_comparative(
            &analysis.descriptors,
            &analysis.emotions,
            analysis.expressiveness_score,
            &benchmark.descriptors,
            &benchmark.emotions,
            benchmark.expressiveness_score,
            analysis.transcription.as_deref(),
            benchmark.transcription.as_deref(),
            target_text,
        );
        Ok(ComparativeReview {
            analysis,
            benchmark,
            report,
        })
    }
}
