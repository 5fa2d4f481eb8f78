pub mod onset;
pub mod pitch;

use crate::config::AnalysisConfig;
use crate::decode::DecodedAudio;
use crate::util::stats;
use pitch::PitchTracker;
use serde::{Deserialize, Serialize};

/// Frames with energy below this fraction of the peak count as pauses.
pub const PAUSE_ENERGY_FACTOR: f32 = 0.01;

/// Frames with energy above this fraction of the peak count as emphasis.
pub const EMPHASIS_ENERGY_FACTOR: f32 = 0.80;

/// One point of a per-frame contour: frame start time in seconds, value in
/// the contour's unit (Hz or RMS).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FramePoint {
    pub time: f32,
    pub value: f32,
}

/// The acoustic measurements computed from one recording.
///
/// `pause_ratio` and `emphasis_ratio` are fractions of the same frame count
/// as `energy_series`. Field names are a persistence contract; do not
/// rename.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcousticDescriptorSet {
    /// Voiced frames only; unvoiced frames are absent, not zero.
    pub pitch_series: Vec<FramePoint>,
    /// Every analysis frame.
    pub energy_series: Vec<FramePoint>,
    pub pitch_variability: f32,
    pub energy_variability: f32,
    /// Estimated syllables per second; 0 when the duration is 0.
    pub speech_rate: f32,
    pub pause_ratio: f32,
    pub emphasis_ratio: f32,
    /// Seconds of audio after silence trimming.
    pub duration: f32,
    pub estimated_syllable_count: usize,
}

/// Turns decoded mono PCM into an [`AcousticDescriptorSet`].
///
/// Pitch and energy share one framing so the ratio fields stay comparable.
/// Degenerate input (empty or all-silent audio) produces an all-zero set
/// rather than an error.
#[derive(Clone, Copy, Debug)]
pub struct FeatureExtractor {
    config: AnalysisConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl FeatureExtractor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, audio: &DecodedAudio) -> AcousticDescriptorSet {
        let samples = &audio.samples;
        let sample_rate = audio.sample_rate;
        if samples.is_empty() || sample_rate == 0 {
            return AcousticDescriptorSet::default();
        }

        let tracker = PitchTracker::new(
            sample_rate,
            self.config.pitch_min_hz,
            self.config.pitch_max_hz,
        );

        let mut pitch_series = Vec::new();
        let mut energy_series = Vec::new();
        for (start, end) in frame_bounds(samples.len(), self.config.frame_len, self.config.hop_len)
        {
            let frame = &samples[start..end];
            let time = start as f32 / sample_rate as f32;
            energy_series.push(FramePoint {
                time,
                value: rms(frame),
            });
            if let Some(hz) = tracker.estimate(frame) {
                pitch_series.push(FramePoint { time, value: hz });
            }
        }

        let energies: Vec<f32> = energy_series.iter().map(|p| p.value).collect();
        let pitches: Vec<f32> = pitch_series.iter().map(|p| p.value).collect();

        let peak_energy = energies.iter().fold(0.0f32, |a, &b| a.max(b));
        let pause_threshold = PAUSE_ENERGY_FACTOR * peak_energy;
        let emphasis_threshold = EMPHASIS_ENERGY_FACTOR * peak_energy;
        let frame_count = energies.len();
        let pause_frames = energies.iter().filter(|&&e| e < pause_threshold).count();
        let emphasis_frames = energies.iter().filter(|&&e| e > emphasis_threshold).count();

        let duration = samples.len() as f32 / sample_rate as f32;
        let onsets = onset::detect_onsets(&energies);
        let estimated_syllable_count = onsets.len();
        let speech_rate = if duration > 0.0 {
            estimated_syllable_count as f32 / duration
        } else {
            0.0
        };

        AcousticDescriptorSet {
            pitch_variability: stats::std_dev(&pitches),
            energy_variability: stats::std_dev(&energies),
            pitch_series,
            energy_series,
            speech_rate,
            pause_ratio: ratio(pause_frames, frame_count),
            emphasis_ratio: ratio(emphasis_frames, frame_count),
            duration,
            estimated_syllable_count,
        }
    }
}

fn ratio(count: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    count as f32 / total as f32
}

/// Frame (start, end) pairs. Input shorter than one frame becomes a single
/// short frame so brief recordings still yield a contour.
fn frame_bounds(len: usize, frame_len: usize, hop_len: usize) -> Vec<(usize, usize)> {
    if len == 0 || frame_len == 0 || hop_len == 0 {
        return Vec::new();
    }
    if len <= frame_len {
        return vec![(0, len)];
    }
    let mut bounds = Vec::new();
    let mut start = 0;
    while start + frame_len <= len {
        bounds.push((start, start + frame_len));
        start += hop_len;
    }
    bounds
}

pub(crate) fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
    (sum_sq / frame.len() as f32).sqrt()
}
