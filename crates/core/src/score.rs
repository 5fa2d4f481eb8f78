//! Composite expressiveness scoring.
//!
//! The normalization curves and weights are a calibration contract: scores
//! must stay comparable with previously stored analyses, so the constants
//! here are not tunable.

use crate::features::AcousticDescriptorSet;

pub const PITCH_WEIGHT: f32 = 0.35;
pub const ENERGY_WEIGHT: f32 = 0.25;
pub const RATE_WEIGHT: f32 = 0.15;
pub const PAUSE_WEIGHT: f32 = 0.15;
pub const EMOTION_WEIGHT: f32 = 0.10;

/// Pitch variability saturates at 50 Hz of standard deviation.
pub fn pitch_score(pitch_variability: f32) -> f32 {
    (pitch_variability / 50.0).clamp(0.0, 1.0)
}

/// Energy variability saturates at 0.2 RMS of standard deviation.
pub fn energy_score(energy_variability: f32) -> f32 {
    (energy_variability / 0.2).clamp(0.0, 1.0)
}

/// Peaks at 3.5 syllables/sec; linear ramps below 2.0 and above 5.0.
pub fn rate_score(speech_rate: f32) -> f32 {
    let raw = if speech_rate < 2.0 {
        speech_rate / 2.0
    } else if speech_rate > 5.0 {
        (1.0 - (speech_rate - 5.0) / 3.0).max(0.0)
    } else {
        1.0 - (speech_rate - 3.5).abs() / 1.5
    };
    raw.clamp(0.0, 1.0)
}

/// Full credit between 0.15 and 0.30; ramps off on both sides.
pub fn pause_score(pause_ratio: f32) -> f32 {
    if pause_ratio < 0.15 {
        pause_ratio / 0.15
    } else if pause_ratio > 0.3 {
        (1.0 - (pause_ratio - 0.3) / 0.2).max(0.0)
    } else {
        1.0
    }
}

/// Weighted composite in [0, 100].
///
/// `emotion_confidence` is the confidence of the profile's primary emotion
/// and is already in [0, 1].
pub fn expressiveness_score(descriptors: &AcousticDescriptorSet, emotion_confidence: f32) -> f32 {
    let weighted = PITCH_WEIGHT * pitch_score(descriptors.pitch_variability)
        + ENERGY_WEIGHT * energy_score(descriptors.energy_variability)
        + RATE_WEIGHT * rate_score(descriptors.speech_rate)
        + PAUSE_WEIGHT * pause_score(descriptors.pause_ratio)
        + EMOTION_WEIGHT * emotion_confidence;
    (weighted * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(
        pitch_variability: f32,
        energy_variability: f32,
        speech_rate: f32,
        pause_ratio: f32,
    ) -> AcousticDescriptorSet {
        AcousticDescriptorSet {
            pitch_variability,
            energy_variability,
            speech_rate,
            pause_ratio,
            ..Default::default()
        }
    }

    #[test]
    fn pitch_score_saturates_at_50() {
        assert_eq!(pitch_score(50.0), 1.0);
        assert_eq!(pitch_score(80.0), 1.0);
        assert_eq!(pitch_score(500.0), 1.0);
        assert!((pitch_score(25.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn energy_score_saturates_at_0_2() {
        assert_eq!(energy_score(0.2), 1.0);
        assert_eq!(energy_score(0.9), 1.0);
        assert!((energy_score(0.1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rate_score_peaks_at_3_5() {
        assert_eq!(rate_score(3.5), 1.0);
        assert_eq!(rate_score(0.0), 0.0);
    }

    #[test]
    fn rate_score_tails_reach_zero() {
        assert_eq!(rate_score(8.0), 0.0);
        assert_eq!(rate_score(10.0), 0.0);
    }

    #[test]
    fn rate_score_boundary_values_follow_the_calibration() {
        // The calibrated curve steps down at 2.0 and back up past 5.0.
        assert!((rate_score(1.99) - 0.995).abs() < 1e-3);
        assert_eq!(rate_score(2.0), 0.0);
        assert_eq!(rate_score(5.0), 0.0);
        assert!((rate_score(5.01) - 0.996_666).abs() < 1e-3);
    }

    #[test]
    fn pause_score_plateau() {
        assert_eq!(pause_score(0.15), 1.0);
        assert_eq!(pause_score(0.22), 1.0);
        assert_eq!(pause_score(0.3), 1.0);
        assert!((pause_score(0.075) - 0.5).abs() < 1e-6);
        assert_eq!(pause_score(0.5), 0.0);
    }

    #[test]
    fn score_monotone_in_pitch_variability() {
        let mut last = -1.0;
        for pv in [0.0, 5.0, 15.0, 30.0, 45.0, 50.0, 70.0] {
            let s = expressiveness_score(&descriptors(pv, 0.05, 3.5, 0.2), 0.5);
            assert!(s >= last, "pitch {pv} scored {s} < {last}");
            last = s;
        }
    }

    #[test]
    fn score_monotone_in_energy_variability() {
        let mut last = -1.0;
        for ev in [0.0, 0.02, 0.05, 0.1, 0.2, 0.4] {
            let s = expressiveness_score(&descriptors(20.0, ev, 3.5, 0.2), 0.5);
            assert!(s >= last, "energy {ev} scored {s} < {last}");
            last = s;
        }
    }

    #[test]
    fn score_monotone_in_emotion_confidence() {
        let d = descriptors(20.0, 0.05, 3.5, 0.2);
        let mut last = -1.0;
        for c in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let s = expressiveness_score(&d, c);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn score_stays_in_range_for_degenerate_input() {
        let zero = AcousticDescriptorSet::default();
        let s = expressiveness_score(&zero, 0.0);
        assert!((0.0..=100.0).contains(&s));
        let max = expressiveness_score(&descriptors(500.0, 5.0, 3.5, 0.2), 1.0);
        assert!(max <= 100.0);
    }

    #[test]
    fn calibrated_example_scores_83_5() {
        let d = descriptors(45.0, 0.12, 3.6, 0.18);
        assert!((pitch_score(d.pitch_variability) - 0.9).abs() < 1e-6);
        assert!((energy_score(d.energy_variability) - 0.6).abs() < 1e-6);
        assert!((rate_score(d.speech_rate) - 0.933_333).abs() < 1e-3);
        assert_eq!(pause_score(d.pause_ratio), 1.0);
        let s = expressiveness_score(&d, 0.8);
        assert!((s - 83.5).abs() < 0.01, "got {s}");
    }
}
