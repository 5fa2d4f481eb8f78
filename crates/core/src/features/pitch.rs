//! Per-frame fundamental-frequency estimation.
//!
//! Energy-gated normalized autocorrelation over a fixed human-voice band.
//! Frames without a confident voiced estimate yield `None` and stay out of
//! the pitch statistics entirely.

/// Frames with mean-square energy below this are treated as unvoiced.
const VOICED_ENERGY_FLOOR: f32 = 1e-4;

/// Minimum normalized autocorrelation for a lag to count as voiced.
const MIN_VOICED_CORRELATION: f32 = 0.3;

#[derive(Clone, Copy, Debug)]
pub struct PitchTracker {
    sample_rate: u32,
    min_lag: usize,
    max_lag: usize,
}

impl PitchTracker {
    pub fn new(sample_rate: u32, min_hz: f32, max_hz: f32) -> Self {
        // Lag band is the inverse of the frequency band.
        let min_lag = ((sample_rate as f32 / max_hz) as usize).max(2);
        let max_lag = (sample_rate as f32 / min_hz) as usize;
        Self {
            sample_rate,
            min_lag,
            max_lag,
        }
    }

    /// Estimate the fundamental of one frame, or `None` when unvoiced.
    pub fn estimate(&self, frame: &[f32]) -> Option<f32> {
        if self.sample_rate == 0 || frame.is_empty() {
            return None;
        }

        let energy = frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32;
        if energy < VOICED_ENERGY_FLOOR {
            return None;
        }

        // The frame must span the whole lag band, otherwise only implausibly
        // short periods would be searchable.
        let max_lag = self.max_lag;
        if self.min_lag >= max_lag || frame.len() / 2 < max_lag {
            return None;
        }

        let r0: f64 = frame.iter().map(|s| f64::from(*s) * f64::from(*s)).sum();
        if r0 < 1e-10 {
            return None;
        }

        let mut best_lag = self.min_lag;
        let mut best_corr = -1.0f64;
        for lag in self.min_lag..max_lag {
            let mut corr = 0.0f64;
            let mut norm = 0.0f64;
            for i in 0..(frame.len() - lag) {
                corr += f64::from(frame[i]) * f64::from(frame[i + lag]);
                norm += f64::from(frame[i + lag]) * f64::from(frame[i + lag]);
            }
            let normalized = if norm > 1e-10 {
                corr / (r0 * norm).sqrt()
            } else {
                0.0
            };
            if normalized > best_corr {
                best_corr = normalized;
                best_lag = lag;
            }
        }

        if best_corr > f64::from(MIN_VOICED_CORRELATION) {
            Some(self.sample_rate as f32 / best_lag as f32)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn sine_frame(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (TAU * freq * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn estimates_sine_frequency_within_tolerance() {
        let tracker = PitchTracker::new(22_050, 65.0, 2100.0);
        let frame = sine_frame(220.0, 22_050, 2048);
        let hz = tracker.estimate(&frame).expect("voiced frame");
        assert!((hz - 220.0).abs() / 220.0 < 0.05, "estimated {hz} Hz");
    }

    #[test]
    fn silence_is_unvoiced() {
        let tracker = PitchTracker::new(22_050, 65.0, 2100.0);
        let frame = vec![0.0f32; 2048];
        assert_eq!(tracker.estimate(&frame), None);
    }

    #[test]
    fn near_silence_is_unvoiced() {
        let tracker = PitchTracker::new(22_050, 65.0, 2100.0);
        let frame = sine_frame(220.0, 22_050, 2048)
            .into_iter()
            .map(|s| s * 1e-3)
            .collect::<Vec<_>>();
        assert_eq!(tracker.estimate(&frame), None);
    }

    #[test]
    fn short_frame_is_unvoiced() {
        let tracker = PitchTracker::new(22_050, 65.0, 2100.0);
        let frame = sine_frame(220.0, 22_050, 32);
        assert_eq!(tracker.estimate(&frame), None);
    }
}
