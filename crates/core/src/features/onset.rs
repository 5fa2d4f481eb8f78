//! Syllable-onset estimation from the frame energy contour.
//!
//! Onsets are picked from the half-wave-rectified energy flux: a frame
//! counts when its rise is a local maximum above an adaptive threshold and
//! far enough from the previous pick.

use crate::util::stats;

/// Minimum spacing between picked onsets, in frames (~90 ms at a
/// 22.05 kHz sample rate with a 512-sample hop).
pub const MIN_ONSET_GAP_FRAMES: usize = 4;

/// Indices (into the energy contour) of detected syllable onsets.
pub fn detect_onsets(energies: &[f32]) -> Vec<usize> {
    if energies.len() < 2 {
        return Vec::new();
    }

    let flux: Vec<f32> = energies
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .collect();

    let threshold = stats::mean(&flux) + stats::std_dev(&flux);
    if threshold <= 0.0 {
        // Flat contour: nothing rises, nothing onsets.
        return Vec::new();
    }

    let mut onsets = Vec::new();
    let mut last_pick: Option<usize> = None;
    for i in 0..flux.len() {
        let rising_peak = flux[i] > threshold
            && (i == 0 || flux[i] >= flux[i - 1])
            && (i + 1 == flux.len() || flux[i] >= flux[i + 1]);
        let spaced = last_pick.map_or(true, |l| i - l >= MIN_ONSET_GAP_FRAMES);
        if rising_peak && spaced {
            // flux[i] describes the rise into frame i + 1
            onsets.push(i + 1);
            last_pick = Some(i);
        }
    }
    onsets
}
