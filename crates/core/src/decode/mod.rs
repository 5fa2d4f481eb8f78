use crate::config::DEFAULT_TRIM_TOP_DB;
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// A complete recording, resolved by the caller before analysis: either an
/// in-memory buffer or a file path.
#[derive(Clone, Debug)]
pub enum AudioSource {
    Buffer(Bytes),
    Path(PathBuf),
}

impl AudioSource {
    fn hint(&self) -> Hint {
        let mut hint = Hint::new();
        if let AudioSource::Path(path) = self {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                hint.with_extension(ext);
            }
        }
        hint
    }

    fn into_stream(self) -> Result<MediaSourceStream> {
        let stream = match self {
            AudioSource::Buffer(bytes) => {
                MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default())
            }
            AudioSource::Path(path) => {
                let file = std::fs::File::open(&path)?;
                MediaSourceStream::new(Box::new(file), Default::default())
            }
        };
        Ok(stream)
    }
}

/// Silence-trimmed mono PCM at a known sample rate.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("unreadable audio: {0}")]
    Unreadable(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("no audio track in container")]
    NoAudioTrack,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

pub trait AudioDecoder: Send + Sync {
    fn decode(&self, source: AudioSource) -> BoxFuture<'_, Result<DecodedAudio>>;
}

/// Container/codec decoding via symphonia. Downmixes to mono and trims
/// leading/trailing silence so descriptor durations reflect speech only.
#[derive(Clone, Debug)]
pub struct SymphoniaDecoder {
    trim_top_db: f32,
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self {
            trim_top_db: DEFAULT_TRIM_TOP_DB,
        }
    }
}

impl SymphoniaDecoder {
    pub fn new(trim_top_db: f32) -> Self {
        Self { trim_top_db }
    }

    fn decode_sync(&self, source: AudioSource) -> Result<DecodedAudio> {
        let hint = source.hint();
        let stream = source.into_stream()?;

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| DecodeError::Unreadable(e.to_string()))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoAudioTrack)?;
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

        let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
        let mut channels = track
            .codec_params
            .channels
            .map(|c| c.count())
            .unwrap_or(1);
        let mut interleaved: Vec<f32> = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(DecodeError::Unreadable(e.to_string())),
            };
            if packet.track_id() != track_id {
                continue;
            }
            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count();
                    if sample_buf.is_none() {
                        sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                    }
                    if let Some(buf) = sample_buf.as_mut() {
                        buf.copy_interleaved_ref(decoded);
                        interleaved.extend_from_slice(buf.samples());
                    }
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    // Recoverable per symphonia's contract: skip the packet.
                    tracing::debug!(error = %e, "skipping undecodable packet");
                }
                Err(e) => return Err(DecodeError::Unreadable(e.to_string())),
            }
        }

        let mono = downmix_to_mono(&interleaved, channels);
        let samples = trim_silence(&mono, self.trim_top_db);
        Ok(DecodedAudio {
            sample_rate,
            samples,
        })
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, source: AudioSource) -> BoxFuture<'_, Result<DecodedAudio>> {
        let this = self.clone();
        async move { this.decode_sync(source) }.boxed()
    }
}

pub fn i16_to_f32_pcm(samples: &[i16]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }
    let scale = 1.0f32 / 32768.0f32;
    samples.iter().map(|&s| f32::from(s) * scale).collect()
}

/// Averages interleaved channels down to one.
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => interleaved.to_vec(),
        n => interleaved
            .chunks_exact(n)
            .map(|frame| frame.iter().sum::<f32>() / n as f32)
            .collect(),
    }
}

const TRIM_WINDOW_LEN: usize = 2048;
const TRIM_HOP_LEN: usize = 512;

/// Strips leading and trailing stretches whose RMS sits more than `top_db`
/// below the loudest window. All-silent input trims to empty.
pub fn trim_silence(samples: &[f32], top_db: f32) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let window = TRIM_WINDOW_LEN.min(samples.len());
    let mut window_rms = Vec::new();
    let mut start = 0;
    while start < samples.len() {
        let end = (start + window).min(samples.len());
        window_rms.push(rms(&samples[start..end]));
        if end == samples.len() {
            break;
        }
        start += TRIM_HOP_LEN;
    }

    let peak = window_rms.iter().fold(0.0f32, |a, &b| a.max(b));
    if peak <= 0.0 {
        return Vec::new();
    }
    let threshold = peak * 10f32.powf(-top_db / 20.0);

    let first = window_rms.iter().position(|&r| r > threshold);
    let last = window_rms.iter().rposition(|&r| r > threshold);
    match (first, last) {
        (Some(first), Some(last)) => {
            let begin = first * TRIM_HOP_LEN;
            let end = (last * TRIM_HOP_LEN + window).min(samples.len());
            samples[begin..end].to_vec()
        }
        _ => Vec::new(),
    }
}

fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
    (sum_sq / frame.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i16_to_f32_basic() {
        let v = i16_to_f32_pcm(&[-32768, -1, 0, 1, 32767]);
        assert!((v[0] + 1.0).abs() < 1e-6);
        assert!((v[2] - 0.0).abs() < 1e-6);
        assert!(v[4] <= 1.0);
        assert!(v[4] > 0.9999);
    }

    #[test]
    fn downmix_averages_stereo() {
        let out = downmix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2);
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[test]
    fn downmix_mono_passthrough() {
        let out = downmix_to_mono(&[0.1, 0.2], 1);
        assert_eq!(out, vec![0.1, 0.2]);
    }

    #[test]
    fn trim_silence_drops_all_zero_input() {
        let silence = vec![0.0f32; 10_000];
        assert!(trim_silence(&silence, 20.0).is_empty());
    }

    #[test]
    fn trim_silence_removes_quiet_edges() {
        let mut samples = vec![0.0f32; 8192];
        samples.extend((0..8192).map(|i| (i as f32 * 0.05).sin() * 0.8));
        samples.extend(vec![0.0f32; 8192]);

        let trimmed = trim_silence(&samples, 20.0);
        assert!(!trimmed.is_empty());
        assert!(trimmed.len() < samples.len());
        // The loud middle must survive intact.
        assert!(trimmed.len() >= 8192);
    }

    #[test]
    fn trim_silence_keeps_loud_input() {
        let samples: Vec<f32> = (0..8192).map(|i| (i as f32 * 0.05).sin() * 0.8).collect();
        let trimmed = trim_silence(&samples, 20.0);
        assert_eq!(trimmed.len(), samples.len());
    }

    #[test]
    fn duration_handles_zero_sample_rate() {
        let audio = DecodedAudio {
            sample_rate: 0,
            samples: vec![0.0; 100],
        };
        assert_eq!(audio.duration_seconds(), 0.0);
    }

    #[test]
    fn decode_rejects_garbage_buffer() {
        let decoder = SymphoniaDecoder::default();
        let garbage = AudioSource::Buffer(Bytes::from_static(&[0x00, 0x01, 0x02, 0x03]));
        let err = decoder.decode_sync(garbage).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Unreadable(_) | DecodeError::UnsupportedFormat(_)
        ));
    }
}
