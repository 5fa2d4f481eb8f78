#[cfg(feature = "whisper-rs")]
mod whisper;

#[cfg(feature = "whisper-rs")]
pub use whisper::WhisperTranscriber;

use crate::decode::DecodedAudio;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

/// Output of the speech-to-text collaborator. Empty or whitespace-only text
/// is the "no transcript available" sentinel: it disables content-accuracy
/// scoring but never fails an analysis.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub confidence: Option<f32>,
}

impl Transcript {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TranscribeError {
    #[error("transcription model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("transcription failed: {0}")]
    Failed(String),

    #[error("unsupported input format: expected {expected_hz} Hz mono, got {got_hz} Hz")]
    UnsupportedFormat { expected_hz: u32, got_hz: u32 },
}

pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: DecodedAudio) -> BoxFuture<'_, Result<Transcript, TranscribeError>>;
}

impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    fn transcribe(&self, audio: DecodedAudio) -> BoxFuture<'_, Result<Transcript, TranscribeError>> {
        (**self).transcribe(audio)
    }
}

/// Always reports "no transcript": the default collaborator for builds
/// without an ASR backend.
#[derive(Clone, Debug, Default)]
pub struct NullTranscriber;

impl NullTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl Transcriber for NullTranscriber {
    fn transcribe(&self, _audio: DecodedAudio) -> BoxFuture<'_, Result<Transcript, TranscribeError>> {
        async move { Ok(Transcript::unavailable()) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_is_unusable() {
        assert!(!Transcript::unavailable().is_usable());
        let blank = Transcript {
            text: "   \n".to_owned(),
            confidence: None,
        };
        assert!(!blank.is_usable());
    }

    #[test]
    fn nonempty_transcript_is_usable() {
        let t = Transcript {
            text: "hello there".to_owned(),
            confidence: Some(0.9),
        };
        assert!(t.is_usable());
    }

    #[tokio::test]
    async fn null_transcriber_returns_sentinel() {
        let t = NullTranscriber::new()
            .transcribe(DecodedAudio::default())
            .await
            .expect("never fails");
        assert!(!t.is_usable());
    }
}
