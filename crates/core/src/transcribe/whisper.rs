use crate::decode::DecodedAudio;
use crate::transcribe::{TranscribeError, Transcriber, Transcript};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Whisper GGML backend. The model is loaded once at construction and
/// reused read-only; each call gets its own inference state.
#[derive(Clone)]
pub struct WhisperTranscriber {
    context: Arc<WhisperContext>,
}

impl WhisperTranscriber {
    pub fn new(model_path: &str) -> Result<Self, TranscribeError> {
        let context =
            WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
                .map_err(|e| TranscribeError::ModelUnavailable(e.to_string()))?;
        Ok(Self {
            context: Arc::new(context),
        })
    }

    fn transcribe_sync(&self, audio: &DecodedAudio) -> Result<Transcript, TranscribeError> {
        if audio.sample_rate != WHISPER_SAMPLE_RATE {
            return Err(TranscribeError::UnsupportedFormat {
                expected_hz: WHISPER_SAMPLE_RATE,
                got_hz: audio.sample_rate,
            });
        }
        if audio.samples.is_empty() {
            return Ok(Transcript::unavailable());
        }

        let mut state = self
            .context
            .create_state()
            .map_err(|e| TranscribeError::Failed(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &audio.samples)
            .map_err(|e| TranscribeError::Failed(e.to_string()))?;

        let segments = state
            .full_n_segments()
            .map_err(|e| TranscribeError::Failed(e.to_string()))?;
        let mut text = String::new();
        for i in 0..segments {
            let segment = state
                .full_get_segment_text(i)
                .map_err(|e| TranscribeError::Failed(e.to_string()))?;
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(segment.trim());
        }

        Ok(Transcript {
            text,
            confidence: None,
        })
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio: DecodedAudio) -> BoxFuture<'_, Result<Transcript, TranscribeError>> {
        let this = self.clone();
        async move { this.transcribe_sync(&audio) }.boxed()
    }
}
