use serde::{Deserialize, Serialize};

pub const DEFAULT_FRAME_LEN: usize = 2048;
pub const DEFAULT_HOP_LEN: usize = 512;
pub const DEFAULT_PITCH_MIN_HZ: f32 = 65.0;
pub const DEFAULT_PITCH_MAX_HZ: f32 = 2100.0;
pub const DEFAULT_TRIM_TOP_DB: f32 = 20.0;
pub const ENV_WHISPER_MODEL_PATH: &str = "VOCAL_COACH_WHISPER_MODEL";

/// Framing and pitch-band parameters for acoustic analysis.
///
/// Pitch and energy contours share the same frame length and hop so that
/// pause and emphasis ratios stay fractions of one frame count.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub frame_len: usize,
    pub hop_len: usize,
    pub pitch_min_hz: f32,
    pub pitch_max_hz: f32,
    pub trim_top_db: f32,
}

impl AnalysisConfig {
    pub fn new(
        frame_len: usize,
        hop_len: usize,
        pitch_min_hz: f32,
        pitch_max_hz: f32,
        trim_top_db: f32,
    ) -> Result<Self, ConfigError> {
        if frame_len == 0 {
            return Err(ConfigError::ZeroFrameLen);
        }
        if hop_len == 0 || hop_len > frame_len {
            return Err(ConfigError::InvalidHop { hop_len, frame_len });
        }
        if pitch_min_hz <= 0.0 || pitch_min_hz >= pitch_max_hz {
            return Err(ConfigError::InvalidPitchRange {
                min_hz: pitch_min_hz,
                max_hz: pitch_max_hz,
            });
        }
        Ok(Self {
            frame_len,
            hop_len,
            pitch_min_hz,
            pitch_max_hz,
            trim_top_db,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_len: DEFAULT_FRAME_LEN,
            hop_len: DEFAULT_HOP_LEN,
            pitch_min_hz: DEFAULT_PITCH_MIN_HZ,
            pitch_max_hz: DEFAULT_PITCH_MAX_HZ,
            trim_top_db: DEFAULT_TRIM_TOP_DB,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("frame length must be > 0")]
    ZeroFrameLen,
    #[error("hop length must be in 1..=frame length (hop {hop_len}, frame {frame_len})")]
    InvalidHop { hop_len: usize, frame_len: usize },
    #[error("pitch band must satisfy 0 < min < max (got {min_hz}..{max_hz} Hz)")]
    InvalidPitchRange { min_hz: f32, max_hz: f32 },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let d = AnalysisConfig::default();
        let built = AnalysisConfig::new(
            d.frame_len,
            d.hop_len,
            d.pitch_min_hz,
            d.pitch_max_hz,
            d.trim_top_db,
        )
        .expect("default constants validate");
        assert_eq!(built, d);
    }

    #[test]
    fn rejects_zero_frame() {
        let err = AnalysisConfig::new(0, 512, 65.0, 2100.0, 20.0).unwrap_err();
        assert_eq!(err, ConfigError::ZeroFrameLen);
    }

    #[test]
    fn rejects_hop_larger_than_frame() {
        let err = AnalysisConfig::new(1024, 2048, 65.0, 2100.0, 20.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHop { .. }));
    }

    #[test]
    fn rejects_inverted_pitch_band() {
        let err = AnalysisConfig::new(2048, 512, 2100.0, 65.0, 20.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPitchRange { .. }));
    }

    #[test]
    fn model_path_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_WHISPER_MODEL_PATH, "/env/model.bin");
        let v = resolve_optional_string(Some("/cli/model.bin".to_owned()), ENV_WHISPER_MODEL_PATH, &env);
        assert_eq!(v.as_deref(), Some("/cli/model.bin"));
    }

    #[test]
    fn model_path_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_WHISPER_MODEL_PATH, "/env/model.bin");
        let v = resolve_optional_string(None, ENV_WHISPER_MODEL_PATH, &env);
        assert_eq!(v.as_deref(), Some("/env/model.bin"));
    }

    #[test]
    fn model_path_absent_when_both_missing() {
        let env = MapEnv::default();
        assert_eq!(resolve_optional_string(None, ENV_WHISPER_MODEL_PATH, &env), None);
    }
}
