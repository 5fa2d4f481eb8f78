#![deny(warnings)]

use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vocal_coach_core::config::{
    resolve_optional_string, AnalysisConfig, StdEnv, ENV_WHISPER_MODEL_PATH,
};
use vocal_coach_core::decode::{AudioSource, SymphoniaDecoder};
use vocal_coach_core::emotion::KeywordEmotionClassifier;
use vocal_coach_core::pipeline::AnalysisPipeline;
use vocal_coach_core::transcribe::{NullTranscriber, Transcriber};

#[derive(Parser, Debug)]
#[command(name = "vocal-coach")]
#[command(about = "Analyze a recorded delivery and print coaching feedback as JSON")]
#[command(group(
    ArgGroup::new("target")
        .required(false)
        .multiple(false)
        .args(["target_text", "target_text_file"])
))]
struct Args {
    /// Recording to analyze
    #[arg(long)]
    audio: PathBuf,

    /// Reference recording to compare against
    #[arg(long)]
    benchmark: Option<PathBuf>,

    /// Text the speaker was supposed to deliver
    #[arg(long)]
    target_text: Option<String>,

    /// File containing the target text
    #[arg(long)]
    target_text_file: Option<PathBuf>,

    /// Whisper GGML model path (requires the whisper-rs build feature);
    /// falls back to the VOCAL_COACH_WHISPER_MODEL environment variable
    #[arg(long)]
    whisper_model: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let target_text = resolve_target_text(&args)?;
    let env = StdEnv;
    let model_path = resolve_optional_string(args.whisper_model.clone(), ENV_WHISPER_MODEL_PATH, &env);

    let pipeline = AnalysisPipeline::new(
        SymphoniaDecoder::default(),
        build_transcriber(model_path)?,
        KeywordEmotionClassifier::new(),
        AnalysisConfig::default(),
    );

    let audio = AudioSource::Path(args.audio.clone());
    let json = match &args.benchmark {
        Some(benchmark) => {
            let review = pipeline
                .review_against_benchmark(
                    audio,
                    AudioSource::Path(benchmark.clone()),
                    target_text.as_deref(),
                )
                .await
                .context("comparative analysis failed")?;
            to_json(&review, args.pretty)?
        }
        None => {
            let review = pipeline
                .review(audio, target_text.as_deref())
                .await
                .context("analysis failed")?;
            to_json(&review, args.pretty)?
        }
    };
    println!("{json}");

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn resolve_target_text(args: &Args) -> anyhow::Result<Option<String>> {
    if let Some(text) = &args.target_text {
        return Ok(Some(text.clone()));
    }
    match &args.target_text_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading target text from {}", path.display()))?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

#[cfg(feature = "whisper-rs")]
fn build_transcriber(model_path: Option<String>) -> anyhow::Result<Box<dyn Transcriber>> {
    match model_path {
        Some(path) => {
            let whisper = vocal_coach_core::transcribe::WhisperTranscriber::new(&path)
                .with_context(|| format!("loading whisper model from {path}"))?;
            Ok(Box::new(whisper))
        }
        None => {
            tracing::warn!("no whisper model configured; content accuracy will be unavailable");
            Ok(Box::new(NullTranscriber::new()))
        }
    }
}

#[cfg(not(feature = "whisper-rs"))]
fn build_transcriber(model_path: Option<String>) -> anyhow::Result<Box<dyn Transcriber>> {
    if model_path.is_some() {
        tracing::warn!(
            "this build has no whisper support; rebuild with --features whisper-rs to transcribe"
        );
    }
    Ok(Box::new(NullTranscriber::new()))
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
