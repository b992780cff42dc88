use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use scribe_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use scribe_core::media::infrastructure::ffmpeg_normalizer::FfmpegNormalizer;
use scribe_core::media::infrastructure::ffprobe_prober::FfprobeProber;
use scribe_core::pipeline::duration_policy::DurationPolicy;
use scribe_core::pipeline::pipeline_logger::{LogPipelineLogger, PipelineLogger};
use scribe_core::pipeline::run_outcome::RunOutcome;
use scribe_core::pipeline::transcribe_use_case::TranscribeUseCase;
use scribe_core::pipeline::transcription_bundle::TranscriptionBundle;
use scribe_core::shared::config::PipelineConfig;
use scribe_core::shared::model_resolver;
use scribe_core::subtitles::domain::subtitle_document::SubtitleFormat;
use scribe_core::subtitles::domain::timestamp::srt_timestamp;
use scribe_core::subtitles::infrastructure::subtitle_file_writer::FileSubtitleWriter;
use scribe_core::transcription::infrastructure::whisper_engine::WhisperEngine;

const EXIT_FAILED: i32 = 1;
const EXIT_REJECTED: i32 = 2;

/// Transcribe an audio file into text, SRT, WebVTT and timestamped text.
#[derive(Parser)]
#[command(name = "scribe")]
struct Cli {
    /// Input audio file (m4a, mp3, ogg, wav, aac, flac).
    input: PathBuf,

    /// JSON config file (default: <config dir>/Scribe/config.json if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a Whisper ggml model (downloaded to the cache if omitted).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Spoken language code, e.g. "en".
    #[arg(long)]
    language: Option<String>,

    /// Beam width for decoding (best-of follows it unless given).
    #[arg(long)]
    beam_size: Option<u32>,

    /// Best-of candidate count; must equal the beam width.
    #[arg(long)]
    best_of: Option<u32>,

    /// Longest accepted input in seconds.
    #[arg(long)]
    max_duration: Option<f64>,

    /// Abort transcription after this many seconds.
    #[arg(long)]
    inference_timeout: Option<u64>,

    /// Copy the normalized audio and subtitle files into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILED);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let use_case = build_use_case(&cli, &config)?;
    let mut logger = LogPipelineLogger::new();
    let outcome = use_case.execute(&cli.input, &mut logger);
    logger.summary();

    match outcome {
        RunOutcome::Completed(bundle) => {
            if cli.json {
                print_json(&bundle)?;
            } else {
                print_table(&bundle);
            }
            for failure in &bundle.render_failures {
                eprintln!("Warning: {failure}");
            }
            if let Some(dir) = &cli.output_dir {
                for path in bundle.persist_to(dir)? {
                    log::info!("Saved {}", path.display());
                }
            }
            Ok(0)
        }
        RunOutcome::Rejected(rejection) => {
            eprintln!("{rejection}");
            Ok(EXIT_REJECTED)
        }
        RunOutcome::Failed(err) => {
            eprintln!("{}", err.user_message());
            log::error!("{err}");
            Ok(EXIT_FAILED)
        }
    }
}

fn load_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    if let Some(language) = &cli.language {
        config.decoding.language = language.clone();
    }
    if let Some(beam_size) = cli.beam_size {
        config.decoding.beam_size = beam_size;
        config.decoding.best_of = beam_size;
    }
    if let Some(best_of) = cli.best_of {
        config.decoding.best_of = best_of;
    }
    if let Some(max) = cli.max_duration {
        config.max_duration_secs = max;
    }
    if let Some(secs) = cli.inference_timeout {
        config.inference_timeout_secs = Some(secs);
    }
    config.validate()?;
    Ok(config)
}

fn build_use_case(
    cli: &Cli,
    config: &PipelineConfig,
) -> Result<TranscribeUseCase, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", config.model_name);
    let model_path = model_resolver::resolve(
        &config.model_name,
        &config.model_url,
        cli.model.as_deref(),
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let engine = WhisperEngine::new(
        &model_path,
        Box::new(FfmpegAudioReader),
        config.decoding.clone(),
    )?;
    let prober =
        FfprobeProber::new(config.ffprobe_path.clone()).with_timeout(config.probe_timeout());
    let normalizer = FfmpegNormalizer::new(config.ffmpeg_path.clone(), config.normalization.clone())
        .with_timeout(config.transcode_timeout());

    Ok(TranscribeUseCase::new(
        Box::new(prober),
        Box::new(normalizer),
        Arc::new(engine),
        Box::new(FileSubtitleWriter),
        DurationPolicy::new(config.max_duration_secs),
    )
    .with_accepted_extensions(config.accepted_extensions.clone())
    .with_normalized_file_name(config.normalization.output_file_name())
    .with_inference_timeout(config.inference_timeout()))
}

fn print_table(bundle: &TranscriptionBundle) {
    println!("{}", bundle.text());
    println!();

    let segments = bundle.segments();
    if segments.is_empty() {
        println!("(no speech detected)");
    } else {
        let width = segments.len().to_string().len().max(1);
        println!("{:>width$}  {:<12}  {:<12}  Text", "#", "Start", "End");
        for (i, seg) in segments.iter().enumerate() {
            println!(
                "{:>width$}  {:<12}  {:<12}  {}",
                i + 1,
                srt_timestamp(seg.start),
                srt_timestamp(seg.end),
                seg.text
            );
        }
    }

    println!();
    print_path("Normalized audio", &bundle.normalized_audio);
    for &format in SubtitleFormat::ALL {
        if let Some(path) = bundle.subtitle_path(format) {
            print_path(&format.to_string(), path);
        }
    }
}

fn print_path(label: &str, path: &Path) {
    println!("{label:>16}: {}", path.display());
}

fn print_json(bundle: &TranscriptionBundle) -> Result<(), serde_json::Error> {
    let value = serde_json::json!({
        "text": bundle.text(),
        "segments": bundle.segments(),
        "normalized_audio": bundle.normalized_audio,
        "srt": bundle.srt_path,
        "vtt": bundle.vtt_path,
        "txt": bundle.txt_path,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
