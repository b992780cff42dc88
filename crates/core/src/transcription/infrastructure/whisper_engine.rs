use std::path::{Path, PathBuf};
use std::sync::Mutex;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_reader::AudioReader;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::decoding_options::DecodingOptions;
use crate::transcription::domain::segment::Segment;
use crate::transcription::domain::transcript::Transcript;
use crate::transcription::domain::transcription_engine::{InferenceError, TranscriptionEngine};

/// Speech-to-text with whisper.cpp via whisper-rs.
///
/// The model is loaded once in [`WhisperEngine::new`] and kept for the life
/// of the engine. Inference holds the context lock, so concurrent callers
/// are served one at a time.
pub struct WhisperEngine {
    model_path: PathBuf,
    context: Mutex<WhisperContext>,
    reader: Box<dyn AudioReader>,
    options: DecodingOptions,
}

impl WhisperEngine {
    pub fn new(
        model_path: &Path,
        reader: Box<dyn AudioReader>,
        options: DecodingOptions,
    ) -> Result<Self, InferenceError> {
        options.validate()?;
        if !model_path.is_file() {
            return Err(InferenceError::ModelLoad(format!(
                "Whisper model not found at: {}",
                model_path.display()
            )));
        }

        let path_str = model_path
            .to_str()
            .ok_or_else(|| InferenceError::ModelLoad("model path is not valid UTF-8".into()))?;

        log::info!("Loading Whisper model {}", model_path.display());
        let context = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?;

        Ok(Self {
            model_path: model_path.to_path_buf(),
            context: Mutex::new(context),
            reader,
            options,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn options(&self) -> &DecodingOptions {
        &self.options
    }
}

impl TranscriptionEngine for WhisperEngine {
    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, InferenceError> {
        let audio = self.reader.read_audio(audio_path, WHISPER_SAMPLE_RATE)?;
        if audio.is_empty() {
            log::warn!("{} decoded to zero samples", audio_path.display());
            return Ok(Transcript::default());
        }

        let context = self
            .context
            .lock()
            .map_err(|_| InferenceError::Model("whisper context lock poisoned".into()))?;
        let mut state = context
            .create_state()
            .map_err(|e| InferenceError::Model(format!("failed to create state: {e}")))?;

        let language = self.options.language_code();
        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: self.options.beam_size as i32,
            patience: -1.0,
        });
        params.set_language(Some(&language));
        params.set_translate(false);
        params.set_n_threads(self.options.effective_threads() as i32);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        log::debug!(
            "Whisper decode: language={language} beam_size={} best_of={} samples={}",
            self.options.beam_size,
            self.options.best_of,
            audio.samples().len()
        );

        state
            .full(params, audio.samples())
            .map_err(|e| InferenceError::Model(format!("inference failed: {e}")))?;

        let mut raw = Vec::new();
        for seg_idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(seg_idx) else {
                continue;
            };
            let text = segment
                .to_str_lossy()
                .map(|cow| cow.into_owned())
                .unwrap_or_default();
            raw.push((segment.start_timestamp(), segment.end_timestamp(), text));
        }

        Ok(build_transcript(raw))
    }
}

/// Turns raw model segments (timestamps in 10 ms units) into a transcript.
///
/// Segments with blank text or a non-positive span are dropped; the full
/// text still includes whatever the model emitted.
fn build_transcript(raw: Vec<(i64, i64, String)>) -> Transcript {
    let mut text = String::new();
    let mut segments = Vec::with_capacity(raw.len());

    for (t0, t1, seg_text) in raw {
        text.push_str(&seg_text);
        let start = t0.max(0) as f64 / 100.0;
        let end = t1.max(0) as f64 / 100.0;
        match Segment::new(start, end, &seg_text) {
            Some(segment) => segments.push(segment),
            None => log::debug!("Dropping segment [{start:.2}, {end:.2}] {seg_text:?}"),
        }
    }

    Transcript::new(text.trim(), segments)
}
