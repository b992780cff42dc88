use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;

use super::duration_policy::DurationPolicy;
use super::pipeline_logger::PipelineLogger;
use super::run_outcome::{PipelineError, RunOutcome};
use super::run_stage::RunStage;
use super::transcription_bundle::TranscriptionBundle;
use crate::media::domain::audio_normalizer::{AudioNormalizer, NormalizationProfile};
use crate::media::domain::media_prober::MediaProber;
use crate::shared::constants::AUDIO_EXTENSIONS;
use crate::shared::media_file::MediaFile;
use crate::subtitles::domain::subtitle_document::SubtitleFormat;
use crate::subtitles::domain::subtitle_writer::{render, SubtitleWriter};
use crate::transcription::domain::transcript::Transcript;
use crate::transcription::domain::transcription_engine::{InferenceError, TranscriptionEngine};

/// Upload-to-subtitles pipeline:
/// validate → probe → duration check → normalize → transcribe → render.
///
/// Every run gets its own scratch directory, so one instance can serve
/// concurrent callers; the engine decides how inference itself is shared.
pub struct TranscribeUseCase {
    prober: Box<dyn MediaProber>,
    normalizer: Box<dyn AudioNormalizer>,
    engine: Arc<dyn TranscriptionEngine>,
    writer: Box<dyn SubtitleWriter>,
    policy: DurationPolicy,
    accepted_extensions: Vec<String>,
    normalized_file_name: String,
    inference_timeout: Option<Duration>,
    scratch_root: Option<PathBuf>,
}

impl TranscribeUseCase {
    pub fn new(
        prober: Box<dyn MediaProber>,
        normalizer: Box<dyn AudioNormalizer>,
        engine: Arc<dyn TranscriptionEngine>,
        writer: Box<dyn SubtitleWriter>,
        policy: DurationPolicy,
    ) -> Self {
        Self {
            prober,
            normalizer,
            engine,
            writer,
            policy,
            accepted_extensions: AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            normalized_file_name: NormalizationProfile::default().output_file_name(),
            inference_timeout: None,
            scratch_root: None,
        }
    }

    pub fn with_accepted_extensions(mut self, extensions: Vec<String>) -> Self {
        self.accepted_extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    pub fn with_normalized_file_name(mut self, name: impl Into<String>) -> Self {
        self.normalized_file_name = name.into();
        self
    }

    pub fn with_inference_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.inference_timeout = timeout;
        self
    }

    /// Parent directory for per-run scratch dirs (system temp dir if unset).
    pub fn with_scratch_root(mut self, root: PathBuf) -> Self {
        self.scratch_root = Some(root);
        self
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.policy
    }

    /// Runs the whole pipeline for one uploaded file.
    pub fn execute(&self, input: &Path, logger: &mut dyn PipelineLogger) -> RunOutcome {
        match self.run(input, logger) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Run failed for {}: {err}", input.display());
                logger.info(&err.user_message());
                RunOutcome::Failed(err)
            }
        }
    }

    fn run(
        &self,
        input: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<RunOutcome, PipelineError> {
        logger.stage(RunStage::Received);
        let media = self.validate_input(input)?;

        // 1. Probe and enforce the ceiling before any expensive work
        let started = Instant::now();
        let duration = self.prober.probe_duration(media.path())?;
        let media = media.with_duration(duration);
        logger.timing("probe", elapsed_ms(started));
        logger.metric("source_duration_secs", duration);
        logger.stage(RunStage::Probed);

        if let Err(rejection) = self.policy.check(duration) {
            logger.info(&format!(
                "Rejected {}: {duration:.1}s exceeds {:.1}s",
                media.path().display(),
                rejection.max_duration_secs
            ));
            logger.stage(RunStage::Rejected);
            return Ok(RunOutcome::Rejected(rejection));
        }

        // 2. Normalize into a scratch dir owned by this run only. Any early
        //    return below drops `workspace` and deletes it.
        let workspace = self.create_workspace()?;
        let normalized = workspace.path().join(&self.normalized_file_name);
        let started = Instant::now();
        self.normalizer.normalize(media.path(), &normalized)?;
        logger.timing("normalize", elapsed_ms(started));
        logger.stage(RunStage::Normalized);

        // 3. Transcribe
        let started = Instant::now();
        let transcript = self.transcribe(&normalized)?;
        logger.timing("transcribe", elapsed_ms(started));
        logger.metric("segments", transcript.segments.len() as f64);
        logger.stage(RunStage::Transcribed);

        // 4. Render each format on its own; one failing format does not
        //    affect the others
        let started = Instant::now();
        let mut bundle = TranscriptionBundle::new(workspace, transcript, normalized);
        for &format in SubtitleFormat::ALL {
            self.render_format(format, &mut bundle);
        }
        logger.timing("render", elapsed_ms(started));
        logger.stage(RunStage::Rendered);

        logger.info(&format!(
            "Transcribed {} into {} segments",
            media.path().display(),
            bundle.segments().len()
        ));
        logger.stage(RunStage::Completed);
        Ok(RunOutcome::Completed(bundle))
    }

    fn validate_input(&self, input: &Path) -> Result<MediaFile, PipelineError> {
        if !input.is_file() {
            return Err(PipelineError::MissingInput(input.to_path_buf()));
        }
        let media = MediaFile::new(input);
        let extension = media.extension();
        let accepted = extension
            .as_ref()
            .map(|ext| self.accepted_extensions.iter().any(|a| a == ext))
            .unwrap_or(false);
        if !accepted {
            return Err(PipelineError::UnsupportedInput {
                path: input.to_path_buf(),
                extension,
            });
        }
        Ok(media)
    }

    fn create_workspace(&self) -> Result<tempfile::TempDir, PipelineError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("scribe-run-");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        dir.map_err(PipelineError::Workspace)
    }

    fn transcribe(&self, audio: &Path) -> Result<Transcript, InferenceError> {
        let Some(limit) = self.inference_timeout else {
            return self.engine.transcribe(audio);
        };

        // The model call can't be interrupted, so it runs on a worker and
        // is abandoned if the deadline passes first.
        let engine = Arc::clone(&self.engine);
        let audio = audio.to_path_buf();
        let (tx, rx) = crossbeam_channel::bounded(1);
        thread::Builder::new()
            .name("transcribe".to_string())
            .spawn(move || {
                let _ = tx.send(engine.transcribe(&audio));
            })
            .map_err(|e| InferenceError::Model(format!("failed to start worker: {e}")))?;

        match rx.recv_timeout(limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(InferenceError::Timeout(limit)),
            Err(RecvTimeoutError::Disconnected) => Err(InferenceError::WorkerLost),
        }
    }

    fn render_format(&self, format: SubtitleFormat, bundle: &mut TranscriptionBundle) {
        let Some(document) = render(format, bundle.segments()) else {
            return;
        };
        match self.writer.write(bundle.workspace_dir(), &document) {
            Ok(path) => bundle.set_subtitle_path(format, path),
            Err(err) => {
                log::warn!("{format} output skipped: {err}");
                bundle.render_failures.push(err);
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::domain::audio_normalizer::TranscodeError;
    use crate::media::domain::media_prober::ProbeError;
    use crate::pipeline::pipeline_logger::{LogPipelineLogger, NullPipelineLogger};
    use crate::subtitles::domain::subtitle_document::SubtitleDocument;
    use crate::subtitles::domain::subtitle_writer::RenderError;
    use crate::subtitles::infrastructure::subtitle_file_writer::FileSubtitleWriter;
    use crate::transcription::domain::segment::{is_ordered, Segment};
    use rstest::rstest;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    // ─── Stubs ───

    struct StubProber {
        duration: f64,
        calls: Arc<AtomicUsize>,
    }

    impl MediaProber for StubProber {
        fn probe_duration(&self, _: &Path) -> Result<f64, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.duration)
        }
    }

    struct FailingProber;

    impl MediaProber for FailingProber {
        fn probe_duration(&self, _: &Path) -> Result<f64, ProbeError> {
            Err(ProbeError::MissingDuration)
        }
    }

    struct StubNormalizer {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl AudioNormalizer for StubNormalizer {
        fn normalize(&self, _: &Path, dest: &Path) -> Result<(), TranscodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranscodeError::Failed {
                    tool: "ffmpeg".to_string(),
                    code: Some(1),
                    stderr: "boom".to_string(),
                });
            }
            fs::write(dest, b"normalized").unwrap();
            Ok(())
        }
    }

    struct StubEngine {
        transcript: Transcript,
        calls: Arc<AtomicUsize>,
        delay: Option<Duration>,
    }

    impl TranscriptionEngine for StubEngine {
        fn transcribe(&self, audio: &Path) -> Result<Transcript, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(audio.exists(), "engine must see the normalized file");
            if let Some(delay) = self.delay {
                thread::sleep(delay);
            }
            Ok(self.transcript.clone())
        }
    }

    struct FailingEngine;

    impl TranscriptionEngine for FailingEngine {
        fn transcribe(&self, _: &Path) -> Result<Transcript, InferenceError> {
            Err(InferenceError::Model("out of memory".to_string()))
        }
    }

    /// Writes every format except one, which always fails.
    struct FlakyWriter {
        broken: SubtitleFormat,
    }

    impl SubtitleWriter for FlakyWriter {
        fn write(&self, dir: &Path, doc: &SubtitleDocument) -> Result<PathBuf, RenderError> {
            if doc.format == self.broken {
                return Err(RenderError::Write {
                    format: doc.format,
                    path: dir.join(doc.format.file_name()),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            FileSubtitleWriter.write(dir, doc)
        }
    }

    struct Harness {
        probe_calls: Arc<AtomicUsize>,
        normalize_calls: Arc<AtomicUsize>,
        engine_calls: Arc<AtomicUsize>,
        input_dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                probe_calls: Arc::new(AtomicUsize::new(0)),
                normalize_calls: Arc::new(AtomicUsize::new(0)),
                engine_calls: Arc::new(AtomicUsize::new(0)),
                input_dir: TempDir::new().unwrap(),
            }
        }

        fn input(&self, name: &str) -> PathBuf {
            let path = self.input_dir.path().join(name);
            fs::write(&path, b"fake audio").unwrap();
            path
        }

        fn use_case(&self, duration: f64, transcript: Transcript) -> TranscribeUseCase {
            self.use_case_with(duration, transcript, None, false)
        }

        fn use_case_with(
            &self,
            duration: f64,
            transcript: Transcript,
            delay: Option<Duration>,
            fail_normalize: bool,
        ) -> TranscribeUseCase {
            TranscribeUseCase::new(
                Box::new(StubProber {
                    duration,
                    calls: self.probe_calls.clone(),
                }),
                Box::new(StubNormalizer {
                    calls: self.normalize_calls.clone(),
                    fail: fail_normalize,
                }),
                Arc::new(StubEngine {
                    transcript,
                    calls: self.engine_calls.clone(),
                    delay,
                }),
                Box::new(FileSubtitleWriter),
                DurationPolicy::new(5400.0),
            )
        }

        fn counts(&self) -> (usize, usize, usize) {
            (
                self.probe_calls.load(Ordering::SeqCst),
                self.normalize_calls.load(Ordering::SeqCst),
                self.engine_calls.load(Ordering::SeqCst),
            )
        }
    }

    fn one_sentence() -> Transcript {
        Transcript::new(
            " The quick brown fox jumps over the lazy dog.",
            vec![Segment::new(0.0, 4.2, " The quick brown fox jumps over the lazy dog.").unwrap()],
        )
    }

    fn three_segments() -> Transcript {
        Transcript::new(
            "One. Two. Three.",
            vec![
                Segment::new(0.0, 1.0, "One.").unwrap(),
                Segment::new(1.0, 2.5, "Two.").unwrap(),
                Segment::new(2.5, 4.0, "Three.").unwrap(),
            ],
        )
    }

    // ─── Duration policy ───

    #[test]
    fn test_over_ceiling_rejects_without_normalizing_or_transcribing() {
        let h = Harness::new();
        for duration in [5400.5, 5800.0, 100_000.0] {
            let uc = h.use_case(duration, one_sentence());
            let outcome = uc.execute(&h.input("long.mp3"), &mut NullPipelineLogger);
            assert!(matches!(outcome, RunOutcome::Rejected(_)));
            assert!(outcome.bundle().is_none());
            assert!(outcome.message().unwrap().contains("90 minutes"));
        }
        let (probes, normalizes, inferences) = h.counts();
        assert_eq!(probes, 3);
        assert_eq!(normalizes, 0);
        assert_eq!(inferences, 0);
    }

    #[test]
    fn test_at_or_below_ceiling_runs_each_step_once() {
        for duration in [1.0, 10.0, 5400.0] {
            let h = Harness::new();
            let uc = h.use_case(duration, one_sentence());
            let outcome = uc.execute(&h.input("talk.wav"), &mut NullPipelineLogger);
            assert!(outcome.is_completed(), "duration {duration} should run");
            assert_eq!(h.counts(), (1, 1, 1));
        }
    }

    // ─── End to end ───

    #[test]
    fn test_single_sentence_produces_one_segment_and_three_documents() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let outcome = uc.execute(&h.input("clip.m4a"), &mut NullPipelineLogger);

        let bundle = outcome.into_bundle().expect("completed");
        assert_eq!(bundle.segments().len(), 1);
        assert!(!bundle.text().trim().is_empty());
        assert!(bundle.normalized_audio.exists());
        assert!(bundle.render_failures.is_empty());

        let srt = fs::read_to_string(bundle.srt_path.as_ref().unwrap()).unwrap();
        let vtt = fs::read_to_string(bundle.vtt_path.as_ref().unwrap()).unwrap();
        let txt = fs::read_to_string(bundle.txt_path.as_ref().unwrap()).unwrap();
        assert!(srt.contains("00:00:00,000 --> 00:00:04,200"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:04.200"));
        assert!(txt.starts_with("[00:00:00,000 --> 00:00:04,200] The quick"));
    }

    #[test]
    fn test_segments_keep_engine_order() {
        let h = Harness::new();
        let uc = h.use_case(10.0, three_segments());
        let bundle = uc
            .execute(&h.input("talk.flac"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        assert_eq!(bundle.segments(), three_segments().segments.as_slice());
        assert!(is_ordered(bundle.segments()));
    }

    #[test]
    fn test_zero_segments_completes_without_documents() {
        let h = Harness::new();
        let uc = h.use_case(3.0, Transcript::default());
        let bundle = uc
            .execute(&h.input("silence.ogg"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        assert!(bundle.segments().is_empty());
        assert!(bundle.srt_path.is_none());
        assert!(bundle.vtt_path.is_none());
        assert!(bundle.txt_path.is_none());
        assert!(bundle.render_failures.is_empty());
    }

    #[test]
    fn test_stage_sequence_for_completed_run() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let mut logger = LogPipelineLogger::new();
        uc.execute(&h.input("clip.mp3"), &mut logger);
        assert_eq!(
            logger.stages(),
            &[
                RunStage::Received,
                RunStage::Probed,
                RunStage::Normalized,
                RunStage::Transcribed,
                RunStage::Rendered,
                RunStage::Completed,
            ]
        );
        assert_eq!(logger.metric_for("segments"), Some(1.0));
        assert_eq!(logger.metric_for("source_duration_secs"), Some(10.0));
    }

    #[test]
    fn test_stage_sequence_for_rejected_run() {
        let h = Harness::new();
        let uc = h.use_case(9000.0, one_sentence());
        let mut logger = LogPipelineLogger::new();
        uc.execute(&h.input("clip.mp3"), &mut logger);
        assert_eq!(
            logger.stages(),
            &[RunStage::Received, RunStage::Probed, RunStage::Rejected]
        );
        assert!(logger.stages().last().unwrap().is_terminal());
    }

    // ─── Input validation ───

    #[test]
    fn test_missing_input_fails_before_probing() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let outcome = uc.execute(&h.input_dir.path().join("nope.mp3"), &mut NullPipelineLogger);
        assert!(matches!(outcome, RunOutcome::Failed(PipelineError::MissingInput(_))));
        assert_eq!(outcome.message().as_deref(), Some("No audio file uploaded."));
        assert_eq!(h.counts(), (0, 0, 0));
    }

    #[test]
    fn test_unsupported_extension_fails_before_probing() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let outcome = uc.execute(&h.input("slides.pdf"), &mut NullPipelineLogger);
        assert!(matches!(
            outcome,
            RunOutcome::Failed(PipelineError::UnsupportedInput { .. })
        ));
        assert_eq!(h.counts(), (0, 0, 0));
    }

    #[rstest]
    #[case::m4a("talk.m4a", true)]
    #[case::mp3("talk.mp3", true)]
    #[case::ogg("talk.ogg", true)]
    #[case::wav("talk.wav", true)]
    #[case::aac("talk.aac", true)]
    #[case::flac("talk.flac", true)]
    #[case::upper_case("LOUD.MP3", true)]
    #[case::video("clip.mp4", false)]
    #[case::text("notes.txt", false)]
    #[case::no_extension("recording", false)]
    fn test_default_extensions(#[case] name: &str, #[case] accepted: bool) {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let outcome = uc.execute(&h.input(name), &mut NullPipelineLogger);
        assert_eq!(outcome.is_completed(), accepted, "{name}");
    }

    #[test]
    fn test_custom_extensions_replace_defaults() {
        let h = Harness::new();
        let uc = h
            .use_case(10.0, one_sentence())
            .with_accepted_extensions(vec!["OPUS".to_string()]);
        assert!(uc.execute(&h.input("a.opus"), &mut NullPipelineLogger).is_completed());
        assert!(!uc.execute(&h.input("a.mp3"), &mut NullPipelineLogger).is_completed());
    }

    // ─── Fatal failures ───

    #[test]
    fn test_probe_failure_is_fatal() {
        let h = Harness::new();
        let uc = TranscribeUseCase::new(
            Box::new(FailingProber),
            Box::new(StubNormalizer {
                calls: h.normalize_calls.clone(),
                fail: false,
            }),
            Arc::new(FailingEngine),
            Box::new(FileSubtitleWriter),
            DurationPolicy::new(5400.0),
        );
        let outcome = uc.execute(&h.input("a.wav"), &mut NullPipelineLogger);
        assert!(matches!(outcome, RunOutcome::Failed(PipelineError::Probe(_))));
        assert_eq!(h.normalize_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_transcode_failure_skips_inference_and_cleans_up() {
        let h = Harness::new();
        let scratch = TempDir::new().unwrap();
        let uc = h
            .use_case_with(10.0, one_sentence(), None, true)
            .with_scratch_root(scratch.path().to_path_buf());

        let outcome = uc.execute(&h.input("a.wav"), &mut NullPipelineLogger);
        assert!(matches!(outcome, RunOutcome::Failed(PipelineError::Transcode(_))));
        assert_eq!(outcome.message().as_deref(), Some("The uploaded audio could not be converted."));
        assert_eq!(h.engine_calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_inference_failure_is_fatal_with_no_bundle() {
        let h = Harness::new();
        let scratch = TempDir::new().unwrap();
        let uc = TranscribeUseCase::new(
            Box::new(StubProber {
                duration: 10.0,
                calls: h.probe_calls.clone(),
            }),
            Box::new(StubNormalizer {
                calls: h.normalize_calls.clone(),
                fail: false,
            }),
            Arc::new(FailingEngine),
            Box::new(FileSubtitleWriter),
            DurationPolicy::new(5400.0),
        )
        .with_scratch_root(scratch.path().to_path_buf());

        let outcome = uc.execute(&h.input("a.wav"), &mut NullPipelineLogger);
        assert!(matches!(outcome, RunOutcome::Failed(PipelineError::Inference(_))));
        assert_eq!(outcome.message().as_deref(), Some("Transcription failed."));
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_inference_deadline() {
        let h = Harness::new();
        let uc = h
            .use_case_with(10.0, one_sentence(), Some(Duration::from_millis(500)), false)
            .with_inference_timeout(Some(Duration::from_millis(50)));
        let outcome = uc.execute(&h.input("a.wav"), &mut NullPipelineLogger);
        assert!(matches!(
            outcome,
            RunOutcome::Failed(PipelineError::Inference(InferenceError::Timeout(_)))
        ));
    }

    #[test]
    fn test_inference_within_deadline_completes() {
        let h = Harness::new();
        let uc = h
            .use_case(10.0, one_sentence())
            .with_inference_timeout(Some(Duration::from_secs(10)));
        assert!(uc.execute(&h.input("a.wav"), &mut NullPipelineLogger).is_completed());
    }

    // ─── Per-format isolation ───

    #[test]
    fn test_one_format_failing_does_not_block_others() {
        let h = Harness::new();
        let uc = TranscribeUseCase::new(
            Box::new(StubProber {
                duration: 10.0,
                calls: h.probe_calls.clone(),
            }),
            Box::new(StubNormalizer {
                calls: h.normalize_calls.clone(),
                fail: false,
            }),
            Arc::new(StubEngine {
                transcript: three_segments(),
                calls: h.engine_calls.clone(),
                delay: None,
            }),
            Box::new(FlakyWriter {
                broken: SubtitleFormat::Vtt,
            }),
            DurationPolicy::new(5400.0),
        );

        let bundle = uc
            .execute(&h.input("a.wav"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        assert!(bundle.srt_path.is_some());
        assert!(bundle.vtt_path.is_none());
        assert!(bundle.txt_path.is_some());
        assert_eq!(bundle.render_failures.len(), 1);
        assert!(matches!(
            bundle.render_failures[0],
            RenderError::Write {
                format: SubtitleFormat::Vtt,
                ..
            }
        ));
    }

    // ─── Scratch storage ───

    #[test]
    fn test_normalized_file_named_after_default_profile() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let bundle = uc
            .execute(&h.input("a.wav"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        assert_eq!(
            bundle.normalized_audio,
            bundle
                .workspace_dir()
                .join(NormalizationProfile::default().output_file_name())
        );
    }

    #[test]
    fn test_normalized_file_name_follows_custom_profile() {
        let h = Harness::new();
        let profile = NormalizationProfile {
            codec: "aac".to_string(),
            application: None,
            extension: "m4a".to_string(),
            ..NormalizationProfile::default()
        };
        let uc = h
            .use_case(10.0, one_sentence())
            .with_normalized_file_name(profile.output_file_name());
        let bundle = uc
            .execute(&h.input("a.wav"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        assert_eq!(bundle.normalized_audio.file_name().unwrap(), "normalized.m4a");
    }

    #[test]
    fn test_each_run_gets_its_own_workspace() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let input = h.input("a.wav");
        let first = uc.execute(&input, &mut NullPipelineLogger).into_bundle().unwrap();
        let second = uc.execute(&input, &mut NullPipelineLogger).into_bundle().unwrap();
        assert_ne!(first.workspace_dir(), second.workspace_dir());
        assert_ne!(first.normalized_audio, second.normalized_audio);
    }

    #[test]
    fn test_concurrent_runs_do_not_share_files() {
        let h = Harness::new();
        let uc = Arc::new(h.use_case(10.0, three_segments()));
        let input = h.input("a.wav");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let uc = Arc::clone(&uc);
                let input = input.clone();
                thread::spawn(move || {
                    let bundle = uc
                        .execute(&input, &mut NullPipelineLogger)
                        .into_bundle()
                        .unwrap();
                    (bundle.workspace_dir().to_path_buf(), bundle.segments().len())
                })
            })
            .collect();

        let mut dirs: Vec<PathBuf> = Vec::new();
        for handle in handles {
            let (dir, segments) = handle.join().unwrap();
            assert_eq!(segments, 3);
            dirs.push(dir);
        }
        dirs.sort();
        dirs.dedup();
        assert_eq!(dirs.len(), 4);
    }

    #[test]
    fn test_workspace_removed_when_bundle_dropped() {
        let h = Harness::new();
        let uc = h.use_case(10.0, one_sentence());
        let bundle = uc
            .execute(&h.input("a.wav"), &mut NullPipelineLogger)
            .into_bundle()
            .unwrap();
        let dir = bundle.workspace_dir().to_path_buf();
        let srt = bundle.srt_path.clone().unwrap();
        assert!(srt.exists());
        drop(bundle);
        assert!(!dir.exists());
    }
}
