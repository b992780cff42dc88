pub mod ffmpeg_normalizer;
pub mod ffprobe_prober;
pub mod process_runner;
