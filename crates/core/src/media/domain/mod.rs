pub mod audio_normalizer;
pub mod media_prober;
