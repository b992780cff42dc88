pub mod config;
pub mod constants;
pub mod media_file;
pub mod model_resolver;
