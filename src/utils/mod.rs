pub mod coalescer_toml;
pub mod config;
pub mod env;
pub mod logger;

pub use coalescer_toml::{apply_file_to_opts, load_coalescer_toml};
pub use config::*;
pub use env::facebox_url_from_env;
pub use logger::setup_logging;
