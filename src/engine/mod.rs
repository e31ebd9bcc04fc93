//! Engine module: CLI surface, option validation and shared helpers

pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod tools;
pub mod validate;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_opts, handle_run};
pub use tools::{
    SUPPORTED_FORMATS, is_os_hidden_file, normalize_confidence, parse_combination, person_key,
    sniff_image,
};
pub use validate::validate_opts;
