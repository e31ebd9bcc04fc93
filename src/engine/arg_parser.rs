//! Command line flags. Every setting is optional so `coalescer.toml` and the env can fill it.

use clap::Parser;
use std::path::PathBuf;

/// Sort photos into per-person folders using a face recognition service.
///
/// Every flag can also come from `coalescer.toml` (`[settings]`) in the working directory;
/// flags win. The service URL may also be set with `COALESCER_FACEBOX_URL` or a `.env` file.
#[derive(Clone, Parser)]
#[command(name = "coalescer")]
#[command(about = "Sort photos into per-person folders using a face recognition service.")]
pub struct Cli {
    /// Directory with reference photos named <person>_<anything>.<jpg|png>.
    #[arg(long = "peopledir", value_name = "DIR")]
    pub people_dir: Option<PathBuf>,

    /// Directory with the photos to sort (walked recursively).
    #[arg(long = "picsdir", value_name = "DIR")]
    pub pics_dir: Option<PathBuf>,

    /// Where the per-person folders are created. Default: current directory.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// URL of the recognition service, e.g. http://localhost:8080.
    #[arg(long = "faceboxurl", value_name = "URL")]
    pub facebox_url: Option<String>,

    /// Minimum match confidence as a percentage between 1 and 99 (default 50).
    #[arg(long, value_parser = clap::value_parser!(f64))]
    pub confidence: Option<f64>,

    /// Comma separated names that must all appear in a photo (at least two).
    #[arg(long)]
    pub combine: Option<String>,

    /// Pause after teaching so the service can assimilate the reference photos.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub cooldown: Option<bool>,

    /// With --combine: only match photos where nobody else appears.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub rigid: Option<bool>,

    /// Number of concurrent recognition workers.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Timeout for each recognition request, in seconds.
    #[arg(long, short = 't', value_parser = clap::value_parser!(u64))]
    pub timeout: Option<u64>,

    /// List every copied and failed photo at the end.
    #[arg(long, short = 'l', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub list: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
