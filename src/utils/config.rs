//! Application configuration constants.
//! Defaults and thresholds in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived filenames: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    results_filename: String,
    env_facebox_url: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!("{pkg}.toml"),
                results_filename: format!("{pkg}.results"),
                env_facebox_url: format!("{}_FACEBOX_URL", pkg.to_uppercase()),
            }
        })
    }

    /// Optional settings file looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// File the final listing goes to when it is too long for stdout.
    pub fn results_filename(&self) -> &str {
        &self.results_filename
    }

    /// Environment variable holding the recognition service URL.
    pub fn env_facebox_url(&self) -> &str {
        &self.env_facebox_url
    }
}

// ---- Run defaults ----

pub struct Defaults;

impl Defaults {
    /// Raw confidence percentage used when none (or an out-of-range one) is given.
    pub const CONFIDENCE: f64 = 50.0;
    /// Worker pool size.
    pub const WORKERS: usize = 20;
    /// Per-request timeout for recognition calls.
    pub const TIMEOUT_SECS: u64 = 60;
    pub const OUTPUT_DIR: &'static str = ".";
}

/// Accepted raw confidence range, inclusive upper bound; values `<= 0` or above fall back.
pub const CONFIDENCE_MAX_PERCENT: f64 = 99.0;

/// Sleep after the teach phase when cooldown is enabled.
pub const TEACH_COOLDOWN: Duration = Duration::from_secs(10);

// ---- Report output ----

/// When --list is set and more paths than this would be printed, write them to the results file instead.
pub const LIST_THRESHOLD: usize = 100;
