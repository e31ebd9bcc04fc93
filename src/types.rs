//! Public and internal types for the coalescer API and pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CoalescerError;
use crate::utils::config::Defaults;

/// Person name → reference photo filenames (as found in the people dir, sorted).
///
/// Built once before the pipeline starts and only read afterwards.
pub type PersonRegistry = BTreeMap<String, Vec<String>>;

/// Names that must all appear in one photo for combined matching. Empty in single mode.
pub type CombinationSet = Vec<String>;

/// Bounding box of a detected face, in pixels.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FaceRect {
    #[serde(default)]
    pub top: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

/// One face returned by the recognition service for one image.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RecognizedFace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub matched: bool,
    /// In `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rect: FaceRect,
}

impl RecognizedFace {
    /// Matched face for `name`; the shape tests and mocks need.
    pub fn matched(name: &str, confidence: f64) -> Self {
        Self {
            name: name.to_string(),
            matched: true,
            confidence,
            ..Self::default()
        }
    }
}

/// Answer of the service liveness probe.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub status: String,
}

/// Where a matched file gets copied.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Destination {
    /// The folder of one registered person.
    Person(String),
    /// The shared folder used in combined mode.
    Combined(String),
}

impl Destination {
    /// Folder name under the output dir.
    pub fn dir_name(&self) -> &str {
        match self {
            Destination::Person(name) | Destination::Combined(name) => name,
        }
    }
}

/// Terminal result for one file that went through the pipeline.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub error: Option<CoalescerError>,
}

impl FileOutcome {
    pub fn ok(path: PathBuf) -> Self {
        Self { path, error: None }
    }

    pub fn failed(path: PathBuf, error: CoalescerError) -> Self {
        Self {
            path,
            error: Some(error),
        }
    }
}

/// Outcomes split by success, each bucket in arrival order.
#[derive(Debug, Default)]
pub struct Report {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, CoalescerError)>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Matching parameters for one run. Immutable once built and shared read-only by all workers.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Normalized to `(0, 1]`.
    pub threshold: f64,
    /// Folder name used when `combination` is non-empty.
    pub combined_dir_name: String,
    /// Combined mode only: every face in the photo must be a combination member.
    pub rigid: bool,
    pub people: PersonRegistry,
    pub combination: CombinationSet,
}

impl MatchConfig {
    pub fn combined_mode(&self) -> bool {
        !self.combination.is_empty()
    }

    /// Every folder a worker may copy into.
    pub fn destinations(&self) -> Vec<Destination> {
        if self.combined_mode() {
            vec![Destination::Combined(self.combined_dir_name.clone())]
        } else {
            self.people
                .keys()
                .map(|name| Destination::Person(name.clone()))
                .collect()
        }
    }
}

/// Full run options (CLI, `coalescer.toml`, env). Confidence is the raw percentage.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Reference photos named `<person>_<anything>.<ext>`.
    pub people_dir: PathBuf,
    /// Photos to sort (walked recursively).
    pub pics_dir: PathBuf,
    /// Destination folders are created here.
    pub output_dir: PathBuf,
    /// Base URL of the recognition service, e.g. `http://localhost:8080`.
    pub facebox_url: String,
    /// Percentage in `[1, 99]`; anything else falls back to 50.
    pub confidence: f64,
    /// Comma separated names; empty for single mode, two or more for combined mode.
    pub combine: String,
    /// Sleep after teaching so the service can assimilate the faces.
    pub cooldown: bool,
    /// Combined mode: require that no other face appears in the photo.
    pub rigid: bool,
    /// Worker pool size.
    pub num_workers: usize,
    /// Per-request timeout for recognition calls, in seconds.
    pub timeout_secs: u64,
    /// Debug logging and progress counter.
    pub verbose: bool,
    /// Print every successful and failed path at the end of the run.
    pub list_paths: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            people_dir: PathBuf::new(),
            pics_dir: PathBuf::new(),
            output_dir: PathBuf::from(Defaults::OUTPUT_DIR),
            facebox_url: String::new(),
            confidence: Defaults::CONFIDENCE,
            combine: String::new(),
            cooldown: true,
            rigid: false,
            num_workers: Defaults::WORKERS,
            timeout_secs: Defaults::TIMEOUT_SECS,
            verbose: false,
            list_paths: false,
        }
    }
}
