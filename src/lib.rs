//! Coalescer: sort a photo collection into per-person folders using a face recognition service.
//!
//! Reference photos in the people dir are taught to the service, then every file under the
//! pictures dir is checked on a pool of workers and copied into the folder of each person
//! recognized in it (or, with a combination list, into one shared folder when all of them are).

pub mod coalesce;
pub mod engine;
pub mod error;
pub mod matching;
pub mod people;
pub mod pipeline;
pub mod recognizer;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use coalesce::{coalesce, coalesce_with, create_destination_folders};
pub use error::{CoalescerError, Result};
pub use matching::{build_match_config, decide};
pub use recognizer::{FaceboxClient, Recognizer};
