//! Recognition service boundary: the capabilities the teach phase and the pipeline need.

pub mod facebox;

use crate::Result;
use crate::types::{RecognizedFace, ServiceInfo};

pub use facebox::FaceboxClient;

/// A face recognition service. One instance is shared by every worker, so it must be `Sync`.
pub trait Recognizer: Send + Sync {
    /// Liveness probe. Fails with [`ServiceUnavailable`](crate::CoalescerError::ServiceUnavailable).
    fn info(&self) -> Result<ServiceInfo>;

    /// Register `image` as a reference photo of `name`; `filename` identifies the sample.
    fn teach(&self, image: &[u8], filename: &str, name: &str) -> Result<()>;

    /// Faces found in `image`, with identity guesses.
    fn check(&self, image: &[u8]) -> Result<Vec<RecognizedFace>>;
}
