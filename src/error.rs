//! Error taxonomy shared by the run setup, the recognizer and the pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoalescerError {
    /// Invalid flags, bad people-dir filenames, unknown combination names.
    #[error("configuration error: {0}")]
    Config(String),
    /// The recognition service did not answer the startup probe.
    #[error("recognition service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The pictures walk stopped on an I/O error.
    #[error("walk failed: {0}")]
    Walk(String),
    #[error("{0} is not a jpeg or png image")]
    UnsupportedFormat(PathBuf),
    /// A teach/check call reached the service but failed.
    #[error("recognition service error: {0}")]
    Service(String),
    #[error("no matching faces")]
    NoMatch,
    #[error("canceled")]
    Canceled,
}

impl CoalescerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoalescerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = CoalescerError::io(
            "/pics/a.jpg",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "io error on /pics/a.jpg: denied");
    }
}
