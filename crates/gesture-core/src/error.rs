use thiserror::Error;

/// Errors raised while recording a gesture or emitting its curves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthoringError {
    #[error("no tracked points were supplied")]
    EmptyTrackedPointSet,
    #[error("size node index {index} is out of range for {count} tracked point(s)")]
    SizeNodeOutOfRange { index: usize, count: usize },
    #[error("tracked point count changed from {expected} to {actual}")]
    PointCountChanged { expected: usize, actual: usize },
    #[error("series of length {len} is too short for meaningful curves")]
    DegenerateSeries { len: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("recording already finished")]
    RecordingFinished,
    #[error("tracked point source failed: {0}")]
    Source(String),
    #[error("curve sink rejected keys: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, AuthoringError>;
