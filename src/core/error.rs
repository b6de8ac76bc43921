//! Error type shared by the copy pipeline.

use thiserror::Error;

/// Failure modes of a single copy operation.
///
/// Every variant is terminal for that invocation; nothing in the pipeline
/// retries automatically.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The requested scope matched no tabs. Reported as an informational
    /// status rather than an error.
    #[error("no tabs found to copy")]
    EmptyResult,

    /// Every clipboard sink refused the payload.
    #[error("clipboard write failed: {0}")]
    SinkFailure(String),

    /// The page-content extraction on the browser side reported a failure.
    #[error("content extraction failed: {0}")]
    ExtractionFailure(String),
}
