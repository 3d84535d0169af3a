//! Error types for pipeline runs.

use std::fmt;
use std::io;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal run-level failures.
///
/// Per-symbol problems stay recoverable [`types::SkipReason`] values inside
/// the run; only conditions that sink the whole run surface here.
#[derive(Debug)]
pub enum PipelineError {
    /// No per-symbol price series were supplied.
    NoSymbols,
    /// Neither feed delivered a single document.
    NoDocuments,
    /// Every supplied symbol was skipped.
    AllSymbolsFailed { attempted: usize },
    /// Writing the run report to disk failed.
    ReportIo(io::Error),
    /// Encoding the run report as JSON failed.
    ReportEncode(serde_json::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NoSymbols => write!(f, "no price series supplied"),
            PipelineError::NoDocuments => write!(f, "no documents supplied by either feed"),
            PipelineError::AllSymbolsFailed { attempted } => {
                write!(f, "all {} symbols were skipped", attempted)
            }
            PipelineError::ReportIo(e) => write!(f, "failed to write run report: {}", e),
            PipelineError::ReportEncode(e) => write!(f, "failed to encode run report: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::ReportIo(e) => Some(e),
            PipelineError::ReportEncode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(e: io::Error) -> Self {
        PipelineError::ReportIo(e)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::ReportEncode(e)
    }
}
