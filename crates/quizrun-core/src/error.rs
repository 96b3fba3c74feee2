//! Error types for loading problem sets and running sessions.
//!
//! A deadline expiring is not an error: it is reported through
//! [`Report::truncated_by_timeout`](crate::report::Report::truncated_by_timeout).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The problem source could not be opened or did not have the expected shape.
///
/// Loading is all-or-nothing: when this is returned no problems are kept.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The problem file could not be opened.
    #[error("failed to open problem file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stream could not be read or is not well-formed delimited text.
    #[error("malformed problem source at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// A row did not contain exactly a question and an answer.
    #[error("line {line}: expected 2 fields (question, answer), found {found}")]
    FieldCount { line: u64, found: usize },
}

/// Fatal failures while a session is running.
///
/// Any of these aborts the run without producing a report.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the respondent's answer failed.
    #[error("failed to read answer: {0}")]
    Read(#[source] io::Error),

    /// The answer stream ended while a question was waiting for an answer.
    #[error("answer input closed before problem #{question} was answered")]
    InputClosed { question: usize },

    /// Writing a prompt or the summary failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// The question loop stopped without finishing (panic or cancellation).
    #[error("question loop aborted: {0}")]
    Aborted(String),
}

impl SessionError {
    /// Returns `true` if the failure came from the answer input.
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            SessionError::Read(_) | SessionError::InputClosed { .. }
        )
    }
}
