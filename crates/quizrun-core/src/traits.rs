//! I/O seams of a session.
//!
//! The engine never touches stdin/stdout directly; `quizrun-io` provides the
//! process bindings and in-memory doubles.

use std::io;

use async_trait::async_trait;

/// Where respondent answers come from.
#[async_trait]
pub trait AnswerSource: Send {
    /// Read the next whitespace-delimited token.
    ///
    /// Returns `Ok(None)` once the stream has ended. May block for as long as
    /// the respondent takes to answer.
    async fn read_token(&mut self) -> io::Result<Option<String>>;
}

/// Where prompts and the summary are written.
///
/// Text passed to `write` must be visible before the next answer read starts.
#[async_trait]
pub trait PromptSink: Send + Sync {
    async fn write(&self, text: &str) -> io::Result<()>;
}
