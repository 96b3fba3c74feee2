//! Whitespace-delimited token reading over any async byte stream.

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use quizrun_core::traits::AnswerSource;

/// Reads answers one whitespace-delimited token at a time.
///
/// Several tokens typed on one line are handed out to successive reads;
/// blank lines are skipped.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
    line: String,
}

impl<R> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }
}

#[async_trait]
impl<R> AnswerSource for TokenReader<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            self.line.clear();
            if self.reader.read_line(&mut self.line).await? == 0 {
                tracing::debug!("answer stream reached end of input");
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }
}
