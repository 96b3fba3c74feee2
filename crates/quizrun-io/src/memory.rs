//! In-memory answer sources and prompt sinks for tests and scripted runs.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use quizrun_core::traits::{AnswerSource, PromptSink};

/// Collects everything written to it.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl PromptSink for MemorySink {
    async fn write(&self, text: &str) -> io::Result<()> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?
            .push_str(text);
        Ok(())
    }
}

/// Replays a fixed list of answers, optionally pausing before each one.
///
/// Once the script runs out, further reads report end of input, or never
/// complete when built with [`then_block`](Self::then_block).
pub struct ScriptedAnswers {
    tokens: VecDeque<String>,
    delay: Duration,
    block_when_exhausted: bool,
    reads: Arc<AtomicU32>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            delay: Duration::ZERO,
            block_when_exhausted: false,
            reads: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A respondent who never answers anything.
    pub fn silent() -> Self {
        Self::new(Vec::<String>::new()).then_block()
    }

    /// Wait this long before handing out each answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Block forever instead of reporting end of input once exhausted.
    pub fn then_block(mut self) -> Self {
        self.block_when_exhausted = true;
        self
    }

    /// Shared counter of reads started, readable after the source has been
    /// moved into a session.
    pub fn read_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl AnswerSource for ScriptedAnswers {
    async fn read_token(&mut self) -> io::Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        if self.tokens.is_empty() && self.block_when_exhausted {
            std::future::pending::<()>().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.tokens.pop_front())
    }
}
