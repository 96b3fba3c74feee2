//! Process standard stream bindings.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufReader, Stdin};

use quizrun_core::traits::PromptSink;

use crate::token::TokenReader;

/// Answers typed on standard input.
pub fn stdin_answers() -> TokenReader<BufReader<Stdin>> {
    TokenReader::new(BufReader::new(tokio::io::stdin()))
}

/// Prompts written to standard output, flushed after every write so a prompt
/// without a trailing newline is visible before the answer is read.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

#[async_trait]
impl PromptSink for StdoutSink {
    async fn write(&self, text: &str) -> io::Result<()> {
        let mut out = tokio::io::stdout();
        out.write_all(text.as_bytes()).await?;
        out.flush().await
    }
}
