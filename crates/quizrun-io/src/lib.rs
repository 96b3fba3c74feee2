//! quizrun-io — Answer-source and prompt-sink bindings.
//!
//! Implements the `AnswerSource` and `PromptSink` traits for the process's
//! standard streams, for any async byte stream, and for in-memory scripts
//! used in tests.

pub mod memory;
pub mod stdio;
pub mod token;

pub use memory::{MemorySink, ScriptedAnswers};
pub use stdio::{stdin_answers, StdoutSink};
pub use token::TokenReader;
