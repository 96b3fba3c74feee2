//! quizrun-core — Problem sets, the timed session engine, and scoring.
//!
//! This crate defines the data model, the I/O traits a session talks
//! through, and the runner that races the question loop against a deadline.

pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod traits;

pub use error::{FormatError, SessionError};
pub use model::{Problem, ProblemSet, SessionConfig};
pub use report::{AnswerRecord, Report};
pub use session::SessionRunner;
pub use traits::{AnswerSource, PromptSink};
