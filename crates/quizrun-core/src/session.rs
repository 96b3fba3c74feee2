//! Timed session engine.
//!
//! The question loop runs as its own task and owns the score. The runner
//! waits on whichever comes first: the loop finishing, or the deadline. On
//! expiry the loop is aborted and the report is built from the answers it had
//! published so far.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::time::Instant;

use crate::error::SessionError;
use crate::model::{ProblemSet, SessionConfig};
use crate::report::{AnswerRecord, Report};
use crate::traits::{AnswerSource, PromptSink};

/// Prompt shown before each answer is read. Numbering is 0-based.
pub fn prompt(index: usize, question: &str) -> String {
    format!("Problem #{index}: {question}=")
}

/// How the race between the loop and the deadline resolved.
enum Resolution {
    Finished(Result<Result<Vec<AnswerRecord>, SessionError>, JoinError>),
    Expired,
}

/// Runs one timed question/answer session per call to [`run`](Self::run).
///
/// Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    config: SessionConfig,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Ask every problem in order, racing the configured deadline.
    ///
    /// Writes each prompt and the closing summary to `output`. Answers
    /// compared at or before the deadline count; if that covers every
    /// problem the session is complete even when the deadline fired on the
    /// same tick. A deadline too large to represent is treated as none. A
    /// failed answer read aborts the run with an error instead of a report.
    pub async fn run<A>(
        &self,
        problems: &ProblemSet,
        input: A,
        output: Arc<dyn PromptSink>,
    ) -> Result<Report, SessionError>
    where
        A: AnswerSource + 'static,
    {
        let start = Instant::now();
        let total = problems.len();

        if problems.is_empty() {
            tracing::debug!("empty problem set, nothing to ask");
            return finish(Report::new(0, Vec::new(), start.elapsed(), false), &output).await;
        }

        tracing::info!(
            problems = total,
            timeout = ?self.config.timeout(),
            "starting session"
        );

        let (progress_tx, progress_rx) = watch::channel(Vec::new());
        let mut questions = tokio::spawn(ask_all(
            problems.clone(),
            input,
            Arc::clone(&output),
            progress_tx,
            start,
        ));

        // A deadline too far out to represent is no deadline at all.
        let deadline = self
            .config
            .timeout()
            .and_then(|timeout| start.checked_add(timeout).map(|at| (timeout, at)));

        let resolution = match deadline {
            Some((_, at)) => {
                tokio::select! {
                    biased;
                    joined = &mut questions => Resolution::Finished(joined),
                    () = tokio::time::sleep_until(at) => Resolution::Expired,
                }
            }
            None => Resolution::Finished((&mut questions).await),
        };
        let elapsed = start.elapsed();

        let report = match resolution {
            Resolution::Finished(joined) => {
                let answers = join_answers(joined)?;
                tracing::info!(elapsed_secs = elapsed.as_secs_f64(), "session complete");
                Report::new(total, answers, elapsed, false)
            }
            Resolution::Expired => {
                // The loop may have been woken on the same tick as the
                // deadline; let it publish before taking the snapshot.
                tokio::task::yield_now().await;
                questions.abort();

                let timeout = deadline.map(|(timeout, _)| timeout).unwrap_or_default();
                let answers = answered_by(&progress_rx, timeout);
                let truncated = answers.len() < total;
                if truncated {
                    tracing::info!(
                        answered = answers.len(),
                        skipped = total - answers.len(),
                        "deadline reached, session truncated"
                    );
                } else {
                    tracing::info!("last answer arrived at the deadline, session complete");
                }
                Report::new(total, answers, elapsed, truncated)
            }
        };

        finish(report, &output).await
    }
}

/// The question loop. Owns the tally and publishes each scored answer.
async fn ask_all<A: AnswerSource>(
    problems: ProblemSet,
    mut input: A,
    output: Arc<dyn PromptSink>,
    progress: watch::Sender<Vec<AnswerRecord>>,
    start: Instant,
) -> Result<Vec<AnswerRecord>, SessionError> {
    let mut answers = Vec::with_capacity(problems.len());

    for (index, problem) in problems.into_iter().enumerate() {
        output
            .write(&prompt(index, &problem.question))
            .await
            .map_err(SessionError::Write)?;

        let given = input
            .read_token()
            .await
            .map_err(SessionError::Read)?
            .ok_or(SessionError::InputClosed { question: index })?;

        let correct = problem.is_correct(&given);
        tracing::debug!(index, correct, "answer scored");

        let record = AnswerRecord {
            index,
            question: problem.question,
            given,
            expected: problem.answer,
            correct,
            answered_after_ms: start.elapsed().as_millis() as u64,
        };
        progress.send_modify(|published| published.push(record.clone()));
        answers.push(record);
    }

    Ok(answers)
}

/// Answers the loop had published, limited to those compared no later than
/// the deadline.
fn answered_by(
    progress: &watch::Receiver<Vec<AnswerRecord>>,
    timeout: Duration,
) -> Vec<AnswerRecord> {
    let limit = timeout.as_millis() as u64;
    progress
        .borrow()
        .iter()
        .filter(|a| a.answered_after_ms <= limit)
        .cloned()
        .collect()
}

fn join_answers(
    joined: Result<Result<Vec<AnswerRecord>, SessionError>, JoinError>,
) -> Result<Vec<AnswerRecord>, SessionError> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(SessionError::Aborted("question loop panicked".into())),
        Err(e) => Err(SessionError::Aborted(e.to_string())),
    }
}

async fn finish(report: Report, output: &Arc<dyn PromptSink>) -> Result<Report, SessionError> {
    output
        .write(&report.summary())
        .await
        .map_err(SessionError::Write)?;
    Ok(report)
}
