//! Session report with summary rendering and JSON persistence.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One answer that was fully compared before the session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// 0-based position in presentation order.
    pub index: usize,
    pub question: String,
    /// The token the respondent gave.
    pub given: String,
    pub expected: String,
    pub correct: bool,
    /// Milliseconds from session start until the answer was compared.
    pub answered_after_ms: u64,
}

/// Final tally of one session. Produced exactly once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session resolved.
    pub created_at: DateTime<Utc>,
    /// Size of the full problem set, including problems never asked.
    pub total_questions: usize,
    /// Answers that matched. Never greater than `total_questions`.
    pub correct_count: usize,
    /// Wall-clock seconds from start until the race resolved.
    pub elapsed_secs: f64,
    /// The deadline fired before every problem was answered.
    pub truncated_by_timeout: bool,
    /// Every answer compared before resolution, in order.
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

impl Report {
    pub(crate) fn new(
        total_questions: usize,
        answers: Vec<AnswerRecord>,
        elapsed: Duration,
        truncated_by_timeout: bool,
    ) -> Self {
        let correct_count = answers.iter().filter(|a| a.correct).count();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            total_questions,
            correct_count,
            elapsed_secs: elapsed.as_secs_f64(),
            truncated_by_timeout,
            answers,
        }
    }

    /// Problems whose answer was compared before the session ended.
    pub fn attempted(&self) -> usize {
        self.answers.len()
    }

    /// Problems never answered because the deadline fired first.
    pub fn skipped(&self) -> usize {
        self.total_questions.saturating_sub(self.attempted())
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }

    /// Render the closing summary shown to the respondent.
    pub fn summary(&self) -> String {
        let headline = if self.truncated_by_timeout {
            "Time's up!"
        } else {
            "Complete!"
        };
        format!(
            "\n{headline} Elapsed time: {:.2} seconds\nYou scored {} out of {}\n",
            self.elapsed_secs, self.correct_count, self.total_questions
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, given: &str, expected: &str) -> AnswerRecord {
        AnswerRecord {
            index,
            question: format!("q{index}"),
            given: given.into(),
            expected: expected.into(),
            correct: given.trim() == expected.trim(),
            answered_after_ms: 0,
        }
    }

    #[test]
    fn counts_follow_answers() {
        let report = Report::new(
            5,
            vec![record(0, "13", "13"), record(1, "99", "18")],
            Duration::from_millis(1500),
            true,
        );
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.skipped(), 3);
        assert!((report.elapsed_secs - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn completion_summary_format() {
        let report = Report::new(
            2,
            vec![record(0, "13", "13"), record(1, "18", "18")],
            Duration::from_millis(4),
            false,
        );
        assert_eq!(
            report.summary(),
            "\nComplete! Elapsed time: 0.00 seconds\nYou scored 2 out of 2\n"
        );
    }

    #[test]
    fn timeout_summary_format() {
        let report = Report::new(3, vec![record(0, "1", "1")], Duration::from_secs(2), true);
        assert_eq!(
            report.summary(),
            "\nTime's up! Elapsed time: 2.00 seconds\nYou scored 1 out of 3\n"
        );
    }

    #[test]
    fn json_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = Report::new(1, vec![record(0, "8", "8")], Duration::from_secs(1), false);

        report.save_json(&path).unwrap();
        let loaded = Report::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.correct_count, 1);
        assert_eq!(loaded.answers, report.answers);
    }

    #[test]
    fn load_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Report::load_json(&dir.path().join("missing.json")).is_err());
    }
}
