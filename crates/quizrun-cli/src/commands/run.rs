//! Running a quiz session against the terminal.

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizrun_core::parser;
use quizrun_core::report::Report;
use quizrun_core::{SessionConfig, SessionRunner};
use quizrun_io::{stdin_answers, StdoutSink};

use crate::config::QuizConfig;

pub async fn execute(config: &QuizConfig, review: bool) -> Result<()> {
    let mut problems = parser::load_problems(&config.file)
        .with_context(|| format!("could not load problems from {}", config.file.display()))?;

    if config.shuffle {
        match config.seed {
            Some(seed) => problems.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => problems.shuffle(&mut rand::rng()),
        }
    }

    let runner = SessionRunner::new(SessionConfig::from_timeout_secs(config.timeout_secs));
    let report = runner
        .run(&problems, stdin_answers(), Arc::new(StdoutSink))
        .await?;

    if review {
        print_review(&report);
    }

    if let Some(dir) = &config.report_dir {
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("report-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_review(report: &Report) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Expected", "Result"]);

    for answer in &report.answers {
        table.add_row(vec![
            Cell::new(answer.index),
            Cell::new(&answer.question),
            Cell::new(&answer.given),
            Cell::new(&answer.expected),
            Cell::new(if answer.correct { "correct" } else { "wrong" }),
        ]);
    }

    eprintln!("\n{table}");
    if report.skipped() > 0 {
        eprintln!("Not answered: {} of {}", report.skipped(), report.total_questions);
    }
}
