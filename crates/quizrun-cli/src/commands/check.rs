//! The `--check` mode: validate a problem file without asking anything.

use anyhow::{Context, Result};

use quizrun_core::parser;

use crate::config::QuizConfig;

pub fn execute(config: &QuizConfig) -> Result<()> {
    let set = parser::load_problems(&config.file)
        .with_context(|| format!("could not load problems from {}", config.file.display()))?;

    println!(
        "Problem set: {} ({} problems)",
        config.file.display(),
        set.len()
    );

    let warnings = parser::validate_problem_set(&set);
    for w in &warnings {
        let prefix = w
            .index
            .map(|i| format!("  [#{i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Problem set valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
