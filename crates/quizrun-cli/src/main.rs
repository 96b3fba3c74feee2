//! quizrun CLI — timed question/answer sessions in the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Timed question/answer quiz")]
struct Cli {
    /// CSV file of `question,answer` rows [default: problems.csv]
    #[arg(long)]
    file: Option<PathBuf>,

    /// Time limit in seconds for the whole quiz, 0 for unlimited [default: 0]
    #[arg(long)]
    timeout: Option<u64>,

    /// Shuffle the questions
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle, for a repeatable order
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to save the JSON report in
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print a per-question breakdown after the summary
    #[arg(long)]
    review: bool,

    /// Only load and validate the problem file
    #[arg(long)]
    check: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizrun=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };

    // A pending stdin read cannot be cancelled; exit instead of waiting for
    // the runtime to drain it after a timed-out session.
    process::exit(code);
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::load_config_from(cli.config.as_deref())?;

    if let Some(file) = cli.file {
        config.file = file;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.shuffle {
        config.shuffle = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.report.is_some() {
        config.report_dir = cli.report;
    }
    tracing::debug!(?config, "resolved configuration");

    if cli.check {
        commands::check::execute(&config)
    } else {
        commands::run::execute(&config, cli.review).await
    }
}
