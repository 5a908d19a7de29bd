mod cli;
mod config;
mod error;
mod question;
mod runner;
mod session;
mod ui;

use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::SimuladoConfig;
use question::{CsvQuestionStore, QuestionSource, RandomShuffler};
use runner::QuizRunner;
use session::{QuizMachine, SessionReport};
use ui::QuizView;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", Style::new().red().bold().apply_to("error:"));
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "simulado=debug" } else { "simulado=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SimuladoConfig::load_from(path, true)?,
        None => SimuladoConfig::load()?,
    };
    if let Some(path) = cli.questions {
        config.questions_path = path;
    }
    let store = CsvQuestionStore::new(&config.questions_path).with_delimiter(config.delimiter_byte()?);

    match cli.command {
        Command::Start { name, seed, report } => {
            let shuffler = match seed {
                Some(seed) => RandomShuffler::seeded(seed),
                None => RandomShuffler::from_os_rng(),
            };
            let machine = QuizMachine::new(store, shuffler);
            let stdin = std::io::stdin().lock();
            let mut runner =
                QuizRunner::new(machine, stdin, config.default_user.clone()).with_chart(config.show_chart);

            if let Some(summary) = runner.run(name.as_deref())? {
                finish(&summary, report.as_deref(), cli.verbose)?;
            }
        }
        Command::Validate => validate(&store)?,
        Command::Demo => {
            if let Some(summary) = runner::run_demo()? {
                finish(&summary, None, cli.verbose)?;
            }
        }
    }

    Ok(())
}

fn validate(store: &CsvQuestionStore) -> Result<()> {
    let questions = store
        .load()
        .with_context(|| format!("cannot use {}", store.path().display()))?;

    let mut by_subject: BTreeMap<&str, usize> = BTreeMap::new();
    for q in &questions {
        *by_subject.entry(q.subject.as_str()).or_insert(0) += 1;
    }

    println!("{}: {}", store.path().display(), question_count(questions.len()));
    for (subject, count) in by_subject {
        println!("  {subject}: {count}");
    }
    Ok(())
}

fn question_count(n: usize) -> String {
    match n {
        1 => "1 question".to_string(),
        n => format!("{n} questions"),
    }
}

fn finish(summary: &SessionReport, report_path: Option<&Path>, verbose: bool) -> Result<()> {
    if verbose {
        QuizView::new().report(summary);
    }
    if let Some(path) = report_path {
        write_report(summary, path)?;
    }
    Ok(())
}

fn write_report(report: &SessionReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "session report written");
    Ok(())
}
