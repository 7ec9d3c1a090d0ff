//! test-grader CLI - static quality grading for pytest and Jest test files.

use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use test_grader::cli::{Cli, OutputFormat};
use test_grader::config::Config;
use test_grader::core::{Error, FileSet};
use test_grader::grader::{average_score, Grader};
use test_grader::output::Format;

fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> test_grader::core::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(&cli.path)?,
    };

    if let Some(min_score) = cli.min_score {
        config.grading.min_score = min_score;
    }
    config.output.verbose |= cli.verbose;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = match cli.format {
        Some(OutputFormat::Json) => Format::Json,
        Some(OutputFormat::Text) => Format::Text,
        None => Format::from(config.output.format),
    };

    let file_set = FileSet::from_path(&cli.path, &config)?;
    if file_set.is_empty() {
        eprintln!("{}", "No test files found.".yellow());
        return Ok(());
    }

    eprintln!(
        "{}",
        format!("Analyzing {} test files...", file_set.len()).dimmed()
    );

    let scores = Grader::new().grade_files(&file_set)?;

    let mut out = stdout().lock();
    format.write(&scores, config.output.verbose, &mut out)?;
    out.flush()?;

    let minimum = config.grading.min_score;
    if minimum > 0 {
        let average = average_score(&scores);
        if average < f64::from(minimum) {
            return Err(Error::threshold_violation(average, minimum));
        }
    }

    Ok(())
}
