//! Report formatters for graded files.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::config::OutputFormat;
use crate::core::Result;
use crate::grader::average_score;
use crate::score::{TestScore, PASSING_SCORE};

/// Issues listed per file unless verbose.
pub const MAX_LISTED_ISSUES: usize = 3;

const RULE_WIDTH: usize = 50;
const NAME_WIDTH: usize = 40;

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
        }
    }
}

impl Format {
    pub fn write<W: Write>(&self, scores: &[TestScore], verbose: bool, writer: &mut W) -> Result<()> {
        match self {
            Format::Text => write_text(scores, verbose, writer),
            Format::Json => write_json(scores, writer),
        }
    }
}

fn write_json<W: Write>(scores: &[TestScore], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, scores)?;
    writeln!(writer)?;
    Ok(())
}

fn write_text<W: Write>(scores: &[TestScore], verbose: bool, writer: &mut W) -> Result<()> {
    let rule = "━".repeat(RULE_WIDTH);

    writeln!(writer)?;
    writeln!(writer, "{}", "Test Quality Report".bold())?;
    writeln!(writer, "{rule}")?;
    writeln!(writer)?;

    for score in scores {
        write_file_score(score, verbose, writer)?;
    }

    let passing = scores.iter().filter(|s| s.is_passing()).count();
    let failing = scores.len() - passing;
    let average = average_score(scores);
    let overall = format!("{}/100", average as u32);
    let overall = if average >= f64::from(PASSING_SCORE) {
        overall.green()
    } else {
        overall.red()
    };

    writeln!(writer, "{rule}")?;
    writeln!(writer, "{} {}", "Overall Score:".bold(), overall)?;
    writeln!(
        writer,
        "Files: {} total, {}, {}",
        scores.len(),
        format!("{passing} passing").green(),
        format!("{failing} failing").red()
    )?;
    Ok(())
}

fn write_file_score<W: Write>(score: &TestScore, verbose: bool, writer: &mut W) -> Result<()> {
    let value = format!("{}/100", score.score);
    let (value, indicator) = if score.is_passing() {
        (value.green(), "✓".green())
    } else {
        (value.red(), "✗".red())
    };

    let name = format!("{:<NAME_WIDTH$}", short_name(&score.path));
    writeln!(writer, "{} Score: {} {}", name.bold(), value, indicator)?;
    writeln!(
        writer,
        "{}",
        format!("  ├─ Assertions: {} per test", display_rate(score.avg_assertions)).dimmed()
    )?;
    writeln!(
        writer,
        "{}",
        format!("  ├─ Mocks: {} per test", display_rate(score.mock_ratio)).dimmed()
    )?;

    if score.issues.is_empty() {
        writeln!(writer, "{}", "  └─ Issues: None".dimmed().green())?;
    } else {
        writeln!(
            writer,
            "  └─ {}",
            format!("Issues ({}):", score.issues.len()).yellow()
        )?;
        let shown = if verbose {
            score.issues.len()
        } else {
            score.issues.len().min(MAX_LISTED_ISSUES)
        };
        for issue in &score.issues[..shown] {
            writeln!(writer, "{}", format!("     - {issue}").dimmed())?;
        }
        if shown < score.issues.len() {
            writeln!(
                writer,
                "{}",
                format!("     ... and {} more", score.issues.len() - shown).dimmed()
            )?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

/// Last path segment, or the whole path when it has none.
fn short_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Rates always carry a decimal point (`2.0`, not `2`).
fn display_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        rate.to_string()
    }
}
