//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Grade pytest and Jest test files for quality.
///
/// Examples:
///
///     test-grader ./tests
///     test-grader ./tests --min-score 70
///     test-grader ./tests --format json
#[derive(Parser)]
#[command(name = "test-grader")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Test file or directory to grade
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Minimum passing average score (exit 1 if below)
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show all issues
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_path() {
        let cli = Cli::try_parse_from(["test-grader"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(cli.min_score.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_custom_path() {
        let cli = Cli::try_parse_from(["test-grader", "./tests"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("./tests"));
    }

    #[test]
    fn test_cli_min_score() {
        let cli = Cli::try_parse_from(["test-grader", "--min-score", "70"]).unwrap();
        assert_eq!(cli.min_score, Some(70));
    }

    #[test]
    fn test_cli_negative_min_score_rejected() {
        assert!(Cli::try_parse_from(["test-grader", "--min-score", "-5"]).is_err());
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::try_parse_from(["test-grader", "-f", "json"]).unwrap();
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }

    #[test]
    fn test_cli_format_text() {
        let cli = Cli::try_parse_from(["test-grader", "--format", "text"]).unwrap();
        assert!(matches!(cli.format, Some(OutputFormat::Text)));
    }

    #[test]
    fn test_cli_format_invalid() {
        assert!(Cli::try_parse_from(["test-grader", "-f", "markdown"]).is_err());
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["test-grader", "-c", "grader.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("grader.toml")));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["test-grader", "tests", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.path, PathBuf::from("tests"));
    }
}
