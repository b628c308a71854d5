//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;

use crate::error::CliError;

/// Render [key:format] templates
///
/// Each directive `[key:fmt:fmt]` is replaced by the value of `key`, run
/// through the formats left to right. Formats: Abs, OneMinus, MinusOne,
/// Negate, Stat, StatPercent, or a numeric pattern such as `#,0`, `0.00`,
/// `+0;-0;0`, `N2`, `P1`.
#[derive(Debug, Parser)]
#[command(name = "tagfmt", version)]
pub struct Cli {
    /// Template file; omit or use "-" to read stdin
    pub template: Option<PathBuf>,

    /// Render this text instead of a template file
    #[arg(short, long, value_name = "TEXT", conflicts_with = "template")]
    pub expr: Option<String>,

    /// Define a variable (repeatable); wins over variable files
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// JSON or YAML variables file (repeatable); later files win
    #[arg(short = 'f', long = "vars", value_name = "FILE")]
    pub vars: Vec<PathBuf>,

    /// What to print for keys without a value
    #[arg(long, value_enum)]
    pub unknown: Option<UnknownKey>,

    /// Marker printed before unknown keys with --unknown indicate
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Config file (default: ./tagfmt.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Unknown-key policy as named on the command line and in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKey {
    /// Print the key itself
    Passthrough,
    /// Print nothing
    Empty,
    /// Print the marker followed by the key
    Indicate,
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "tagfmt=error";
        }
        match self.verbose {
            0 => "tagfmt=warn",
            1 => "tagfmt=debug",
            _ => "tagfmt=trace",
        }
    }

    /// True when the template comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.expr.is_none()
            && self
                .template
                .as_ref()
                .map_or(true, |path| path.as_os_str() == "-")
    }
}

/// Parses `KEY=VALUE`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidAssignment(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tagfmt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn assignment_parsing() {
        assert_eq!(
            parse_assignment("a=1").unwrap(),
            ("a".to_string(), "1".to_string())
        );
        assert_eq!(
            parse_assignment("eq=x=y").unwrap(),
            ("eq".to_string(), "x=y".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn collects_repeated_flags() {
        let cli = parse(&["-s", "a=1", "--set", "b=2", "-f", "x.json", "--vars", "y.yaml"]);
        assert_eq!(cli.set.len(), 2);
        assert_eq!(cli.vars.len(), 2);
        assert!(cli.reads_stdin());
    }

    #[test]
    fn expr_conflicts_with_template() {
        let result =
            Cli::try_parse_from(["tagfmt", "file.txt", "--expr", "[x]"]);
        assert!(result.is_err());
    }

    #[test]
    fn template_sources() {
        assert!(!parse(&["--expr", "[x]"]).reads_stdin());
        assert!(!parse(&["file.txt"]).reads_stdin());
        assert!(parse(&["-"]).reads_stdin());
    }

    #[test]
    fn unknown_policy_values() {
        assert_eq!(parse(&["--unknown", "empty"]).unknown, Some(UnknownKey::Empty));
        assert!(Cli::try_parse_from(["tagfmt", "--unknown", "bogus"]).is_err());
    }

    #[test]
    fn verbosity_filters() {
        assert_eq!(parse(&[]).log_filter(), "tagfmt=warn");
        assert_eq!(parse(&["-v"]).log_filter(), "tagfmt=debug");
        assert_eq!(parse(&["-vv"]).log_filter(), "tagfmt=trace");
        assert_eq!(parse(&["-q"]).log_filter(), "tagfmt=error");
    }

    #[test]
    fn bad_assignment_is_usage_error() {
        assert!(Cli::try_parse_from(["tagfmt", "--set", "oops"]).is_err());
    }
}
