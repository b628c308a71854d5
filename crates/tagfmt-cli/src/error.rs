//! Error types for command-line input validation.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the arguments or input files given to the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// `--set` value without a `=` or with an empty key.
    #[error("invalid assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),

    /// Variables file whose extension is not JSON or YAML.
    #[error("unsupported variables file '{}': expected .json, .yaml or .yml", .0.display())]
    UnsupportedVarsFile(PathBuf),

    /// Variables file whose top level is not a mapping.
    #[error("variables in '{}' must be a mapping at the top level", .0.display())]
    VarsNotMapping(PathBuf),

    /// No template argument and nothing piped on stdin.
    #[error("no template given: pass a file, use --expr, or pipe text on stdin")]
    NoTemplate,
}
