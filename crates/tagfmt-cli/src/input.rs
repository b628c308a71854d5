//! Template and variable input.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::Cli;
use crate::error::CliError;

/// Abstraction over stdin so tests can supply piped text.
pub trait StdinReader: Send + Sync {
    /// Whether stdin is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Reads all of stdin. Only called when stdin is not a terminal.
    fn read_to_string(&self) -> io::Result<String>;
}

/// Process stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_to_string(&self) -> io::Result<String> {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

/// Returns the template text selected by the arguments.
pub fn read_template(cli: &Cli, stdin: &dyn StdinReader) -> Result<String> {
    if let Some(expr) = &cli.expr {
        return Ok(expr.clone());
    }

    if !cli.reads_stdin() {
        if let Some(path) = &cli.template {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read template '{}'", path.display()));
        }
    }

    if stdin.is_terminal() {
        return Err(CliError::NoTemplate.into());
    }
    stdin.read_to_string().context("failed to read template from stdin")
}

/// Loads a JSON or YAML variables file, chosen by extension.
pub fn load_vars(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read variables file '{}'", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let value: Value = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON in '{}'", path.display()))?,
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in '{}'", path.display()))?,
        _ => return Err(CliError::UnsupportedVarsFile(path.to_path_buf()).into()),
    };

    if !value.is_object() {
        return Err(CliError::VarsNotMapping(path.to_path_buf()).into());
    }
    Ok(value)
}
