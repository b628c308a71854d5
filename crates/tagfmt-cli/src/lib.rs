//! Command-line front end for `tagfmt`.
//!
//! [`run`] does all the work and returns the rendered text, so the binary
//! only parses arguments, sets up logging and prints.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;

use std::path::Path;

use anyhow::Result;
use tagfmt::{MapResolver, Renderer, UnknownKeyBehavior};

pub use cli::{Cli, UnknownKey};
pub use config::Config;
pub use error::CliError;
pub use input::{RealStdin, StdinReader};

/// Marker used by `--unknown indicate` when none is configured.
pub const DEFAULT_MARKER: &str = "(!?) ";

/// Renders the template selected by `cli`.
///
/// Variables are layered lowest first: config `vars`, then each `--vars`
/// file in order, then `--set`.
pub fn run(cli: &Cli, stdin: &dyn StdinReader, cwd: &Path) -> Result<String> {
    let config = Config::load(cli.config.as_deref(), cwd)?;
    let template = input::read_template(cli, stdin)?;
    let mut resolver = build_resolver(cli, &config)?;

    tracing::debug!(
        variables = resolver.len(),
        bytes = template.len(),
        "rendering template"
    );
    let renderer = Renderer::new().with_locale(config.locale);
    Ok(renderer.render(&template, &mut resolver))
}

fn build_resolver(cli: &Cli, config: &Config) -> Result<MapResolver> {
    let mut resolver = MapResolver::new().unknown_behavior(unknown_behavior(cli, config));

    if let Some(vars) = &config.vars {
        resolver.extend_json(vars);
    }
    for path in &cli.vars {
        tracing::debug!(path = %path.display(), "loading variables");
        resolver.extend_json(&input::load_vars(path)?);
    }
    for (key, value) in &cli.set {
        resolver.insert(key.as_str(), value.as_str());
    }
    Ok(resolver)
}

fn unknown_behavior(cli: &Cli, config: &Config) -> UnknownKeyBehavior {
    match cli.unknown.or(config.unknown) {
        None | Some(UnknownKey::Passthrough) => UnknownKeyBehavior::Passthrough,
        Some(UnknownKey::Empty) => UnknownKeyBehavior::Empty,
        Some(UnknownKey::Indicate) => {
            let marker = cli
                .marker
                .as_deref()
                .or(config.marker.as_deref())
                .unwrap_or(DEFAULT_MARKER);
            UnknownKeyBehavior::Indicate(marker.to_string())
        }
    }
}
