use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tagfmt_cli::{run, Cli, RealStdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cwd = env::current_dir().context("failed to determine working directory")?;
    let output = run(&cli, &RealStdin, &cwd)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write output")?;
    Ok(())
}
