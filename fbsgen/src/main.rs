//! fbsgen CLI - translate XML protocol definitions into FlatBuffers schemas.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fbsgen::prelude::*;

/// Translate a directory of XML protocol definitions into .fbs files
#[derive(Parser)]
#[command(name = "fbsgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of .xml protocol definitions
    #[arg(long, env = "FBSGEN_INPUT")]
    input: PathBuf,

    /// Directory receiving the generated .fbs files
    #[arg(long, env = "FBSGEN_OUTPUT")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = GeneratorConfig::new(&cli.input, &cli.output);

    let report = Generator::new(config).run().with_context(|| {
        format!(
            "failed to generate schemas from {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    for output in &report.outputs {
        tracing::debug!("Wrote {}", output.display());
    }

    Ok(())
}
