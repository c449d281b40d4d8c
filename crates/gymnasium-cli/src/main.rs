//! Command-line tool for gymnasium-rs.
//!
//! `symbols` lists what the `gymnasium_rs` namespace forwards.
//! `sample` builds a space through the namespace and prints samples as
//! JSON lines.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gymnasium::shim::Namespace;
use gymnasium::spaces::{Space, SpaceFactory};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect gymnasium-rs spaces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the forwarded namespace: documentation, then one line per symbol.
    Symbols,
    /// Build a space and print samples, one JSON value per line.
    Sample(SampleArgs),
}

#[derive(Debug, clap::Args)]
struct SampleArgs {
    /// Space name as exported by the namespace (e.g. `Discrete`, `Box`).
    space: String,
    /// Constructor parameters as a JSON object. Defaults to the factory's example.
    #[arg(long)]
    params: Option<String>,
    /// Seed for the sampler.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of samples.
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let ns = gymnasium::namespace().context("loading the gymnasium_rs namespace")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Symbols => symbols(ns, &mut out)?,
        Commands::Sample(args) => sample(ns, &args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn symbols(ns: &Namespace, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", json!({"module": ns.name(), "doc": ns.doc()}))?;
    for (name, symbol) in ns.iter() {
        let line = match symbol.downcast_ref::<SpaceFactory>() {
            Some(factory) => json!({"name": name, "kind": "space", "example": factory.summary()}),
            None => json!({"name": name, "kind": "function"}),
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn sample(ns: &Namespace, args: &SampleArgs, out: &mut impl Write) -> Result<()> {
    let factory = ns
        .get(&args.space)
        .and_then(|s| s.downcast_ref::<SpaceFactory>())
        .ok_or_else(|| {
            let spaces: Vec<&str> = ns
                .iter()
                .filter(|(_, s)| s.is::<SpaceFactory>())
                .map(|(n, _)| n)
                .collect();
            anyhow!("unknown space '{}'; available: {}", args.space, spaces.join(", "))
        })?;
    let params: serde_json::Value =
        serde_json::from_str(args.params.as_deref().unwrap_or(factory.summary()))
            .context("--params is not valid JSON")?;
    let mut space = factory.build(&params, args.seed)?;
    tracing::debug!(space = ?space, seed = ?args.seed, count = args.count, "sampling");
    for _ in 0..args.count {
        writeln!(out, "{}", serde_json::to_string(&space.sample())?)?;
    }
    Ok(())
}
