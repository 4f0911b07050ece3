use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use movingminmax::{generate_random_samples, offline, Mode, MovingMean, MovingMinMax};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(clap::Subcommand)]
enum Command {
    /// Print the sliding extrema after every sample, as JSON lines.
    Run {
        /// Window width.
        #[arg(short, default_value_t = 10)]
        w: usize,
        #[arg(long, value_enum, default_value_t = Mode::Both)]
        mode: Mode,
        /// Read whitespace separated samples from this file instead.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the sliding mean after every sample, as JSON lines.
    Mean {
        #[arg(short, default_value_t = 10)]
        w: usize,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Compare the streaming extrema to the offline reference for every w.
    Verify {
        /// Largest window width to check. Defaults to n-1.
        #[arg(long)]
        max_w: Option<usize>,
    },
}

/// Sliding window min/max/mean over a stream of samples.
#[derive(clap::Parser)]
struct Args {
    /// Number of generated random samples.
    #[arg(short, default_value_t = 1000)]
    n: usize,
    /// Seed for the generated samples.
    #[arg(long, default_value_t = 123)]
    seed: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Serialize)]
struct Extrema {
    index: usize,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

#[derive(Serialize)]
struct Mean {
    index: usize,
    value: f64,
    mean: f64,
}

fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading samples from {}", path.display()))?;
    text.split_whitespace()
        .map(|t| {
            t.parse::<f64>()
                .with_context(|| format!("invalid sample {t:?} in {}", path.display()))
        })
        .collect()
}

fn samples(args: &Args, input: Option<&Path>) -> Result<Vec<f64>> {
    match input {
        Some(path) => read_samples(path),
        None => Ok(generate_random_samples(args.n, args.seed)),
    }
}

/// Number of positions where the streaming extrema differ from the offline ones.
fn mismatches(values: &[f64], w: usize) -> Result<usize> {
    let (mins, maxs) = offline::moving_min_max(values, w)?;
    let mut m = MovingMinMax::both(w)?;
    let mut bad = 0;
    for (i, &v) in values.iter().enumerate() {
        m.update(v);
        let (min, max) = (m.min()?, m.max()?);
        if min != mins[i] || max != maxs[i] {
            tracing::warn!(w, i, min, max, want_min = mins[i], want_max = maxs[i], "mismatch");
            bad += 1;
        }
    }
    Ok(bad)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Run { w, mode, input } => {
            let values = samples(&args, input.as_deref())?;
            tracing::info!(w, ?mode, n = values.len(), "running");
            let mut m = MovingMinMax::new(*w, *mode)?;
            for (index, &value) in values.iter().enumerate() {
                m.update(value);
                let line = Extrema {
                    index,
                    value,
                    min: m.min().ok(),
                    max: m.max().ok(),
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Command::Mean { w, input } => {
            let values = samples(&args, input.as_deref())?;
            tracing::info!(w, n = values.len(), "running mean");
            let mut m = MovingMean::new(*w)?;
            for (index, &value) in values.iter().enumerate() {
                m.update(value);
                let line = Mean {
                    index,
                    value,
                    mean: m.mean()?,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Command::Verify { max_w } => {
            let values = generate_random_samples(args.n, args.seed);
            let max_w = max_w.unwrap_or(args.n.saturating_sub(1)).max(1);
            tracing::info!(n = values.len(), max_w, "verifying");
            let bad = (1..=max_w)
                .into_par_iter()
                .map(|w| mismatches(&values, w))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .sum::<usize>();
            if bad > 0 {
                bail!("{bad} mismatches for w in 1..={max_w}");
            }
            tracing::info!("all {max_w} widths agree");
        }
    }
    Ok(())
}
