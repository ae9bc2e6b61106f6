use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csr_bench::{run, BenchConfig, JsonLinesReport, TextReport};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "alloc-mimalloc")]
use mimalloc::MiMalloc;

#[cfg(feature = "alloc-mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[cfg(feature = "alloc-snmalloc")]
use snmalloc_rs::SnMalloc;

#[cfg(feature = "alloc-snmalloc")]
#[global_allocator]
static GLOBAL: SnMalloc = SnMalloc;

#[cfg(feature = "alloc-jemalloc")]
use jemallocator::Jemalloc;

#[cfg(feature = "alloc-jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser)]
#[command(name = "csr-bench")]
#[command(about = "Adjacency rows vs CSR: read latency and memory ratio per degree", long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertices per graph
    #[arg(long)]
    vertices: Option<usize>,

    /// Timed trials per degree
    #[arg(long)]
    repeats: Option<usize>,

    /// Comma-separated degrees to sweep
    #[arg(long, value_delimiter = ',')]
    degrees: Option<Vec<usize>>,

    /// Words written by each cache scrub
    #[arg(long)]
    scratch_elements: Option<usize>,

    /// Print sums, strides, per-access timings and footprints
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn resolve_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => BenchConfig::default(),
        };
        if let Some(v) = self.vertices {
            config.vertex_count = v;
        }
        if let Some(r) = self.repeats {
            config.repeat_count = r;
        }
        if let Some(d) = &self.degrees {
            config.degrees.clone_from(d);
        }
        if let Some(s) = self.scratch_elements {
            config.scratch_elements = s;
        }
        config.verbose |= self.verbose;
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let outcome = match cli.format {
        Format::Text => run(&config, &mut TextReport::new(out)),
        Format::Json => run(&config, &mut JsonLinesReport::new(out)),
    };
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "benchmark aborted");
    }
    outcome.context("Benchmark sweep failed")?;
    Ok(())
}
