use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "csr-bench workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the degree sweep once per allocator and tabulate speedups
    Bench {
        /// Run quickly (fewer vertices, smaller scrub)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Timed trials per degree
        #[arg(long, default_value_t = 3)]
        repeats: usize,
    },
}

const ALLOCATORS: &[&str] = &[
    "alloc-system",
    "alloc-mimalloc",
    "alloc-snmalloc",
    "alloc-jemalloc",
];

const RESULTS_DIR: &str = "benchmark_results";

/// The fields of a `csr-bench --format json` line the report needs.
#[derive(Deserialize)]
struct DegreeLine {
    degree: usize,
    adjacency_us: u64,
    speedup: Option<f64>,
    memory_ratio: f64,
}

impl DegreeLine {
    fn speedup_cell(&self) -> String {
        match self.speedup {
            Some(s) => format!("**{s:.2}x**"),
            None if self.adjacency_us == 0 => "nan".to_owned(),
            None => "inf".to_owned(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only, repeats } => {
            if !report_only {
                run_benchmarks(quick, repeats)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, repeats: usize) -> Result<()> {
    println!("Running degree sweep per allocator...");
    fs::create_dir_all(RESULTS_DIR)?;

    for alloc in ALLOCATORS {
        println!("\n>>> Benchmarking with feature: {}", alloc);
        let start = Instant::now();

        let name = alloc.replace("alloc-", "");
        let output = Path::new(RESULTS_DIR).join(format!("{name}.jsonl"));

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");

        cmd.arg("run")
            .arg("--release")
            .arg("--bin")
            .arg("csr-bench")
            .arg("--features")
            .arg(alloc);

        // Args for the benchmark binary go after --
        cmd.arg("--");
        cmd.arg("--format").arg("json");
        cmd.arg("--output").arg(&output);
        cmd.arg("--repeats").arg(repeats.to_string());

        if quick {
            cmd.arg("--vertices").arg("100000");
            cmd.arg("--scratch-elements").arg("262144");
        }

        let status = cmd.status().with_context(|| format!("Failed to run sweep for {}", alloc))?;

        if !status.success() {
            eprintln!("Warning: Sweep failed for {}", alloc);
        } else {
            println!("Finished {} in {:.2?}", alloc, start.elapsed());
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let results_dir = Path::new(RESULTS_DIR);
    if !results_dir.exists() {
        eprintln!("No sweep output found at {}", results_dir.display());
        return Ok(());
    }

    // degree -> allocator -> speedup cell
    let mut speedups: BTreeMap<usize, BTreeMap<String, String>> = BTreeMap::new();
    let mut memory: BTreeMap<usize, f64> = BTreeMap::new();
    for alloc in ALLOCATORS {
        let name = alloc.replace("alloc-", "");
        let path = results_dir.join(format!("{name}.jsonl"));
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let parsed: DegreeLine = serde_json::from_str(line)
                .with_context(|| format!("Malformed line in {}", path.display()))?;
            speedups.entry(parsed.degree).or_default().insert(name.clone(), parsed.speedup_cell());
            memory.insert(parsed.degree, parsed.memory_ratio);
        }
    }

    let report_path = results_dir.join("report.md");

    use std::io::Write;
    let mut file = fs::File::create(&report_path)?;

    writeln!(file, "# CSR vs Adjacency Report")?;
    writeln!(file)?;

    // Header
    write!(file, "| Degree |")?;
    for alloc in ALLOCATORS {
        let name = alloc.replace("alloc-", "");
        write!(file, " {} speedup |", name)?;
    }
    writeln!(file, " memory ratio |")?;

    // Separator
    write!(file, "|---|")?;
    for _ in ALLOCATORS {
        write!(file, "---|")?;
    }
    writeln!(file, "---|")?;

    // Rows
    for (degree, by_alloc) in &speedups {
        write!(file, "| {} |", degree)?;
        for alloc in ALLOCATORS {
            let name = alloc.replace("alloc-", "");
            match by_alloc.get(&name) {
                Some(cell) => write!(file, " {} |", cell)?,
                None => write!(file, " N/A |")?,
            }
        }
        match memory.get(degree) {
            Some(m) => writeln!(file, " {:.6} |", m)?,
            None => writeln!(file, " - |")?,
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}
