use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use serde::Serialize;

use tinypas_lexer::Lexer;
use tinypas_parser::parse_tokens;
use tinypas_syntax::error::Error;

#[derive(Parser, Debug)]
#[command(name = "tinypas-bench", about = "Time the tinypas scanner and parser")]
struct Cli {
    /// Specific script(s) to run, by file stem (e.g. loops). Runs all when omitted.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Measured iterations per script
    #[arg(short = 'n', long = "iterations", default_value_t = 100)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 5)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also benchmark the programs under demos/
    #[arg(long = "include-demos", default_value_t = false)]
    include_demos: bool,

    /// List discovered scripts and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    tokens: usize,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_lex_ms: f64,
    avg_parse_ms: f64,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    tinypas_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

#[derive(Debug)]
struct Samples {
    totals: Vec<f64>,
    lexes: Vec<f64>,
    parses: Vec<f64>,
    tokens: usize,
}

fn workspace_root() -> PathBuf {
    // crates/tinypas-bench -> crates -> root
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn discover_scripts(include_demos: bool) -> Vec<ScriptCase> {
    let root = workspace_root();
    let mut out = Vec::new();

    let mut candidates = vec![root.join("benchmark/scripts")];
    if include_demos {
        candidates.push(root.join("demos"));
    }

    for dir in candidates {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("pas") {
                let name = p
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string();
                out.push(ScriptCase { name, path: p });
            }
        }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn run_once(src: &str) -> Result<(Duration, Duration, usize), Error> {
    let t = Instant::now();
    let registry = Lexer::new(src).tokenize()?;
    let t_lex = t.elapsed();

    let t = Instant::now();
    parse_tokens(&registry)?;
    let t_parse = t.elapsed();

    Ok((t_lex, t_parse, registry.len()))
}

fn measure_script(src: &str, iterations: u32, warmup: u32) -> Result<Samples, Error> {
    for _ in 0..warmup {
        run_once(src)?;
    }

    let mut samples = Samples {
        totals: Vec::with_capacity(iterations as usize),
        lexes: Vec::with_capacity(iterations as usize),
        parses: Vec::with_capacity(iterations as usize),
        tokens: 0,
    };

    for _ in 0..iterations {
        let t0 = Instant::now();
        let (t_lex, t_parse, tokens) = run_once(src)?;
        let total = t0.elapsed();

        samples.lexes.push(dur_ms(t_lex));
        samples.parses.push(dur_ms(t_parse));
        samples.totals.push(dur_ms(total));
        samples.tokens = tokens;
    }

    Ok(samples)
}

fn dur_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = vals.iter().sum::<f64>() / (vals.len() as f64);
    (avg, min, max)
}

fn write_results(path: &Path, doc: &OutputDoc) -> io::Result<()> {
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)
}

fn main() {
    let cli = Cli::parse();

    let mut scripts = discover_scripts(cli.include_demos);

    if cli.list {
        println!("Discovered scripts:");
        for s in &scripts {
            println!("- {} ({})", s.name, s.path.display());
        }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            eprintln!("No matching scripts. Use --list to see available.");
            std::process::exit(2);
        }
    }

    if scripts.is_empty() {
        eprintln!("No .pas scripts found in benchmark/scripts or demos.");
        std::process::exit(2);
    }

    let mut results = Vec::new();
    let mut failed = false;

    for case in &scripts {
        let src = match fs::read_to_string(&case.path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{:>12}: failed to read {}: {}", case.name, case.path.display(), e);
                failed = true;
                continue;
            }
        };
        let samples = match measure_script(&src, cli.iterations, cli.warmup) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{:>12}: {}", case.name, e);
                failed = true;
                continue;
            }
        };
        let (avg_t, min_t, max_t) = stats(&samples.totals);
        let (avg_l, _, _) = stats(&samples.lexes);
        let (avg_p, _, _) = stats(&samples.parses);

        println!(
            "{:>12}: total avg={:.3}ms min={:.3}ms max={:.3}ms | lex={:.3}ms parse={:.3}ms | tokens={}",
            case.name, avg_t, min_t, max_t, avg_l, avg_p, samples.tokens
        );

        results.push(BenchResult {
            name: case.name.clone(),
            iterations: cli.iterations,
            tokens: samples.tokens,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_lex_ms: avg_l,
            avg_parse_ms: avg_p,
        });
    }

    let out_path = cli.output.clone().unwrap_or_else(|| {
        // Windows-safe filename timestamp
        let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
        workspace_root()
            .join("benchmark/results")
            .join(format!("{}.json", ts_file))
    });

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        tinypas_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    if let Err(e) = write_results(&out_path, &doc) {
        eprintln!("Failed to write {}: {}", out_path.display(), e);
        std::process::exit(1);
    }
    println!("\nSaved results to {}", out_path.display());

    if failed {
        std::process::exit(1);
    }
}
