mod common;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;
use owo_colors::OwoColorize;
use tinypas_lexer::Lexer;
use tinypas_parser::parse_tokens;

use common::render_error;
use report::{render_ast, write_listing, Report};

/// Scans and parses a Pascal program, reporting its tokens and syntax tree.
#[derive(ClapParser, Debug)]
#[command(name = "tinypas", version, about)]
struct Cli {
    /// Pascal source file (.pas) to analyze
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Write the token listing to this file (falls back to $TINYPAS_LEX_OUTPUT)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print every token as it appears in the listing
    #[arg(long = "tokens", default_value_t = false)]
    tokens: bool,

    /// Print the syntax tree
    #[arg(long = "ast", default_value_t = false)]
    ast: bool,

    /// Print tokens and syntax tree as one JSON document
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Report progress on stderr
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.to_string().red());
    std::process::exit(1);
}

fn progress(enabled: bool, msg: impl std::fmt::Display) {
    if enabled {
        eprintln!("{} {}", "[tinypas]".bright_black(), msg.to_string().dimmed());
    }
}

fn listing_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(p) = &cli.output {
        return Some(p.clone());
    }
    match std::env::var("TINYPAS_LEX_OUTPUT") {
        Ok(p) if !p.is_empty() => Some(PathBuf::from(p)),
        _ => None,
    }
}

fn has_pascal_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("pas")
}

fn main() {
    let cli = Cli::parse();

    if !has_pascal_extension(&cli.file) {
        fail("Invalid file extension. Please provide a .pas file.");
    }
    if !cli.file.exists() {
        fail(format!("File not found: {}", cli.file.display()));
    }
    let src = match fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => fail(format!("Failed to read {}: {}", cli.file.display(), e)),
    };

    let mut lexer = Lexer::new(&src);
    let registry = match lexer.tokenize() {
        Ok(r) => r,
        Err(e) => {
            render_error("Lex error", &src, &e);
            std::process::exit(1);
        }
    };
    progress(
        cli.verbose,
        format!(
            "lexed {} tokens ({} distinct lexemes)",
            registry.len(),
            registry.distinct_lexemes()
        ),
    );

    if let Some(path) = listing_path(&cli) {
        if let Err(e) = write_listing(&path, &registry) {
            fail(format!("Failed to write {}: {}", path.display(), e));
        }
        progress(cli.verbose, format!("wrote token listing to {}", path.display()));
    }

    if cli.tokens && !cli.json {
        for token in &registry {
            println!("LEX: {}", token);
        }
    }

    let program = match parse_tokens(&registry) {
        Ok(p) => p,
        Err(e) => {
            render_error("Parse error", &src, &e);
            std::process::exit(1);
        }
    };
    progress(cli.verbose, format!("parsed program {}", program.name));

    if cli.json {
        let doc = Report::new(&registry, &program);
        match serde_json::to_string_pretty(&doc) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("Failed to serialize report: {}", e)),
        }
    } else if cli.ast {
        print!("{}", render_ast(&program));
    }
}
