use std::fs;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use owo_colors::OwoColorize;

use tinypas_fmt::format_program;
use tinypas_lexer::Lexer;
use tinypas_parser::parse_tokens;

#[derive(ClapParser, Debug)]
#[command(name = "tinypas-fmt", version, about = "Format tinypas Pascal sources")]
struct Cli {
    /// Exit with status 1 if the file is not already formatted
    #[arg(long = "check", default_value_t = false, conflicts_with = "write")]
    check: bool,

    /// Rewrite the file in place
    #[arg(long = "write", default_value_t = false)]
    write: bool,

    /// Source file to format
    file: PathBuf,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg);
    std::process::exit(1);
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

fn main() {
    let cli = Cli::parse();

    let src = fs::read_to_string(&cli.file)
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", cli.file.display(), e)));
    let registry = Lexer::new(&src)
        .tokenize()
        .unwrap_or_else(|e| fail(format!("Lex error: {}", e)));
    let program = parse_tokens(&registry).unwrap_or_else(|e| fail(format!("Parse error: {}", e)));

    let formatted = format_program(&program);

    if cli.check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: {}", cli.file.display(), "not formatted".yellow());
            std::process::exit(1);
        }
        println!("{}: {}", cli.file.display(), "ok".green());
    } else if cli.write {
        if let Err(e) = fs::write(&cli.file, formatted) {
            fail(format!("Failed to write {}: {}", cli.file.display(), e));
        }
    } else {
        print!("{}", formatted);
    }
}
