use owo_colors::OwoColorize;
use tinypas_syntax::error::{Error, ErrorKind};
use tinypas_syntax::token::{RESERVED_TYPES, RESERVED_WORDS};

/// Prints an error with the offending source line and a caret under the
/// reported column.
pub fn render_error(kind: &str, source: &str, err: &Error) {
    let mut msg = err.kind.to_string();
    if let Some(lexeme) = &err.lexeme {
        msg.push_str(&format!(": '{}'", lexeme));
    }
    eprintln!("{}: {}", kind.red().bold(), msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }

    provide_error_suggestions(err);
}

/// Reserved word or type that `lexeme` spells in a different case, if any.
fn case_mismatch(lexeme: &str) -> Option<&'static str> {
    let lower = lexeme.to_ascii_lowercase();
    if lower == lexeme {
        return None;
    }
    RESERVED_WORDS
        .iter()
        .chain(RESERVED_TYPES.iter())
        .find(|w| **w == lower)
        .copied()
}

pub fn provide_error_suggestions(err: &Error) {
    if let Some(hint) = err.kind.help() {
        eprintln!("{}", format!("💡 Help: {}", hint).yellow());
    }

    let Some(lexeme) = err.lexeme.as_deref() else {
        return;
    };

    if let Some(word) = case_mismatch(lexeme) {
        eprintln!(
            "    {}",
            format!("Reserved words are lowercase: did you mean '{}'?", word).cyan()
        );
        return;
    }

    match (err.kind, lexeme) {
        (ErrorKind::ExpectedAssignmentOperator, "=") => {
            eprintln!("    {}", "'=' compares values; assign with ':='".cyan());
        }
        (ErrorKind::ExpectedSemicolon, "else") => {
            eprintln!(
                "    {}",
                "Assignments end with ';' even right before 'else'".cyan()
            );
        }
        (ErrorKind::UnknownCharacter, _) => {
            eprintln!(
                "    {}",
                "Comments start with '//'; strings are quoted with ' or \"".bright_black()
            );
        }
        (ErrorKind::InvalidFactor, s) if s.starts_with('\'') || s.starts_with('"') => {
            eprintln!(
                "    {}",
                "String literals cannot appear inside expressions".bright_black()
            );
        }
        _ => {}
    }
}
