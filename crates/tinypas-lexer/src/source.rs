//! Character source with one character of pushback and position tracking.

/// Line/column bookkeeping captured before each read so one pushback can
/// restore it exactly.
#[derive(Debug, Clone, Copy)]
struct Mark {
    line: usize,
    col: usize,
    pending_newline: bool,
}

/// Rewindable character stream over program text.
///
/// `line` starts at 1 and `col` at 0; every character read advances `col`,
/// so after a read the position names the character just consumed. A newline
/// is itself counted on the line it ends; the move to the next line happens on
/// the following read (or on reaching the end of input).
pub struct SourceReader {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    pending_newline: bool,
    last: Option<Mark>,
}

impl SourceReader {
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
            pending_newline: false,
            last: None,
        }
    }

    /// Reads the next character, or `None` once the input is exhausted.
    pub fn read(&mut self) -> Option<char> {
        let mark = Mark {
            line: self.line,
            col: self.col,
            pending_newline: self.pending_newline,
        };
        if self.pending_newline {
            self.line += 1;
            self.col = 0;
            self.pending_newline = false;
        }
        match self.src.get(self.pos).copied() {
            Some(c) => {
                self.pos += 1;
                self.col += 1;
                self.pending_newline = c == '\n';
                self.last = Some(mark);
                Some(c)
            }
            None => {
                self.last = None;
                None
            }
        }
    }

    /// Pushes the most recently read character back.
    ///
    /// Only one character can be pushed back; a second call, or a call after
    /// `read` returned `None`, does nothing.
    pub fn unread(&mut self) {
        if let Some(mark) = self.last.take() {
            self.pos -= 1;
            self.line = mark.line;
            self.col = mark.col;
            self.pending_newline = mark.pending_newline;
        }
    }

    /// Current `(line, col)`.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_advance_per_character() {
        let mut src = SourceReader::new("ab");
        assert_eq!(src.position(), (1, 0));
        assert_eq!(src.read(), Some('a'));
        assert_eq!(src.position(), (1, 1));
        assert_eq!(src.read(), Some('b'));
        assert_eq!(src.position(), (1, 2));
        assert_eq!(src.read(), None);
        assert_eq!(src.position(), (1, 2));
    }

    #[test]
    fn test_unread_restores_position() {
        let mut src = SourceReader::new("xy");
        src.read();
        src.read();
        src.unread();
        assert_eq!(src.position(), (1, 1));
        assert_eq!(src.read(), Some('y'));
        assert_eq!(src.position(), (1, 2));
    }

    #[test]
    fn test_newline_moves_to_next_line_on_following_read() {
        let mut src = SourceReader::new("a\nb");
        src.read();
        assert_eq!(src.read(), Some('\n'));
        assert_eq!(src.position(), (1, 2));
        assert_eq!(src.read(), Some('b'));
        assert_eq!(src.position(), (2, 1));
    }

    #[test]
    fn test_unread_across_newline() {
        let mut src = SourceReader::new("\nb");
        src.read();
        src.read();
        src.unread();
        assert_eq!(src.position(), (1, 1));
        assert_eq!(src.read(), Some('b'));
        assert_eq!(src.position(), (2, 1));
    }

    #[test]
    fn test_trailing_newline_at_end_of_input() {
        let mut src = SourceReader::new("a\n");
        src.read();
        src.read();
        assert_eq!(src.read(), None);
        assert_eq!(src.position(), (2, 0));
    }

    #[test]
    fn test_single_pushback_only() {
        let mut src = SourceReader::new("abc");
        src.read();
        src.read();
        src.unread();
        src.unread();
        assert_eq!(src.read(), Some('b'));
    }
}
