//! The character-level cursor the tokenizer reads from.

/// A stream of source characters with position tracking.
///
/// `position` counts characters from 0, `line` is 1-based, and `column` is
/// 0-based. Consuming a newline moves the cursor to column 0 of the next line.
#[derive(Debug)]
pub struct InputStream {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl InputStream {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Peeks the next character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.ahead(0)
    }

    /// Peeks the character `n` positions ahead of the cursor.
    pub fn ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    /// Consumes and returns the next character.
    pub fn get(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Returns the source text between two character positions.
    pub fn get_source_span(&self, start: usize, end: usize) -> String {
        self.chars[start.min(self.chars.len())..end.min(self.chars.len())]
            .iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut input = InputStream::new("ab\ncd");
        assert_eq!((input.position(), input.line(), input.column()), (0, 1, 0));
        assert_eq!(input.get(), Some('a'));
        assert_eq!(input.get(), Some('b'));
        assert_eq!((input.position(), input.line(), input.column()), (2, 1, 2));
        assert_eq!(input.get(), Some('\n'));
        assert_eq!((input.position(), input.line(), input.column()), (3, 2, 0));
        assert_eq!(input.peek(), Some('c'));
        assert_eq!(input.ahead(1), Some('d'));
        assert_eq!(input.ahead(2), None);
    }

    #[test]
    fn source_span_is_exclusive_of_end() {
        let input = InputStream::new("ld a,b");
        assert_eq!(input.get_source_span(0, 2), "ld");
        assert_eq!(input.get_source_span(3, 6), "a,b");
    }
}
