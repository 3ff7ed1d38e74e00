/// A human-readable location inside a text input.
///
/// Cursors over text track this while they advance so that matches can be
/// reported by line and column instead of raw offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position just after `ch`.
    pub fn advanced_over(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self::at(self.line + 1, 1, offset)
        } else {
            Self::at(self.line, self.column + 1, offset)
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
