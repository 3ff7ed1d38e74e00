use crate::position::Position;
use std::cmp::Ordering;
use std::fmt;

/// A forward-only position inside a caller-owned token sequence.
///
/// Cursors are cheap to clone and never own the tokens they point at. Two
/// cursors over the same sequence compare equal when they point at the same
/// token, which is how matchers detect that they reached an upper bound.
pub trait TokenCursor: Clone + PartialEq + fmt::Debug {
    /// The atomic unit being matched (a `char`, a byte, a lexer token, ...).
    type Token: Clone + PartialOrd + fmt::Debug;

    /// Returns the token under the cursor, or `None` once the backing
    /// sequence is exhausted.
    fn peek(&self) -> Option<Self::Token>;

    /// Moves one token forward.
    /// Returns `false` without moving when the sequence is exhausted.
    fn advance(&mut self) -> bool;

    /// Advances by up to `n` tokens and returns how many were actually taken.
    fn advance_by(&mut self, n: usize) -> usize {
        let mut count = 0;
        while count < n && self.advance() {
            count += 1;
        }
        count
    }

    /// Consuming variant of [`advance_by`](TokenCursor::advance_by).
    fn advanced(mut self, n: usize) -> Self {
        self.advance_by(n);
        self
    }
}

/// A cursor over the characters of a string slice.
///
/// Line and column are tracked while advancing, so the cursor can report a
/// [`Position`] for any match boundary.
#[derive(Clone, Copy)]
pub struct CharCursor<'a> {
    input: &'a str,
    current: usize,
    position: Position,
}

impl<'a> CharCursor<'a> {
    /// Creates a cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            current: 0,
            position: Position::new(),
        }
    }

    /// Creates a cursor just past the last character of `input`.
    pub fn end_of(input: &'a str) -> Self {
        Self::new(input).advanced(usize::MAX)
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.current >= self.input.len()
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.current..]
    }

    /// Returns the text between this cursor and `other`.
    ///
    /// Yields an empty slice when `other` lies before this cursor.
    pub fn slice_until(&self, other: &Self) -> &'a str {
        if other.current < self.current {
            return "";
        }
        &self.input[self.current..other.current]
    }

    fn same_input(&self, other: &Self) -> bool {
        std::ptr::eq(self.input.as_ptr(), other.input.as_ptr()) && self.input.len() == other.input.len()
    }
}

impl TokenCursor for CharCursor<'_> {
    type Token = char;

    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn advance(&mut self) -> bool {
        match self.peek() {
            Some(ch) => {
                self.current += ch.len_utf8();
                self.position = self.position.advanced_over(ch);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for CharCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.same_input(other)
    }
}

impl Eq for CharCursor<'_> {}

impl PartialOrd for CharCursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_input(other) {
            Some(self.current.cmp(&other.current))
        } else {
            None
        }
    }
}

impl fmt::Debug for CharCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharCursor")
            .field("offset", &self.current)
            .field("line", &self.position.line)
            .field("column", &self.position.column)
            .finish()
    }
}

/// A cursor over the elements of a slice.
pub struct SliceCursor<'a, T> {
    items: &'a [T],
    index: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Creates a cursor at the first element of `items`.
    pub fn new(items: &'a [T]) -> Self {
        Self { items, index: 0 }
    }

    /// Creates a cursor just past the last element of `items`.
    pub fn end_of(items: &'a [T]) -> Self {
        Self {
            items,
            index: items.len(),
        }
    }

    /// Returns the index of the element under the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.items.len()
    }

    pub fn remaining(&self) -> &'a [T] {
        &self.items[self.index..]
    }

    /// Returns the elements between this cursor and `other`.
    pub fn slice_until(&self, other: &Self) -> &'a [T] {
        if other.index < self.index {
            return &[];
        }
        &self.items[self.index..other.index]
    }

    fn same_input(&self, other: &Self) -> bool {
        std::ptr::eq(self.items.as_ptr(), other.items.as_ptr()) && self.items.len() == other.items.len()
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> TokenCursor for SliceCursor<'_, T>
where
    T: Clone + PartialOrd + fmt::Debug,
{
    type Token = T;

    fn peek(&self) -> Option<T> {
        self.items.get(self.index).cloned()
    }

    fn advance(&mut self) -> bool {
        if self.is_eof() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.same_input(other)
    }
}

impl<T> Eq for SliceCursor<'_, T> {}

impl<T> PartialOrd for SliceCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_input(other) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("index", &self.index)
            .field("len", &self.items.len())
            .finish()
    }
}
