use crate::error::TableError;
use crate::result::MatchResult;
use crate::table::TransitionTable;
use fsm_common::TokenCursor;
use std::fmt;
use std::sync::Arc;

/// User-supplied matcher: `(cursor, upper bound, parse context) -> result`.
///
/// Anything else the matcher needs is captured by the closure.
pub type MatchFn<C, Ctx> = dyn Fn(C, &C, &Ctx) -> MatchResult<C> + Send + Sync;

/// The match step stored in a transition entry.
///
/// Built with one of the factory functions below and evaluated with
/// [`apply`](Primitive::apply). A primitive never advances on failure.
pub struct Primitive<C: TokenCursor, Ctx = ()> {
    kind: Kind<C, Ctx>,
}

enum Kind<C: TokenCursor, Ctx> {
    Length(usize),
    Equals(C::Token),
    OneOf(Vec<C::Token>),
    Seq(Vec<C::Token>),
    Range(C::Token, C::Token),
    Always,
    Func(Arc<MatchFn<C, Ctx>>),
    Nested {
        table: Arc<TransitionTable<C, Ctx>>,
        start: usize,
    },
    RepeatSeq {
        pattern: Vec<C::Token>,
        min: usize,
        max: usize,
    },
}

impl<C: TokenCursor, Ctx> Primitive<C, Ctx> {
    /// Succeeds when at least `n` tokens remain, consuming exactly `n`.
    pub fn length(n: usize) -> Self {
        Self::from_kind(Kind::Length(n))
    }

    /// Succeeds when the current token equals `token`.
    pub fn equals(token: C::Token) -> Self {
        Self::from_kind(Kind::Equals(token))
    }

    /// Succeeds when the current token is one of `tokens`.
    ///
    /// An empty set succeeds (without consuming) at the upper bound only.
    pub fn one_of<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = C::Token>,
    {
        Self::from_kind(Kind::OneOf(tokens.into_iter().collect()))
    }

    /// Succeeds when the input continues with exactly `pattern`.
    pub fn seq<I>(pattern: I) -> Self
    where
        I: IntoIterator<Item = C::Token>,
    {
        Self::from_kind(Kind::Seq(pattern.into_iter().collect()))
    }

    /// Succeeds when the current token lies in `lo..=hi`.
    pub fn range(lo: C::Token, hi: C::Token) -> Self {
        Self::from_kind(Kind::Range(lo, hi))
    }

    /// Always succeeds without consuming anything.
    pub fn always() -> Self {
        Self::from_kind(Kind::Always)
    }

    /// Delegates the whole decision to `f`.
    ///
    /// The returned position is trusted: it must lie between the cursor and
    /// the upper bound it was given.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(C, &C, &Ctx) -> MatchResult<C> + Send + Sync + 'static,
    {
        Self::from_kind(Kind::Func(Arc::new(f)))
    }

    /// Runs `table` from `start` as a single match step.
    pub fn nested(table: Arc<TransitionTable<C, Ctx>>, start: usize) -> Result<Self, TableError> {
        if start >= table.len() {
            return Err(TableError::StartOutOfRange {
                start,
                len: table.len(),
            });
        }
        Ok(Self::from_kind(Kind::Nested { table, start }))
    }

    /// Matches `pattern` greedily between `min` and `max` times.
    ///
    /// Pass `usize::MAX` as `max` for an unbounded repeat.
    pub fn repeat_seq<I>(pattern: I, min: usize, max: usize) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = C::Token>,
    {
        if min > max {
            return Err(TableError::InvalidRepeatBounds { min, max });
        }
        Ok(Self::from_kind(Kind::RepeatSeq {
            pattern: pattern.into_iter().collect(),
            min,
            max,
        }))
    }

    fn from_kind(kind: Kind<C, Ctx>) -> Self {
        Self { kind }
    }

    /// Evaluates the primitive at `cursor`, never looking at or past `end`.
    pub fn apply(&self, cursor: C, end: &C, ctx: &Ctx) -> MatchResult<C> {
        match &self.kind {
            Kind::Length(n) => match_length(cursor, end, *n),
            Kind::Equals(token) => match_eq(cursor, end, token),
            Kind::OneOf(set) => match_one_of(cursor, end, set),
            Kind::Seq(pattern) => match_seq(cursor, end, pattern),
            Kind::Range(lo, hi) => match_range(cursor, end, lo, hi),
            Kind::Always => MatchResult::accept(cursor),
            Kind::Func(f) => f(cursor, end, ctx),
            Kind::Nested { table, start } => table.execute(*start, cursor, end, ctx),
            Kind::RepeatSeq { pattern, min, max } => {
                match_repeat_seq(cursor, end, pattern, *min, *max)
            }
        }
    }
}

impl<C: TokenCursor, Ctx> Clone for Primitive<C, Ctx> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Length(n) => Kind::Length(*n),
            Kind::Equals(token) => Kind::Equals(token.clone()),
            Kind::OneOf(set) => Kind::OneOf(set.clone()),
            Kind::Seq(pattern) => Kind::Seq(pattern.clone()),
            Kind::Range(lo, hi) => Kind::Range(lo.clone(), hi.clone()),
            Kind::Always => Kind::Always,
            Kind::Func(f) => Kind::Func(Arc::clone(f)),
            Kind::Nested { table, start } => Kind::Nested {
                table: Arc::clone(table),
                start: *start,
            },
            Kind::RepeatSeq { pattern, min, max } => Kind::RepeatSeq {
                pattern: pattern.clone(),
                min: *min,
                max: *max,
            },
        };
        Self { kind }
    }
}

impl<C: TokenCursor, Ctx> fmt::Debug for Primitive<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Length(n) => f.debug_tuple("Length").field(n).finish(),
            Kind::Equals(token) => f.debug_tuple("Equals").field(token).finish(),
            Kind::OneOf(set) => f.debug_tuple("OneOf").field(set).finish(),
            Kind::Seq(pattern) => f.debug_tuple("Seq").field(pattern).finish(),
            Kind::Range(lo, hi) => f.debug_tuple("Range").field(lo).field(hi).finish(),
            Kind::Always => f.write_str("Always"),
            Kind::Func(_) => f.write_str("Func"),
            Kind::Nested { table, start } => f
                .debug_struct("Nested")
                .field("entries", &table.len())
                .field("start", start)
                .finish(),
            Kind::RepeatSeq { pattern, min, max } => f
                .debug_struct("RepeatSeq")
                .field("pattern", pattern)
                .field("min", min)
                .field("max", max)
                .finish(),
        }
    }
}

/// Token under `cursor`, or `None` at the upper bound.
fn next_token<C: TokenCursor>(cursor: &C, end: &C) -> Option<C::Token> {
    if cursor == end {
        None
    } else {
        cursor.peek()
    }
}

pub fn match_length<C: TokenCursor>(mut cursor: C, end: &C, n: usize) -> MatchResult<C> {
    let mut left = n;
    while left > 0 && cursor != *end && cursor.advance() {
        left -= 1;
    }
    if left > 0 {
        MatchResult::reject(end.clone())
    } else {
        MatchResult::accept(cursor)
    }
}

/// Unlike the other matchers, a mismatch reports the cursor itself.
pub fn match_eq<C: TokenCursor>(mut cursor: C, end: &C, token: &C::Token) -> MatchResult<C> {
    match next_token(&cursor, end) {
        None => MatchResult::reject(end.clone()),
        Some(current) if current == *token => {
            cursor.advance();
            MatchResult::accept(cursor)
        }
        Some(_) => MatchResult::reject(cursor),
    }
}

pub fn match_one_of<C: TokenCursor>(mut cursor: C, end: &C, set: &[C::Token]) -> MatchResult<C> {
    match next_token(&cursor, end) {
        None if set.is_empty() => MatchResult::accept(cursor),
        Some(current) if set.contains(&current) => {
            cursor.advance();
            MatchResult::accept(cursor)
        }
        _ => MatchResult::reject(end.clone()),
    }
}

pub fn match_seq<C: TokenCursor>(mut cursor: C, end: &C, pattern: &[C::Token]) -> MatchResult<C> {
    for expected in pattern {
        match next_token(&cursor, end) {
            Some(current) if current == *expected => {
                cursor.advance();
            }
            _ => return MatchResult::reject(end.clone()),
        }
    }
    MatchResult::accept(cursor)
}

pub fn match_range<C: TokenCursor>(
    mut cursor: C,
    end: &C,
    lo: &C::Token,
    hi: &C::Token,
) -> MatchResult<C> {
    match next_token(&cursor, end) {
        Some(current) if *lo <= current && current <= *hi => {
            cursor.advance();
            MatchResult::accept(cursor)
        }
        _ => MatchResult::reject(end.clone()),
    }
}

/// Greedy: stops at the first failed repeat or after `max` repeats and never
/// gives repeats back.
pub fn match_repeat_seq<C: TokenCursor>(
    mut cursor: C,
    end: &C,
    pattern: &[C::Token],
    min: usize,
    max: usize,
) -> MatchResult<C> {
    // An empty pattern repeats any number of times without consuming.
    if pattern.is_empty() {
        return MatchResult::accept(cursor);
    }

    let mut count = 0;
    while count < max {
        let result = match_seq(cursor.clone(), end, pattern);
        if !result.accepted {
            break;
        }
        cursor = result.position;
        count += 1;
    }

    if count >= min {
        MatchResult::accept(cursor)
    } else {
        MatchResult::reject(end.clone())
    }
}
