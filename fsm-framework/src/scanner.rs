use crate::engine::Engine;
use crate::error::ScanError;
use fsm_common::{CharCursor, Position, TokenCursor};
use std::cmp::Reverse;

/// An engine tagged with the token kind it recognizes.
pub struct ScanRule<C: TokenCursor, Ctx, K> {
    pub kind: K,
    pub engine: Engine<C, Ctx>,
    /// Higher priority rules are tried first.
    pub priority: i32,
}

impl<C: TokenCursor, Ctx, K> ScanRule<C, Ctx, K> {
    pub fn new(kind: K, engine: Engine<C, Ctx>) -> Self {
        Self {
            kind,
            engine,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A recognized span of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<C, K> {
    pub kind: K,
    pub start: C,
    pub end: C,
}

impl<'a, K> Lexeme<CharCursor<'a>, K> {
    pub fn text(&self) -> &'a str {
        self.start.slice_until(&self.end)
    }

    pub fn position(&self) -> Position {
        self.start.position()
    }
}

/// Splits input into lexemes by applying rules in priority order.
///
/// At every position the first rule whose engine accepts a non-empty prefix
/// wins. When no rule matches, the scanner yields one
/// [`ScanError::NoMatch`] and stops.
pub struct Scanner<'c, C: TokenCursor, Ctx, K> {
    rules: Vec<ScanRule<C, Ctx, K>>,
    cursor: C,
    end: C,
    ctx: &'c Ctx,
    finished: bool,
}

impl<'c, C: TokenCursor, Ctx, K: Clone> Scanner<'c, C, Ctx, K> {
    /// Creates a scanner over `begin..end` with the given rules.
    pub fn new(rules: Vec<ScanRule<C, Ctx, K>>, begin: C, end: C, ctx: &'c Ctx) -> Self {
        // Sort rules by priority (highest first); equal priorities keep their order
        let mut sorted_rules = rules;
        sorted_rules.sort_by_key(|rule| Reverse(rule.priority));

        Self {
            rules: sorted_rules,
            cursor: begin,
            end,
            ctx,
            finished: false,
        }
    }

    /// Returns the position the next lexeme will start at.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Tries every rule at the current position without advancing.
    pub fn next_lexeme(&self) -> Option<Lexeme<C, K>> {
        self.rules.iter().find_map(|rule| {
            let result = rule.engine.exec(self.cursor.clone(), self.end.clone(), self.ctx);
            // zero-width accepts would never make progress
            if result.accepted && result.position != self.cursor {
                Some(Lexeme {
                    kind: rule.kind.clone(),
                    start: self.cursor.clone(),
                    end: result.position,
                })
            } else {
                None
            }
        })
    }

    /// Collects all lexemes, stopping at the first dead end.
    pub fn tokenize(&mut self) -> Result<Vec<Lexeme<C, K>>, ScanError<C>> {
        self.collect()
    }
}

impl<C: TokenCursor, Ctx, K: Clone> Iterator for Scanner<'_, C, Ctx, K> {
    type Item = Result<Lexeme<C, K>, ScanError<C>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.cursor == self.end {
            return None;
        }

        match self.next_lexeme() {
            Some(lexeme) => {
                self.cursor = lexeme.end.clone();
                Some(Ok(lexeme))
            }
            None => {
                log::debug!("no rule matched at {:?}", self.cursor);
                self.finished = true;
                Some(Err(ScanError::NoMatch {
                    at: self.cursor.clone(),
                }))
            }
        }
    }
}
