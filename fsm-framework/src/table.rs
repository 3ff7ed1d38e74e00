use crate::error::TableError;
use crate::primitive::Primitive;
use crate::result::MatchResult;
use fsm_common::TokenCursor;
use std::fmt;

/// Successor of a transition entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Stop interpreting the table.
    Terminal,
    /// Continue at the entry with this index.
    Index(usize),
}

/// One node of a transition table.
///
/// When `primitive` accepts, the run moves to `on_success` (recording the
/// position first if `accepting` is set); otherwise it moves to `on_failure`.
/// `aux_a` and `aux_b` belong to the table author and are never read by the
/// executor.
pub struct TransitionEntry<C: TokenCursor, Ctx = ()> {
    pub on_success: Target,
    pub on_failure: Target,
    pub primitive: Primitive<C, Ctx>,
    pub accepting: bool,
    pub aux_a: usize,
    pub aux_b: usize,
}

impl<C: TokenCursor, Ctx> TransitionEntry<C, Ctx> {
    /// Creates a non-accepting entry.
    pub fn normal(on_success: Target, on_failure: Target, primitive: Primitive<C, Ctx>) -> Self {
        Self {
            on_success,
            on_failure,
            primitive,
            accepting: false,
            aux_a: 0,
            aux_b: 0,
        }
    }

    /// Creates an accepting entry.
    pub fn accept(on_success: Target, on_failure: Target, primitive: Primitive<C, Ctx>) -> Self {
        Self {
            accepting: true,
            ..Self::normal(on_success, on_failure, primitive)
        }
    }

    pub fn with_aux(mut self, aux_a: usize, aux_b: usize) -> Self {
        self.aux_a = aux_a;
        self.aux_b = aux_b;
        self
    }
}

impl<C: TokenCursor, Ctx> Clone for TransitionEntry<C, Ctx> {
    fn clone(&self) -> Self {
        Self {
            on_success: self.on_success,
            on_failure: self.on_failure,
            primitive: self.primitive.clone(),
            accepting: self.accepting,
            aux_a: self.aux_a,
            aux_b: self.aux_b,
        }
    }
}

impl<C: TokenCursor, Ctx> fmt::Debug for TransitionEntry<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEntry")
            .field("on_success", &self.on_success)
            .field("on_failure", &self.on_failure)
            .field("primitive", &self.primitive)
            .field("accepting", &self.accepting)
            .field("aux_a", &self.aux_a)
            .field("aux_b", &self.aux_b)
            .finish()
    }
}

/// A non-empty, index-addressed automaton.
///
/// Every `Target::Index` inside the table is checked against its length on
/// construction, so a constructed table can be interpreted without bounds
/// failures. Tables are immutable once built; share them through `Arc`.
pub struct TransitionTable<C: TokenCursor, Ctx = ()> {
    entries: Vec<TransitionEntry<C, Ctx>>,
}

impl<C: TokenCursor, Ctx> TransitionTable<C, Ctx> {
    /// Validates `entries` and builds a table from them.
    pub fn new(entries: Vec<TransitionEntry<C, Ctx>>) -> Result<Self, TableError> {
        if entries.is_empty() {
            log::debug!("rejecting empty transition table");
            return Err(TableError::EmptyTable);
        }

        let len = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            for target in [entry.on_success, entry.on_failure] {
                if let Target::Index(n) = target {
                    if n >= len {
                        log::debug!("rejecting transition table: entry {index} points at {n}, len {len}");
                        return Err(TableError::DanglingTarget {
                            entry: index,
                            target,
                            len,
                        });
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a table cannot be built without entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransitionEntry<C, Ctx>> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TransitionEntry<C, Ctx>] {
        &self.entries
    }

    /// Interprets the table from `start` over `begin..end`.
    ///
    /// This is the stateless entry point: nothing is retained between calls.
    pub fn run(&self, start: usize, begin: C, end: C, ctx: &Ctx) -> Result<MatchResult<C>, TableError> {
        self.check_start(start)?;
        Ok(self.execute(start, begin, &end, ctx))
    }

    pub(crate) fn check_start(&self, start: usize) -> Result<(), TableError> {
        if start < self.len() {
            Ok(())
        } else {
            Err(TableError::StartOutOfRange {
                start,
                len: self.len(),
            })
        }
    }
}

impl<C: TokenCursor, Ctx> TryFrom<Vec<TransitionEntry<C, Ctx>>> for TransitionTable<C, Ctx> {
    type Error = TableError;

    fn try_from(entries: Vec<TransitionEntry<C, Ctx>>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl<C: TokenCursor, Ctx> Clone for TransitionTable<C, Ctx> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C: TokenCursor, Ctx> fmt::Debug for TransitionTable<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}
