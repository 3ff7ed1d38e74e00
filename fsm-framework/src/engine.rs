use crate::error::TableError;
use crate::result::MatchResult;
use crate::table::{Target, TransitionTable};
use fsm_common::TokenCursor;
use std::fmt;
use std::sync::Arc;

/// A transition table bound to a default start entry.
///
/// The engine keeps no state between runs: every [`exec`](Engine::exec) starts
/// from scratch. Rebinding the table needs `&mut self`, so a table can never be
/// swapped out from under a run in progress.
pub struct Engine<C: TokenCursor, Ctx = ()> {
    table: Arc<TransitionTable<C, Ctx>>,
    start: usize,
}

impl<C: TokenCursor, Ctx> Engine<C, Ctx> {
    /// Creates an engine that starts at the first entry.
    pub fn new(table: impl Into<Arc<TransitionTable<C, Ctx>>>) -> Self {
        // A constructed table is never empty, so entry 0 always exists.
        Self {
            table: table.into(),
            start: 0,
        }
    }

    /// Creates an engine with a different default start entry.
    pub fn with_start(
        table: impl Into<Arc<TransitionTable<C, Ctx>>>,
        start: usize,
    ) -> Result<Self, TableError> {
        let table = table.into();
        table.check_start(start)?;
        Ok(Self { table, start })
    }

    pub fn table(&self) -> &Arc<TransitionTable<C, Ctx>> {
        &self.table
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn set_start(&mut self, start: usize) -> Result<(), TableError> {
        self.table.check_start(start)?;
        self.start = start;
        Ok(())
    }

    /// Binds a new table for subsequent runs and returns the previous one.
    ///
    /// Fails, leaving the engine untouched, if the current start entry does
    /// not exist in `table`.
    pub fn swap_table(
        &mut self,
        table: impl Into<Arc<TransitionTable<C, Ctx>>>,
    ) -> Result<Arc<TransitionTable<C, Ctx>>, TableError> {
        let table = table.into();
        table.check_start(self.start)?;
        Ok(std::mem::replace(&mut self.table, table))
    }

    /// Runs the bound table from the default start entry.
    pub fn exec(&self, begin: C, end: C, ctx: &Ctx) -> MatchResult<C> {
        self.table.execute(self.start, begin, &end, ctx)
    }

    /// Runs the bound table from `start` instead of the default entry.
    pub fn exec_from(&self, start: usize, begin: C, end: C, ctx: &Ctx) -> Result<MatchResult<C>, TableError> {
        self.table.run(start, begin, end, ctx)
    }
}

impl<C: TokenCursor, Ctx> Clone for Engine<C, Ctx> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            start: self.start,
        }
    }
}

impl<C: TokenCursor, Ctx> fmt::Debug for Engine<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("entries", &self.table.len())
            .field("start", &self.start)
            .finish()
    }
}

impl<C: TokenCursor, Ctx> TransitionTable<C, Ctx> {
    /// The interpreter loop. `start` must already be known to be in range.
    ///
    /// Every accepting success overwrites the recorded result, so the last
    /// (and therefore longest) accept of the run wins. Without any accept the
    /// run reports the most recent primitive failure unchanged.
    pub(crate) fn execute(&self, start: usize, begin: C, end: &C, ctx: &Ctx) -> MatchResult<C> {
        let entries = self.entries();
        let mut state = Target::Index(start);
        let mut cursor = begin;
        let mut best: Option<C> = None;
        let mut failure: Option<MatchResult<C>> = None;

        while let Target::Index(index) = state {
            let entry = &entries[index];
            let result = entry.primitive.apply(cursor.clone(), end, ctx);
            log::trace!(
                "entry {index} {:?} at {:?}: {:?}",
                entry.primitive,
                cursor,
                result
            );

            if result.accepted {
                cursor = result.position;
                if entry.accepting {
                    best = Some(cursor.clone());
                }
                state = entry.on_success;
            } else {
                failure = Some(result);
                state = entry.on_failure;
            }
        }

        let outcome = match best {
            Some(position) => MatchResult::accept(position),
            None => failure.unwrap_or_else(|| MatchResult::reject(end.clone())),
        };
        log::debug!(
            "run over {} entries from {start}: accepted={} at {:?}",
            entries.len(),
            outcome.accepted,
            outcome.position
        );
        outcome
    }
}
