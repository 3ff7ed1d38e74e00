use crate::table::Target;
use fsm_common::TokenCursor;

/// Configuration errors detected while building tables, primitives and engines.
///
/// Match outcomes are never errors; these only describe tables that cannot be
/// interpreted at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("transition table has no entries")]
    EmptyTable,

    #[error("entry {entry} points at {target:?}, but the table has {len} entries")]
    DanglingTarget { entry: usize, target: Target, len: usize },

    #[error("start index {start} is out of range for a table of {len} entries")]
    StartOutOfRange { start: usize, len: usize },

    #[error("invalid repeat bounds: min {min} is greater than max {max}")]
    InvalidRepeatBounds { min: usize, max: usize },
}

/// Errors reported by the [`Scanner`](crate::Scanner).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError<C: TokenCursor> {
    #[error("no rule matched at {at:?}")]
    NoMatch { at: C },
}
