//! Table-driven recognizer.
//!
//! A [`TransitionTable`] is a list of entries, each pairing a match
//! [`Primitive`] with a success and a failure successor. The [`Engine`] walks
//! the table from a start entry and reports the longest accepted prefix.
//! Sequencing chains success links, alternation chains failure links,
//! repetition loops a success link back to its own entry, and a nested table
//! runs as a single primitive.

pub mod engine;
pub mod error;
pub mod primitive;
pub mod result;
pub mod scanner;
pub mod table;

pub use engine::Engine;
pub use error::{ScanError, TableError};
pub use fsm_common::{CharCursor, Position, SliceCursor, TokenCursor};
pub use primitive::{MatchFn, Primitive};
pub use result::MatchResult;
pub use scanner::{Lexeme, ScanRule, Scanner};
pub use table::{Target, TransitionEntry, TransitionTable};
