//! ABNF core rules (RFC 5234, appendix B.1) as transition tables.
//!
//! Every builder is generic over the cursor so the same grammar works for
//! any character source.

use fsm_common::{CharCursor, TokenCursor};
use fsm_framework::Target::{Index, Terminal};
use fsm_framework::{Engine, Primitive, TableError, TransitionEntry, TransitionTable};
use std::sync::Arc;

pub type Table<C> = Arc<TransitionTable<C>>;

fn table<C: TokenCursor<Token = char>>(
    entries: Vec<TransitionEntry<C>>,
) -> Result<Table<C>, TableError> {
    TransitionTable::new(entries).map(Arc::new)
}

/// DIGIT = %x30-39
pub fn digit<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![TransitionEntry::accept(
        Terminal,
        Terminal,
        Primitive::range('0', '9'),
    )])
}

/// ALPHA = %x41-5A / %x61-7A
pub fn alpha<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![
        TransitionEntry::accept(Terminal, Index(1), Primitive::range('A', 'Z')),
        TransitionEntry::accept(Terminal, Terminal, Primitive::range('a', 'z')),
    ])
}

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///
/// ABNF strings are case-insensitive, so lowercase letters match too.
pub fn hexdig<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![
        TransitionEntry::accept(Terminal, Index(1), Primitive::nested(digit()?, 0)?),
        TransitionEntry::accept(Terminal, Index(2), Primitive::range('A', 'F')),
        TransitionEntry::accept(Terminal, Terminal, Primitive::range('a', 'f')),
    ])
}

/// 1*HEXDIG
pub fn hex_digits<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![TransitionEntry::accept(
        Index(0),
        Terminal,
        Primitive::nested(hexdig()?, 0)?,
    )])
}

/// %x31-39 *DIGIT
pub fn decimal<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![
        TransitionEntry::accept(Index(1), Terminal, Primitive::range('1', '9')),
        TransitionEntry::accept(Index(1), Terminal, Primitive::nested(digit()?, 0)?),
    ])
}

/// number = decimal / ("0" ("x" / "X") 1*HEXDIG)
///
/// A lone "0" is not a number.
pub fn number<C: TokenCursor<Token = char>>() -> Result<Table<C>, TableError> {
    table(vec![
        TransitionEntry::accept(Terminal, Index(1), Primitive::nested(decimal()?, 0)?),
        TransitionEntry::normal(Index(2), Terminal, Primitive::equals('0')),
        TransitionEntry::normal(Index(3), Terminal, Primitive::one_of("xX".chars())),
        TransitionEntry::accept(Terminal, Terminal, Primitive::nested(hex_digits()?, 0)?),
    ])
}

/// Returns the longest prefix of `input` accepted by `engine`.
pub fn recognize<'a>(engine: &Engine<CharCursor<'a>>, input: &'a str) -> Option<&'a str> {
    let begin = CharCursor::new(input);
    let result = engine.exec(begin, CharCursor::end_of(input), &());
    result
        .accepted
        .then(|| begin.slice_until(&result.position))
}
