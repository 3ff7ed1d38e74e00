//! 重复与嵌套表测试

use fsm_framework::Target::{Index, Terminal};
use fsm_framework::{
    CharCursor, Engine, MatchResult, Primitive, TokenCursor, TransitionEntry, TransitionTable,
};
use std::sync::Arc;

const DIGITS: &str = "0123456789";

fn prefix(input: &str, n: usize) -> (CharCursor<'_>, CharCursor<'_>) {
    let begin = CharCursor::new(input);
    (begin, begin.advanced(n))
}

/// Accepted length of `engine` on every prefix of `input`, `None` for a reject.
fn accepted_lengths<'a>(engine: &Engine<CharCursor<'a>>, input: &'a str) -> Vec<Option<usize>> {
    (0..=input.chars().count())
        .map(|n| {
            let (begin, end) = prefix(input, n);
            let result = engine.exec(begin, end, &());
            result.accepted.then(|| result.position.offset())
        })
        .collect()
}

/// *DIGIT
fn zero_or_more_digits<'a>() -> TransitionTable<CharCursor<'a>> {
    TransitionTable::new(vec![
        TransitionEntry::accept(Index(0), Index(1), Primitive::one_of(DIGITS.chars())),
        TransitionEntry::accept(Terminal, Terminal, Primitive::always()),
    ])
    .expect("valid table")
}

/// 1*DIGIT
fn one_or_more_digits<'a>() -> TransitionTable<CharCursor<'a>> {
    TransitionTable::new(vec![TransitionEntry::accept(
        Index(0),
        Terminal,
        Primitive::one_of(DIGITS.chars()),
    )])
    .expect("valid table")
}

/// 2*DIGIT
fn two_or_more_digits<'a>() -> TransitionTable<CharCursor<'a>> {
    TransitionTable::new(vec![
        TransitionEntry::normal(Index(1), Terminal, Primitive::one_of(DIGITS.chars())),
        TransitionEntry::accept(Index(1), Terminal, Primitive::one_of(DIGITS.chars())),
    ])
    .expect("valid table")
}

fn hexdig<'a>() -> Arc<TransitionTable<CharCursor<'a>>> {
    Arc::new(
        TransitionTable::new(vec![
            TransitionEntry::accept(Terminal, Index(1), Primitive::one_of(DIGITS.chars())),
            TransitionEntry::accept(Terminal, Terminal, Primitive::one_of("ABCDEFabcdef".chars())),
        ])
        .expect("valid table"),
    )
}

/// 1*HEXDIG
fn one_or_more_hexdig<'a>() -> TransitionTable<CharCursor<'a>> {
    let nested = Primitive::nested(hexdig(), 0).expect("start in range");
    TransitionTable::new(vec![TransitionEntry::accept(Index(0), Terminal, nested)])
        .expect("valid table")
}

#[test]
fn test_zero_or_more() {
    let engine = Engine::new(zero_or_more_digits());
    assert_eq!(
        accepted_lengths(&engine, "1972"),
        vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(accepted_lengths(&engine, "x1972"), vec![Some(0); 6]);
}

#[test]
fn test_zero_or_more_on_empty_input() {
    let engine = Engine::new(zero_or_more_digits());
    let begin = CharCursor::new("");
    assert_eq!(engine.exec(begin, begin, &()), MatchResult::accept(begin));
}

#[test]
fn test_one_or_more() {
    let engine = Engine::new(one_or_more_digits());

    let begin = CharCursor::new("1972");
    assert_eq!(engine.exec(begin, begin, &()), MatchResult::reject(begin));

    assert_eq!(
        accepted_lengths(&engine, "1972"),
        vec![None, Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(accepted_lengths(&engine, "x1972"), vec![None; 6]);
}

#[test]
fn test_two_or_more() {
    let engine = Engine::new(two_or_more_digits());
    assert_eq!(
        accepted_lengths(&engine, "1972"),
        vec![None, None, Some(2), Some(3), Some(4)]
    );
}

#[test]
fn test_repetition_stops_at_first_mismatch() {
    let engine = Engine::new(one_or_more_digits());
    let input = "12ab34";
    let begin = CharCursor::new(input);
    let result = engine.exec(begin, CharCursor::end_of(input), &());
    assert_eq!(result, MatchResult::accept(begin.advanced(2)));
}

#[test]
fn test_nested_table_repetition() {
    let engine = Engine::new(one_or_more_hexdig());
    assert_eq!(
        accepted_lengths(&engine, "BEAF"),
        vec![None, Some(1), Some(2), Some(3), Some(4)]
    );
    // the last successful iteration wins instead of an outright failure
    assert_eq!(
        accepted_lengths(&engine, "BEAR"),
        vec![None, Some(1), Some(2), Some(3), Some(3)]
    );
}

#[test]
fn test_nested_table_rejects_bad_start() {
    let err = Primitive::nested(hexdig(), 2).unwrap_err();
    assert_eq!(
        err,
        fsm_framework::TableError::StartOutOfRange { start: 2, len: 2 }
    );
}

#[test]
fn test_nested_table_from_second_entry() {
    // starting the nested run at entry 1 only accepts hex letters
    let letters = Primitive::nested(hexdig(), 1).expect("start in range");
    let engine = Engine::new(
        TransitionTable::new(vec![TransitionEntry::accept(Index(0), Terminal, letters)])
            .expect("valid table"),
    );
    let input = "fe9";
    let begin = CharCursor::new(input);
    assert_eq!(
        engine.exec(begin, CharCursor::end_of(input), &()),
        MatchResult::accept(begin.advanced(2))
    );
}

#[test]
fn test_bounded_repeat() {
    let repeat = Primitive::repeat_seq("_ABC".chars(), 0, 10).expect("valid bounds");
    let engine = Engine::new(
        TransitionTable::new(vec![TransitionEntry::accept(Terminal, Terminal, repeat)])
            .expect("valid table"),
    );

    let input = "_ABC_ABC_ABC_ABC";
    let end = CharCursor::end_of(input);
    assert_eq!(engine.exec(CharCursor::new(input), end, &()), MatchResult::accept(end));
}

#[test]
fn test_bounded_repeat_limits() {
    let input = "abababab";
    let begin = CharCursor::new(input);
    let end = CharCursor::end_of(input);

    let at_most_three = Primitive::repeat_seq("ab".chars(), 2, 3).expect("valid bounds");
    assert_eq!(at_most_three.apply(begin, &end, &()), MatchResult::accept(begin.advanced(6)));

    let at_least_five = Primitive::repeat_seq("ab".chars(), 5, 8).expect("valid bounds");
    assert_eq!(at_least_five.apply(begin, &end, &()), MatchResult::reject(end));

    let empty_pattern = Primitive::repeat_seq("".chars(), 3, 3).expect("valid bounds");
    assert_eq!(empty_pattern.apply(begin, &end, &()), MatchResult::accept(begin));
}
