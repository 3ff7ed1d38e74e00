use fsm_framework::Target::{Index, Terminal};
use fsm_framework::{
    CharCursor, Engine, MatchResult, Position, Primitive, ScanError, ScanRule, Scanner,
    TokenCursor, TransitionEntry, TransitionTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Keyword,
    Ident,
    Number,
    Space,
    Op,
}

type Rule<'a> = ScanRule<CharCursor<'a>, (), Kind>;

fn engine(entries: Vec<TransitionEntry<CharCursor<'_>>>) -> Engine<CharCursor<'_>> {
    Engine::new(TransitionTable::new(entries).expect("valid table"))
}

/// Succeeds without consuming when no identifier character follows.
fn word_boundary<'a>() -> Primitive<CharCursor<'a>> {
    Primitive::<CharCursor<'a>>::func(|cursor, end, _| {
        if cursor == *end {
            return MatchResult::accept(cursor);
        }
        match cursor.peek() {
            Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => MatchResult::reject(*end),
            _ => MatchResult::accept(cursor),
        }
    })
}

fn rules<'a>() -> Vec<Rule<'a>> {
    vec![
        ScanRule::new(
            Kind::Ident,
            engine(vec![
                TransitionEntry::accept(Index(1), Terminal, Primitive::range('a', 'z')),
                TransitionEntry::accept(Index(1), Index(2), Primitive::range('a', 'z')),
                TransitionEntry::accept(Index(1), Terminal, Primitive::range('0', '9')),
            ]),
        ),
        ScanRule::new(
            Kind::Keyword,
            engine(vec![
                TransitionEntry::normal(Index(1), Terminal, Primitive::seq("let".chars())),
                TransitionEntry::accept(Terminal, Terminal, word_boundary()),
            ]),
        )
        .with_priority(10),
        ScanRule::new(
            Kind::Number,
            engine(vec![TransitionEntry::accept(
                Index(0),
                Terminal,
                Primitive::range('0', '9'),
            )]),
        ),
        ScanRule::new(
            Kind::Space,
            engine(vec![TransitionEntry::accept(Index(0), Terminal, Primitive::equals(' '))]),
        ),
        ScanRule::new(
            Kind::Op,
            engine(vec![TransitionEntry::accept(
                Terminal,
                Terminal,
                Primitive::one_of("=+-*/()".chars()),
            )]),
        ),
    ]
}

fn scan(input: &str) -> Vec<(Kind, &str)> {
    Scanner::new(rules(), CharCursor::new(input), CharCursor::end_of(input), &())
        .tokenize()
        .expect("input scans")
        .iter()
        .map(|lexeme| (lexeme.kind, lexeme.text()))
        .collect()
}

#[test]
fn test_scan_statement() {
    assert_eq!(
        scan("let x1 = 42"),
        vec![
            (Kind::Keyword, "let"),
            (Kind::Space, " "),
            (Kind::Ident, "x1"),
            (Kind::Space, " "),
            (Kind::Op, "="),
            (Kind::Space, " "),
            (Kind::Number, "42"),
        ]
    );
}

#[test]
fn test_priority_falls_back_to_lower_rules() {
    // "letter" is not the keyword because the boundary check fails
    assert_eq!(
        scan("letter+1"),
        vec![(Kind::Ident, "letter"), (Kind::Op, "+"), (Kind::Number, "1")]
    );
}

#[test]
fn test_empty_input() {
    assert!(scan("").is_empty());
}

#[test]
fn test_lexeme_positions() {
    let input = "a\n  b";
    let mut with_newline = rules();
    with_newline.push(ScanRule::new(
        Kind::Space,
        engine(vec![TransitionEntry::accept(Terminal, Terminal, Primitive::equals('\n'))]),
    ));
    let lexemes = Scanner::new(with_newline, CharCursor::new(input), CharCursor::end_of(input), &())
        .tokenize()
        .expect("input scans");

    let last = lexemes.last().expect("at least one lexeme");
    assert_eq!(last.text(), "b");
    assert_eq!(last.position(), Position::at(2, 3, 4));
}

#[test]
fn test_no_match_stops_scanning() {
    let input = "12 @ 3";
    let mut scanner = Scanner::new(rules(), CharCursor::new(input), CharCursor::end_of(input), &());

    assert_eq!(scanner.next().map(|r| r.map(|l| l.kind)), Some(Ok(Kind::Number)));
    assert_eq!(scanner.next().map(|r| r.map(|l| l.kind)), Some(Ok(Kind::Space)));

    match scanner.next() {
        Some(Err(ScanError::NoMatch { at })) => assert_eq!(at.offset(), 3),
        other => panic!("expected a dead end, got {other:?}"),
    }
    assert!(scanner.next().is_none());
}

#[test]
fn test_tokenize_reports_dead_end() {
    let input = "a?";
    let err = Scanner::new(rules(), CharCursor::new(input), CharCursor::end_of(input), &())
        .tokenize()
        .unwrap_err();
    let ScanError::NoMatch { at } = err;
    assert_eq!(at.remaining(), "?");
}

#[test]
fn test_zero_width_accepts_are_skipped() {
    let mut with_empty = rules();
    with_empty.push(
        ScanRule::new(
            Kind::Op,
            engine(vec![TransitionEntry::accept(Terminal, Terminal, Primitive::always())]),
        )
        .with_priority(100),
    );

    let input = "7";
    let lexemes = Scanner::new(with_empty, CharCursor::new(input), CharCursor::end_of(input), &())
        .tokenize()
        .expect("input scans");
    assert_eq!(lexemes.len(), 1);
    assert_eq!(lexemes[0].kind, Kind::Number);
}

#[test]
fn test_scan_respects_upper_bound() {
    let input = "let x";
    let begin = CharCursor::new(input);
    let kinds: Vec<Kind> = Scanner::new(rules(), begin, begin.advanced(3), &())
        .map(|lexeme| lexeme.expect("input scans").kind)
        .collect();
    assert_eq!(kinds, vec![Kind::Keyword]);
}
