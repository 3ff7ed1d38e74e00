//! 计算器词法扫描示例
//! 展示如何用转移表和 Scanner 切分算术表达式

use fsm_common::CharCursor;
use fsm_example::abnf;
use fsm_framework::Target::{Index, Terminal};
use fsm_framework::{
    Engine, Lexeme, Primitive, ScanError, ScanRule, Scanner, TableError, TransitionEntry,
    TransitionTable,
};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CalcToken {
    Number,
    Ident,
    Operator,
    LeftParen,
    RightParen,
    Whitespace,
}

#[derive(Debug)]
enum CalcError<'a> {
    Table(TableError),
    Scan(ScanError<CharCursor<'a>>),
}

impl From<TableError> for CalcError<'_> {
    fn from(err: TableError) -> Self {
        CalcError::Table(err)
    }
}

fn engine<'a>(entries: Vec<TransitionEntry<CharCursor<'a>>>) -> Result<Engine<CharCursor<'a>>, TableError> {
    Ok(Engine::new(TransitionTable::new(entries)?))
}

fn single<'a>(primitive: Primitive<CharCursor<'a>>) -> Result<Engine<CharCursor<'a>>, TableError> {
    engine(vec![TransitionEntry::accept(Terminal, Terminal, primitive)])
}

fn calc_rules<'a>() -> Result<Vec<ScanRule<CharCursor<'a>, (), CalcToken>>, TableError> {
    let digit = || -> Result<Primitive<CharCursor<'a>>, TableError> { Primitive::nested(abnf::digit()?, 0) };
    let alpha = || -> Result<Primitive<CharCursor<'a>>, TableError> { Primitive::nested(abnf::alpha()?, 0) };

    // 1*DIGIT ["." 1*DIGIT]
    let number = engine(vec![
        TransitionEntry::accept(Index(0), Index(1), digit()?),
        TransitionEntry::normal(Index(2), Terminal, Primitive::equals('.')),
        TransitionEntry::accept(Index(2), Terminal, digit()?),
    ])?;

    // ALPHA *(ALPHA / DIGIT / "_")
    let ident = engine(vec![
        TransitionEntry::accept(Index(1), Terminal, alpha()?),
        TransitionEntry::accept(Index(1), Index(2), alpha()?),
        TransitionEntry::accept(Index(1), Index(3), digit()?),
        TransitionEntry::accept(Index(1), Terminal, Primitive::equals('_')),
    ])?;

    let whitespace = engine(vec![TransitionEntry::accept(
        Index(0),
        Terminal,
        Primitive::one_of(" \t\r\n".chars()),
    )])?;

    Ok(vec![
        ScanRule::new(CalcToken::Number, number).with_priority(20),
        ScanRule::new(CalcToken::Ident, ident).with_priority(15),
        ScanRule::new(CalcToken::Operator, single(Primitive::one_of("+-*/^=".chars()))?).with_priority(20),
        ScanRule::new(CalcToken::LeftParen, single(Primitive::equals('('))?).with_priority(20),
        ScanRule::new(CalcToken::RightParen, single(Primitive::equals(')'))?).with_priority(20),
        ScanRule::new(CalcToken::Whitespace, whitespace).with_priority(1),
    ])
}

fn scan(expr: &str) -> Result<Vec<Lexeme<CharCursor<'_>, CalcToken>>, CalcError<'_>> {
    let begin = CharCursor::new(expr);
    let end = CharCursor::end_of(expr);
    Scanner::new(calc_rules()?, begin, end, &())
        .tokenize()
        .map_err(CalcError::Scan)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let expressions: Vec<String> = if args.is_empty() {
        ["3 + 4", "2 * 3.14", "(1 + 2) * 3", "area = r ^ 2", "10 / 2.5 $"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        vec![args.join(" ")]
    };

    let mut status = ExitCode::SUCCESS;
    for expr in &expressions {
        println!("Expression: {}", expr);

        match scan(expr) {
            Ok(lexemes) => {
                println!("Tokens:");
                for lexeme in lexemes {
                    if lexeme.kind == CalcToken::Whitespace {
                        // Skip whitespace
                        continue;
                    }
                    let position = lexeme.position();
                    println!(
                        "  {:?} {:?} at {}:{}",
                        lexeme.kind,
                        lexeme.text(),
                        position.line,
                        position.column
                    );
                }
            }
            Err(CalcError::Scan(ScanError::NoMatch { at })) => {
                let position = at.position();
                println!(
                    "  error: unexpected {:?} at {}:{}",
                    at.remaining().chars().next().unwrap_or(' '),
                    position.line,
                    position.column
                );
                status = ExitCode::FAILURE;
            }
            Err(CalcError::Table(err)) => {
                log::error!("invalid calculator grammar: {err}");
                return ExitCode::from(2);
            }
        }
        println!();
    }

    status
}
