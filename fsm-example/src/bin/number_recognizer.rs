//! 数字识别器示例
//! Checks each argument against `number = decimal / "0x" 1*HEXDIG`.

use fsm_common::CharCursor;
use fsm_example::abnf;
use fsm_framework::{Engine, TableError};
use std::process::ExitCode;

/// How much of an input the grammar accepted.
#[derive(Debug, PartialEq)]
enum Verdict<'a> {
    Number,
    Prefix(&'a str),
    NotANumber,
}

fn classify<'a>(engine: &Engine<CharCursor<'a>>, input: &'a str) -> Verdict<'a> {
    match abnf::recognize(engine, input) {
        Some(matched) if matched.len() == input.len() => Verdict::Number,
        Some(matched) => Verdict::Prefix(matched),
        None => Verdict::NotANumber,
    }
}

fn run(inputs: &[String]) -> Result<bool, TableError> {
    let engine = Engine::new(abnf::number::<CharCursor<'_>>()?);
    let mut all_numbers = true;

    for input in inputs {
        let verdict = classify(&engine, input);
        log::debug!("{input:?} -> {verdict:?}");
        match verdict {
            Verdict::Number => println!("{input}: number"),
            Verdict::Prefix(matched) => {
                all_numbers = false;
                println!("{input}: number prefix {matched:?}");
            }
            Verdict::NotANumber => {
                all_numbers = false;
                println!("{input}: not a number");
            }
        }
    }

    Ok(all_numbers)
}

fn main() -> ExitCode {
    env_logger::init();

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = ["1972", "0xDEAD", "0x", "0xBEAR", "[number]"]
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    match run(&inputs) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("invalid grammar: {err}");
            ExitCode::from(2)
        }
    }
}
