//! Grammars built on fsm-framework.

pub mod abnf;
