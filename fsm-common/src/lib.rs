//! Common Framework
//!
//! Positions and token cursors shared by the matching engine and its consumers.

pub mod cursor;
pub mod position;

pub use cursor::{CharCursor, SliceCursor, TokenCursor};
pub use position::Position;
