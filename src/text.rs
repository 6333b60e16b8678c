//! Text primitives.
//!
//! This module provides the position and range values every selection is made
//! of, plus the UTF-16/byte column conversions used to scan line text.

pub mod position;
mod range;

pub use position::{
    compute_line_starts, convert_byte_to_utf16_in_line, convert_utf16_to_byte_in_line, utf16_len,
};
pub use range::{ParseRangeError, Position, Range};
