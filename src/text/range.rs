use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A zero-based line/column location in a document.
///
/// `character` counts UTF-16 code units, the same unit editors use when
/// reporting cursor columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open span between two positions.
///
/// A `Range` is not required to be well formed at construction time; callers
/// that accept ranges from outside check [`Range::is_well_formed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`.
    pub const fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid range '{input}': expected LINE:COL or LINE:COL-LINE:COL")]
pub struct ParseRangeError {
    input: String,
}

impl FromStr for Position {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseRangeError {
            input: s.to_string(),
        };
        let (line, character) = s.trim().split_once(':').ok_or_else(error)?;
        Ok(Position::new(
            line.parse().map_err(|_| error())?,
            character.parse().map_err(|_| error())?,
        ))
    }
}

impl FromStr for Range {
    type Err = ParseRangeError;

    /// Parse `LINE:COL-LINE:COL`, or `LINE:COL` for an empty range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |_| ParseRangeError {
            input: s.to_string(),
        };
        match s.split_once('-') {
            Some((start, end)) => Ok(Range::new(
                start.parse().map_err(error)?,
                end.parse().map_err(error)?,
            )),
            None => Ok(Range::empty(s.parse().map_err(error)?)),
        }
    }
}
