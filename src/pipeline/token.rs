//! Attach whitespace delimiter ranges to a token.
//!
//! The content range arrives already bound to a token. This stage looks at
//! the whitespace on either side of it and decides whether the token sits in
//! a space-separated run. Remove and replace actions use the resulting
//! delimiter ranges to consume exactly one separator, so the stage either
//! commits a consistent pair or attaches nothing.
//!
//! Each side is scanned only on the line holding that end of the content
//! range; whitespace on neighbouring lines is never considered.

use regex::Regex;
use std::sync::LazyLock;

use super::context::PipelineContext;
use super::stage::Stage;
use crate::document::Document;
use crate::error::{PipelineError, PipelineResult};
use crate::selection::TypedSelection;
use crate::text::{Position, Range, convert_byte_to_utf16_in_line, convert_utf16_to_byte_in_line};

/// Separator between tokens
pub const TOKEN_DELIMITER: &str = " ";

static TRAILING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+$").expect("static pattern"));
static LEADING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+").expect("static pattern"));

/// Whitespace found around a content range, before the list policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterScan {
    pub leading: Option<Range>,
    pub trailing: Option<Range>,
    /// Content starts at column 0
    pub at_line_start: bool,
    /// Content ends at the end of its line
    pub at_line_end: bool,
}

impl DelimiterScan {
    /// Whether the token counts as an element of a delimited run.
    ///
    /// Some whitespace must be present, and each side must either have
    /// whitespace or sit on a line boundary.
    pub fn is_delimited(&self) -> bool {
        let leading = self.leading.is_some();
        let trailing = self.trailing.is_some();
        (leading || trailing) && (leading || self.at_line_start) && (trailing || self.at_line_end)
    }
}

/// Scan the whitespace immediately around `content` on its own lines.
pub fn scan_delimiters(document: &Document, content: &Range) -> PipelineResult<DelimiterScan> {
    let start_line = line_text(document, content.start.line)?;
    let start_byte = column_to_byte(start_line, content.start)?;
    let leading = TRAILING_WHITESPACE
        .find(&start_line[..start_byte])
        .map(|m| {
            let column = byte_to_column(start_line, m.start(), content.start.line)?;
            Ok::<_, PipelineError>(Range::new(
                Position::new(content.start.line, column),
                content.start,
            ))
        })
        .transpose()?;

    let end_line = line_text(document, content.end.line)?;
    let end_byte = column_to_byte(end_line, content.end)?;
    let trailing = LEADING_WHITESPACE
        .find(&end_line[end_byte..])
        .map(|m| {
            let column = byte_to_column(end_line, end_byte + m.end(), content.end.line)?;
            Ok::<_, PipelineError>(Range::new(
                content.end,
                Position::new(content.end.line, column),
            ))
        })
        .transpose()?;

    Ok(DelimiterScan {
        leading,
        trailing,
        at_line_start: content.start.character == 0,
        at_line_end: end_byte == end_line.len(),
    })
}

fn line_text(document: &Document, line: u32) -> PipelineResult<&str> {
    document.line_text(line).ok_or_else(|| {
        PipelineError::malformed_selection(format!(
            "line {line} does not exist in {}",
            document.uri()
        ))
    })
}

fn column_to_byte(line_text: &str, position: Position) -> PipelineResult<usize> {
    convert_utf16_to_byte_in_line(line_text, position.character as usize).ok_or_else(|| {
        PipelineError::malformed_selection(format!("position {position} is past the end of its line"))
    })
}

fn byte_to_column(line_text: &str, byte: usize, line: u32) -> PipelineResult<u32> {
    convert_byte_to_utf16_in_line(line_text, byte)
        .map(|column| column as u32)
        .ok_or_else(|| {
            PipelineError::internal(format!("byte {byte} on line {line} splits a character"))
        })
}

/// The containing-scope stage for tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStage;

impl TokenStage {
    pub const NAME: &'static str = "containing-scope-token";
}

impl Stage for TokenStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &self,
        _context: &PipelineContext<'_>,
        selection: &TypedSelection,
    ) -> PipelineResult<TypedSelection> {
        let scan = scan_delimiters(selection.editor.document(), &selection.content_range)?;
        let delimited = scan.is_delimited();

        log::trace!(
            target: "target_pipeline::token",
            "token {} in {}: leading={:?} trailing={:?} delimited={}",
            selection.content_range,
            selection.editor.uri(),
            scan.leading,
            scan.trailing,
            delimited
        );

        let (leading, trailing) = if delimited {
            (scan.leading, scan.trailing)
        } else {
            (None, None)
        };

        Ok(TypedSelection {
            delimiter: Some(TOKEN_DELIMITER.to_string()),
            leading_delimiter_range: leading,
            trailing_delimiter_range: trailing,
            ..selection.clone()
        })
    }
}
