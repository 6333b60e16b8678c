use crate::text::{
    Position, Range, compute_line_starts, convert_byte_to_utf16_in_line,
    convert_utf16_to_byte_in_line, utf16_len,
};

/// Immutable text snapshot a selection's ranges refer to
pub struct Document {
    uri: String,
    version: Option<i32>,
    text: String,
    line_starts: Vec<usize>,
}

impl Document {
    /// Create a new document with just text
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            uri: uri.into(),
            version: None,
            text,
            line_starts,
        }
    }

    /// Create a new document with version
    pub fn with_version(uri: impl Into<String>, text: impl Into<String>, version: i32) -> Self {
        Self {
            version: Some(version),
            ..Self::new(uri, text)
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte bounds of a line, excluding its terminator (`\n` or `\r\n`).
    fn line_bounds(&self, line: u32) -> Option<(usize, usize)> {
        let line = line as usize;
        let start = *self.line_starts.get(line)?;
        let mut end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some((start, end))
    }

    /// Text of a line without its terminator
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let (start, end) = self.line_bounds(line)?;
        Some(&self.text[start..end])
    }

    /// Position just past the last character of a line
    pub fn line_end(&self, line: u32) -> Option<Position> {
        let text = self.line_text(line)?;
        Some(Position::new(line, utf16_len(text) as u32))
    }

    /// Position just past the last character of the document
    pub fn end_position(&self) -> Position {
        let last_line = (self.line_starts.len() - 1) as u32;
        self.line_end(last_line)
            .unwrap_or_else(|| Position::new(last_line, 0))
    }

    /// Convert a position to a byte offset.
    ///
    /// Returns None when the line does not exist or the column lies past the
    /// end of the line.
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let (start, end) = self.line_bounds(position.line)?;
        let line_text = &self.text[start..end];
        convert_utf16_to_byte_in_line(line_text, position.character as usize)
            .map(|offset| start + offset)
    }

    /// Convert a byte offset to a position.
    ///
    /// Offsets inside a line terminator map to the end of that line. Returns
    /// None past the end of the text or in the middle of a character.
    pub fn byte_to_position(&self, offset: usize) -> Option<Position> {
        if offset > self.text.len() {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let (start, end) = self.line_bounds(line as u32)?;
        let line_text = &self.text[start..end];
        let character = convert_byte_to_utf16_in_line(line_text, offset.min(end) - start)?;
        Some(Position::new(line as u32, character as u32))
    }

    /// Check that both ends of `range` address real locations in the text.
    pub fn contains(&self, range: &Range) -> bool {
        self.position_to_byte(range.start).is_some() && self.position_to_byte(range.end).is_some()
    }

    /// Text covered by a well-formed range
    pub fn text_in(&self, range: &Range) -> Option<&str> {
        let start = self.position_to_byte(range.start)?;
        let end = self.position_to_byte(range.end)?;
        self.text.get(start..end)
    }
}
