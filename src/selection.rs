//! The annotated selection value threaded through every pipeline stage.
//!
//! A [`TypedSelection`] is never mutated once built. Stages borrow their input
//! and return a new value, so a selection kept elsewhere (the "that" mark for
//! instance) stays valid while later stages work on a derived copy.

use serde::Serialize;

use crate::document::{Document, EditorHandle};
use crate::error::{PipelineError, PipelineResult};
use crate::text::Range;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A content range plus the structural metadata stages attach to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedSelection {
    /// Document every range below refers to
    pub editor: EditorHandle,

    /// Anchor sits after the active end
    #[serde(skip_serializing_if = "is_false")]
    pub is_reversed: bool,

    /// Selection carries no structural type information
    #[serde(skip_serializing_if = "is_false")]
    pub is_raw_selection: bool,

    /// Separator between sibling units of this selection's kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    pub content_range: Range,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_delimiter_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_delimiter_range: Option<Range>,

    /// Opening and closing markers, in document order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Vec<Range>>,
}

impl TypedSelection {
    /// Selection with only a content range.
    pub fn new(editor: EditorHandle, content_range: Range) -> Self {
        Self {
            editor,
            is_reversed: false,
            is_raw_selection: false,
            delimiter: None,
            content_range,
            interior_range: None,
            leading_delimiter_range: None,
            trailing_delimiter_range: None,
            boundary: None,
        }
    }

    pub fn builder(editor: EditorHandle) -> TypedSelectionBuilder {
        TypedSelectionBuilder::new(editor)
    }

    /// Text covered by the content range
    pub fn text(&self) -> Option<&str> {
        self.editor.text_in(&self.content_range)
    }

    /// Check the structural invariants every stage relies on.
    ///
    /// Every range must be well formed and address real locations in the
    /// editor's document. Delimiter adjacency is a property of the stages that
    /// attach delimiter ranges and is checked by [`delimiters_are_consistent`].
    pub fn validate(&self) -> PipelineResult<()> {
        let document = self.editor.document();
        check_range(document, "content", &self.content_range)?;

        if let Some(interior) = &self.interior_range {
            check_range(document, "interior", interior)?;
        }
        if let Some(leading) = &self.leading_delimiter_range {
            check_range(document, "leading delimiter", leading)?;
        }
        if let Some(trailing) = &self.trailing_delimiter_range {
            check_range(document, "trailing delimiter", trailing)?;
        }
        for boundary in self.boundary.iter().flatten() {
            check_range(document, "boundary", boundary)?;
        }
        Ok(())
    }
}

fn check_range(document: &Document, role: &str, range: &Range) -> PipelineResult<()> {
    if !range.is_well_formed() {
        return Err(PipelineError::malformed_selection(format!(
            "{role} range {range} ends before it starts"
        )));
    }
    if !document.contains(range) {
        return Err(PipelineError::malformed_selection(format!(
            "{role} range {range} lies outside {}",
            document.uri()
        )));
    }
    Ok(())
}

/// Check the delimiter bookkeeping of a content range.
///
/// Leading ranges must end where the content starts and trailing ranges must
/// start where it ends. Either side may only be missing on its own when the
/// content touches a true line boundary there: column 0 for the leading side,
/// the end of the line for the trailing side.
pub fn delimiters_are_consistent(
    document: &Document,
    content: &Range,
    leading: Option<&Range>,
    trailing: Option<&Range>,
) -> bool {
    if leading.is_some_and(|leading| leading.end != content.start) {
        return false;
    }
    if trailing.is_some_and(|trailing| trailing.start != content.end) {
        return false;
    }
    match (leading, trailing) {
        (Some(_), Some(_)) | (None, None) => true,
        (None, Some(_)) => content.start.character == 0,
        (Some(_), None) => document.line_end(content.end.line) == Some(content.end),
    }
}

/// Incremental construction of a [`TypedSelection`] by upstream resolvers.
#[derive(Debug, Clone)]
pub struct TypedSelectionBuilder {
    editor: EditorHandle,
    content_range: Option<Range>,
    is_reversed: bool,
    is_raw_selection: bool,
    delimiter: Option<String>,
    interior_range: Option<Range>,
    leading_delimiter_range: Option<Range>,
    trailing_delimiter_range: Option<Range>,
    boundary: Option<Vec<Range>>,
}

impl TypedSelectionBuilder {
    pub fn new(editor: EditorHandle) -> Self {
        Self {
            editor,
            content_range: None,
            is_reversed: false,
            is_raw_selection: false,
            delimiter: None,
            interior_range: None,
            leading_delimiter_range: None,
            trailing_delimiter_range: None,
            boundary: None,
        }
    }

    pub fn content_range(mut self, range: Range) -> Self {
        self.content_range = Some(range);
        self
    }

    pub fn reversed(mut self, is_reversed: bool) -> Self {
        self.is_reversed = is_reversed;
        self
    }

    pub fn raw(mut self, is_raw_selection: bool) -> Self {
        self.is_raw_selection = is_raw_selection;
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn interior_range(mut self, range: Range) -> Self {
        self.interior_range = Some(range);
        self
    }

    pub fn leading_delimiter_range(mut self, range: Range) -> Self {
        self.leading_delimiter_range = Some(range);
        self
    }

    pub fn trailing_delimiter_range(mut self, range: Range) -> Self {
        self.trailing_delimiter_range = Some(range);
        self
    }

    pub fn boundary(mut self, ranges: Vec<Range>) -> Self {
        self.boundary = Some(ranges);
        self
    }

    /// Finish the selection, rejecting it when the content range was never
    /// supplied or when any range is malformed.
    pub fn build(self) -> PipelineResult<TypedSelection> {
        let content_range = self
            .content_range
            .ok_or(PipelineError::MissingContentRange)?;
        let selection = TypedSelection {
            editor: self.editor,
            is_reversed: self.is_reversed,
            is_raw_selection: self.is_raw_selection,
            delimiter: self.delimiter,
            content_range,
            interior_range: self.interior_range,
            leading_delimiter_range: self.leading_delimiter_range,
            trailing_delimiter_range: self.trailing_delimiter_range,
            boundary: self.boundary,
        };
        selection.validate()?;
        Ok(selection)
    }
}

/// A plain editor selection, as recorded for marks and cursors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionWithEditor {
    pub editor: EditorHandle,
    pub range: Range,
    #[serde(skip_serializing_if = "is_false")]
    pub is_reversed: bool,
}

impl SelectionWithEditor {
    pub fn new(editor: EditorHandle, range: Range) -> Self {
        Self {
            editor,
            range,
            is_reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.is_reversed = true;
        self
    }

    /// Untyped selection covering the recorded range
    pub fn to_typed_selection(&self) -> TypedSelection {
        TypedSelection {
            is_reversed: self.is_reversed,
            ..TypedSelection::new(self.editor.clone(), self.range)
        }
    }
}

impl From<&TypedSelection> for SelectionWithEditor {
    fn from(selection: &TypedSelection) -> Self {
        Self {
            editor: selection.editor.clone(),
            range: selection.content_range,
            is_reversed: selection.is_reversed,
        }
    }
}
