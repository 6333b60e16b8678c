//! Strip structural type information from a selection.

use super::context::PipelineContext;
use super::stage::Stage;
use crate::error::PipelineResult;
use crate::selection::TypedSelection;

/// Keeps the content range and direction, and marks the result raw so
/// downstream actions take type information from a paired selection instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSelectionStage;

impl RawSelectionStage {
    pub const NAME: &'static str = "to-raw-selection";
}

impl Stage for RawSelectionStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &self,
        _context: &PipelineContext<'_>,
        selection: &TypedSelection,
    ) -> PipelineResult<TypedSelection> {
        Ok(TypedSelection {
            is_raw_selection: true,
            is_reversed: selection.is_reversed,
            ..TypedSelection::new(selection.editor.clone(), selection.content_range)
        })
    }
}
