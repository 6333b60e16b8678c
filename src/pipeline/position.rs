//! Collapse a selection to one of its edges.
//!
//! Used for "before"/"after" style modifiers, e.g. inserting before a
//! function. Only the content and interior ranges move; everything else is
//! carried over so later insertion logic still sees the original delimiters.

use super::context::PipelineContext;
use super::stage::{Stage, TargetPosition};
use crate::error::PipelineResult;
use crate::selection::TypedSelection;
use crate::text::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionStage {
    position: TargetPosition,
}

impl PositionStage {
    pub const NAME: &'static str = "position";

    pub fn new(position: TargetPosition) -> Self {
        Self { position }
    }

    fn collapse(&self, range: Range) -> Range {
        if self.position.is_leading() {
            Range::empty(range.start)
        } else {
            Range::empty(range.end)
        }
    }
}

impl Stage for PositionStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &self,
        _context: &PipelineContext<'_>,
        selection: &TypedSelection,
    ) -> PipelineResult<TypedSelection> {
        Ok(TypedSelection {
            content_range: self.collapse(selection.content_range),
            interior_range: selection.interior_range.map(|range| self.collapse(range)),
            ..selection.clone()
        })
    }
}
