//! Marks seed a target with its initial selections.

use serde::{Deserialize, Serialize};

use super::context::PipelineContext;
use crate::error::{PipelineError, PipelineResult};
use crate::selection::{SelectionWithEditor, TypedSelection};

/// Serialized mark descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    /// The editor's current selections
    Cursor,
    /// Selections produced by the previous command
    That,
    /// Selections the previous command read from
    Source,
    /// The token wearing a hat
    DecoratedSymbol {
        #[serde(rename = "symbolColor", default, skip_serializing_if = "Option::is_none")]
        symbol_color: Option<String>,
        character: char,
    },
    /// No selection at all
    Nothing,
}

impl Mark {
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Cursor => "cursor",
            Mark::That => "that",
            Mark::Source => "source",
            Mark::DecoratedSymbol { .. } => "decoratedSymbol",
            Mark::Nothing => "nothing",
        }
    }

    /// Produce the untyped selections this mark refers to.
    pub fn resolve(&self, context: &PipelineContext<'_>) -> PipelineResult<Vec<TypedSelection>> {
        match self {
            Mark::Cursor => self.collect_recorded(context.cursor_selections()),
            Mark::That => self.collect_recorded(context.that_mark()),
            Mark::Source => self.collect_recorded(context.source_mark()),
            Mark::DecoratedSymbol {
                symbol_color,
                character,
            } => {
                let style = symbol_color
                    .as_deref()
                    .unwrap_or_else(|| context.default_hat_style());
                let token = context
                    .hat_token(style, *character)
                    .ok_or_else(|| PipelineError::hat_not_found(style, *character))?;
                Ok(vec![TypedSelection::new(token.editor.clone(), token.range)])
            }
            Mark::Nothing => Ok(Vec::new()),
        }
    }

    fn collect_recorded(
        &self,
        recorded: &[SelectionWithEditor],
    ) -> PipelineResult<Vec<TypedSelection>> {
        if recorded.is_empty() {
            return Err(PipelineError::empty_mark(self.name()));
        }
        Ok(recorded
            .iter()
            .map(SelectionWithEditor::to_typed_selection)
            .collect())
    }
}
