//! Staged selection resolution.
//!
//! A target's initial selections are folded through its modifiers in order.
//! Each stage maps every selection to a new one; the first failure aborts the
//! whole fold.

// Submodules (Rust 2018+ style)
// These are located in src/pipeline/*.rs
pub mod context;
pub mod mark;
pub mod position;
pub mod raw;
pub mod stage;
pub mod token;

pub use context::{
    DEFAULT_HAT_STYLE, HatTokenMap, InMemoryHatTokenMap, Location, MarkHistory, NoSyntax,
    NodeLocator, PipelineContext, SyntaxNode, Token,
};
pub use mark::Mark;
pub use position::PositionStage;
pub use raw::RawSelectionStage;
pub use stage::{Modifier, ScopeType, Stage, TargetPosition};
pub use token::{DelimiterScan, TOKEN_DELIMITER, TokenStage, scan_delimiters};

use crate::error::PipelineResult;
use crate::selection::TypedSelection;

/// Ordered list of stages applied to every selection of a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    modifiers: Vec<Modifier>,
}

impl Pipeline {
    pub fn new(modifiers: Vec<Modifier>) -> Self {
        Self { modifiers }
    }

    /// Fold `selections` through every stage.
    ///
    /// Inputs are validated before the first stage and every stage output is
    /// validated before the next stage sees it.
    pub fn run(
        &self,
        context: &PipelineContext<'_>,
        selections: Vec<TypedSelection>,
    ) -> PipelineResult<Vec<TypedSelection>> {
        for selection in &selections {
            selection.validate()?;
        }

        self.modifiers
            .iter()
            .try_fold(selections, |selections, modifier| {
                run_stage(modifier, context, &selections)
            })
    }
}

fn run_stage(
    stage: &dyn Stage,
    context: &PipelineContext<'_>,
    selections: &[TypedSelection],
) -> PipelineResult<Vec<TypedSelection>> {
    log::debug!(
        target: "target_pipeline::pipeline",
        "running stage {} over {} selection(s)",
        stage.name(),
        selections.len()
    );

    selections
        .iter()
        .map(|selection| {
            let output = stage.run(context, selection)?;
            output.validate()?;
            Ok(output)
        })
        .collect::<PipelineResult<Vec<_>>>()
        .inspect_err(|err| {
            log::debug!(
                target: "target_pipeline::pipeline",
                "stage {} failed: {}",
                stage.name(),
                err
            );
        })
}
