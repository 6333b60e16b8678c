pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod selection;
pub mod syntax;
pub mod target;
pub mod text;

pub use document::{Document, EditorHandle};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{
    HatTokenMap, InMemoryHatTokenMap, Mark, MarkHistory, Modifier, NoSyntax, NodeLocator,
    Pipeline, PipelineContext, ScopeType, Stage, TargetPosition,
};
pub use selection::{SelectionWithEditor, TypedSelection, TypedSelectionBuilder};
pub use target::{PrimitiveTarget, RangeTarget, Target, resolve_targets};
pub use text::{Position, Range};
