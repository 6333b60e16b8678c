//! The stage contract and the modifier descriptors that select a stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::context::PipelineContext;
use super::position::PositionStage;
use super::raw::RawSelectionStage;
use super::token::TokenStage;
use crate::error::{PipelineError, PipelineResult};
use crate::selection::TypedSelection;

/// A pure transformation from one selection to another.
///
/// Implementors read the input selection and the context, and return a fresh
/// selection. A stage that cannot apply to its input reports an error instead
/// of handing the input back.
pub trait Stage {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn run(
        &self,
        context: &PipelineContext<'_>,
        selection: &TypedSelection,
    ) -> PipelineResult<TypedSelection>;
}

/// Boundary a position modifier collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetPosition {
    Before,
    Start,
    After,
    End,
}

impl TargetPosition {
    /// Whether the position refers to the leading edge of a range
    pub fn is_leading(self) -> bool {
        matches!(self, TargetPosition::Before | TargetPosition::Start)
    }
}

impl fmt::Display for TargetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetPosition::Before => "before",
            TargetPosition::Start => "start",
            TargetPosition::After => "after",
            TargetPosition::End => "end",
        };
        f.write_str(name)
    }
}

impl FromStr for TargetPosition {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(TargetPosition::Before),
            "start" => Ok(TargetPosition::Start),
            "after" => Ok(TargetPosition::After),
            "end" => Ok(TargetPosition::End),
            other => Err(PipelineError::invalid_descriptor(format!(
                "unknown position `{other}`, expected one of before, start, after, end"
            ))),
        }
    }
}

/// Unit a containing-scope modifier binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeType {
    Token,
}

/// Serialized modifier descriptor.
///
/// ```json
/// { "type": "position", "position": "before" }
/// { "type": "containingScope", "scopeType": "token" }
/// { "type": "toRawSelection" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Modifier {
    Position {
        position: TargetPosition,
    },
    ContainingScope {
        #[serde(rename = "scopeType")]
        scope_type: ScopeType,
    },
    ToRawSelection,
}

impl Modifier {
    /// Parse a descriptor, reporting any shape mismatch as an invalid descriptor
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        serde_json::from_str(json).map_err(|e| PipelineError::invalid_descriptor(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> PipelineResult<Self> {
        serde_json::from_value(value).map_err(|e| PipelineError::invalid_descriptor(e.to_string()))
    }
}

impl Stage for Modifier {
    fn name(&self) -> &'static str {
        match self {
            Modifier::Position { .. } => PositionStage::NAME,
            Modifier::ContainingScope {
                scope_type: ScopeType::Token,
            } => TokenStage::NAME,
            Modifier::ToRawSelection => RawSelectionStage::NAME,
        }
    }

    fn run(
        &self,
        context: &PipelineContext<'_>,
        selection: &TypedSelection,
    ) -> PipelineResult<TypedSelection> {
        match *self {
            Modifier::Position { position } => {
                PositionStage::new(position).run(context, selection)
            }
            Modifier::ContainingScope {
                scope_type: ScopeType::Token,
            } => TokenStage.run(context, selection),
            Modifier::ToRawSelection => RawSelectionStage.run(context, selection),
        }
    }
}
