//! Target descriptors and their resolution into selections.
//!
//! A primitive target is a mark followed by modifiers. Range targets join two
//! primitive targets into one span, and list targets concatenate the results
//! of their elements.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::{Mark, Modifier, Pipeline, PipelineContext};
use crate::selection::{TypedSelection, delimiters_are_consistent};
use crate::text::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveTarget {
    pub mark: Mark,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl PrimitiveTarget {
    pub fn new(mark: Mark, modifiers: Vec<Modifier>) -> Self {
        Self { mark, modifiers }
    }

    pub fn resolve(&self, context: &PipelineContext<'_>) -> PipelineResult<Vec<TypedSelection>> {
        let selections = self.mark.resolve(context)?;
        Pipeline::new(self.modifiers.clone()).run(context, selections)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeTarget {
    pub anchor: PrimitiveTarget,
    pub active: PrimitiveTarget,
    #[serde(default)]
    pub exclude_anchor: bool,
    #[serde(default)]
    pub exclude_active: bool,
}

impl RangeTarget {
    /// Pair up the endpoint selections and join each pair.
    ///
    /// Endpoints resolving to the same number of selections are joined
    /// pairwise; an endpoint with exactly one selection is joined with each
    /// selection of the other. An endpoint without selections cannot be
    /// joined unless both are empty.
    pub fn resolve(&self, context: &PipelineContext<'_>) -> PipelineResult<Vec<TypedSelection>> {
        let anchors = self.anchor.resolve(context)?;
        let actives = self.active.resolve(context)?;

        let pairs: Vec<(&TypedSelection, &TypedSelection)> = match (anchors.len(), actives.len()) {
            (a, b) if a == b => anchors.iter().zip(actives.iter()).collect(),
            (0, _) | (_, 0) => {
                return Err(PipelineError::invalid_descriptor(
                    "range endpoint resolved to no selections",
                ));
            }
            (1, _) => actives.iter().map(|active| (&anchors[0], active)).collect(),
            (_, 1) => anchors.iter().map(|anchor| (anchor, &actives[0])).collect(),
            (a, b) => {
                return Err(PipelineError::invalid_descriptor(format!(
                    "range endpoints resolved to {a} and {b} selections"
                )));
            }
        };

        pairs
            .into_iter()
            .map(|(anchor, active)| {
                join_range(anchor, active, self.exclude_anchor, self.exclude_active)
            })
            .collect()
    }
}

/// Join two selections into a single selection spanning both.
pub fn join_range(
    anchor: &TypedSelection,
    active: &TypedSelection,
    exclude_anchor: bool,
    exclude_active: bool,
) -> PipelineResult<TypedSelection> {
    if anchor.editor != active.editor {
        return Err(PipelineError::MixedEditors {
            anchor: anchor.editor.uri().to_string(),
            active: active.editor.uri().to_string(),
        });
    }

    let is_reversed = active.content_range.start < anchor.content_range.start;
    let (first, last, exclude_first, exclude_last) = if is_reversed {
        (active, anchor, exclude_active, exclude_anchor)
    } else {
        (anchor, active, exclude_anchor, exclude_active)
    };

    let start = if exclude_first {
        first.content_range.end
    } else {
        first.content_range.start
    };
    let end = if exclude_last {
        last.content_range.start
    } else {
        last.content_range.end
    };
    // Excluding both ends of overlapping endpoints leaves nothing in between
    let content_range = if start <= end {
        Range::new(start, end)
    } else {
        Range::empty(end)
    };

    let mut leading = (!exclude_first)
        .then_some(first.leading_delimiter_range)
        .flatten();
    let mut trailing = (!exclude_last)
        .then_some(last.trailing_delimiter_range)
        .flatten();
    if !delimiters_are_consistent(
        anchor.editor.document(),
        &content_range,
        leading.as_ref(),
        trailing.as_ref(),
    ) {
        leading = None;
        trailing = None;
    }

    let delimiter = if first.delimiter == last.delimiter {
        first.delimiter.clone()
    } else {
        None
    };

    Ok(TypedSelection {
        is_reversed,
        is_raw_selection: first.is_raw_selection && last.is_raw_selection,
        delimiter,
        leading_delimiter_range: leading,
        trailing_delimiter_range: trailing,
        ..TypedSelection::new(anchor.editor.clone(), content_range)
    })
}

/// Serialized target descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Target {
    Primitive(PrimitiveTarget),
    Range(RangeTarget),
    List { elements: Vec<Target> },
}

impl Target {
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        serde_json::from_str(json).map_err(|e| PipelineError::invalid_descriptor(e.to_string()))
    }

    pub fn resolve(&self, context: &PipelineContext<'_>) -> PipelineResult<Vec<TypedSelection>> {
        match self {
            Target::Primitive(target) => target.resolve(context),
            Target::Range(target) => target.resolve(context),
            Target::List { elements } => {
                let mut selections = Vec::new();
                for element in elements {
                    selections.extend(element.resolve(context)?);
                }
                Ok(selections)
            }
        }
    }
}

/// Resolve each target of a command, keeping one selection group per target.
pub fn resolve_targets(
    context: &PipelineContext<'_>,
    targets: &[Target],
) -> PipelineResult<Vec<Vec<TypedSelection>>> {
    targets.iter().map(|target| target.resolve(context)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, EditorHandle};
    use crate::pipeline::{InMemoryHatTokenMap, MarkHistory, NoSyntax, ScopeType, TargetPosition};
    use crate::selection::SelectionWithEditor;
    use crate::text::Position;
    use serde_json::json;

    fn range(start: u32, end: u32) -> Range {
        Range::new(Position::new(0, start), Position::new(0, end))
    }

    fn token(editor: &EditorHandle, start: u32, end: u32) -> TypedSelection {
        TypedSelection::new(editor.clone(), range(start, end))
    }

    #[test]
    fn test_join_inclusive() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let joined = join_range(&token(&editor, 0, 3), &token(&editor, 8, 11), false, false).unwrap();
        assert_eq!(joined.content_range, range(0, 11));
        assert!(!joined.is_reversed);
    }

    #[test]
    fn test_join_exclusive_ends() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let joined = join_range(&token(&editor, 0, 3), &token(&editor, 8, 11), true, true).unwrap();
        assert_eq!(joined.content_range, range(3, 8));

        let joined = join_range(&token(&editor, 0, 3), &token(&editor, 8, 11), false, true).unwrap();
        assert_eq!(joined.content_range, range(0, 8));
    }

    #[test]
    fn test_join_reversed() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let joined = join_range(&token(&editor, 8, 11), &token(&editor, 0, 3), true, false).unwrap();
        assert!(joined.is_reversed);
        // The excluded anchor is the last endpoint in document order
        assert_eq!(joined.content_range, range(0, 8));
    }

    #[test]
    fn test_join_same_endpoint_excluded_twice_is_empty() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let bar = token(&editor, 4, 7);
        let joined = join_range(&bar, &bar, true, true).unwrap();
        assert!(joined.content_range.is_empty());
        assert!(joined.content_range.is_well_formed());
    }

    #[test]
    fn test_join_keeps_outer_delimiters() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "a foo bar b"));
        let first = TypedSelection {
            delimiter: Some(" ".to_string()),
            leading_delimiter_range: Some(range(1, 2)),
            trailing_delimiter_range: Some(range(5, 6)),
            ..token(&editor, 2, 5)
        };
        let last = TypedSelection {
            delimiter: Some(" ".to_string()),
            leading_delimiter_range: Some(range(5, 6)),
            trailing_delimiter_range: Some(range(9, 10)),
            ..token(&editor, 6, 9)
        };

        let joined = join_range(&first, &last, false, false).unwrap();
        assert_eq!(joined.content_range, range(2, 9));
        assert_eq!(joined.leading_delimiter_range, Some(range(1, 2)));
        assert_eq!(joined.trailing_delimiter_range, Some(range(9, 10)));
        assert_eq!(joined.delimiter.as_deref(), Some(" "));

        // Excluding the last endpoint would leave only a leading delimiter in
        // the middle of a line, so both are dropped
        let joined = join_range(&first, &last, false, true).unwrap();
        assert_eq!(joined.leading_delimiter_range, None);
        assert_eq!(joined.trailing_delimiter_range, None);
    }

    #[test]
    fn test_join_rejects_mixed_editors() {
        let a = EditorHandle::new(Document::new("file:///a.txt", "foo"));
        let b = EditorHandle::new(Document::new("file:///b.txt", "foo"));
        let err = join_range(&token(&a, 0, 3), &token(&b, 0, 3), false, false).unwrap_err();
        assert!(matches!(err, PipelineError::MixedEditors { .. }));
    }

    #[test]
    fn test_range_target_broadcasts_single_anchor() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let hats = InMemoryHatTokenMap::new();
        let marks = MarkHistory::new(
            vec![SelectionWithEditor::new(editor.clone(), range(0, 3))],
            vec![],
        );
        let cursors = vec![
            SelectionWithEditor::new(editor.clone(), range(4, 7)),
            SelectionWithEditor::new(editor.clone(), range(8, 11)),
        ];
        let context =
            PipelineContext::new(&hats, &marks, &NoSyntax).with_cursor_selections(&cursors);

        let target = RangeTarget {
            anchor: PrimitiveTarget::new(Mark::That, vec![]),
            active: PrimitiveTarget::new(Mark::Cursor, vec![]),
            exclude_anchor: false,
            exclude_active: false,
        };
        let selections = target.resolve(&context).unwrap();
        let ranges: Vec<_> = selections.iter().map(|s| s.content_range).collect();
        assert_eq!(ranges, vec![range(0, 7), range(0, 11)]);
    }

    #[test]
    fn test_range_target_rejects_empty_endpoint() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let hats = InMemoryHatTokenMap::new();
        let marks = MarkHistory::new(
            vec![SelectionWithEditor::new(editor.clone(), range(0, 3))],
            vec![],
        );
        let context = PipelineContext::new(&hats, &marks, &NoSyntax);

        let target = RangeTarget {
            anchor: PrimitiveTarget::new(Mark::That, vec![]),
            active: PrimitiveTarget::new(Mark::Nothing, vec![]),
            exclude_anchor: false,
            exclude_active: false,
        };
        assert!(matches!(
            target.resolve(&context),
            Err(PipelineError::InvalidDescriptor { .. })
        ));

        let both_empty = RangeTarget {
            anchor: PrimitiveTarget::new(Mark::Nothing, vec![]),
            active: PrimitiveTarget::new(Mark::Nothing, vec![]),
            exclude_anchor: false,
            exclude_active: false,
        };
        assert!(both_empty.resolve(&context).unwrap().is_empty());
    }

    #[test]
    fn test_range_target_rejects_mismatched_counts() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar baz"));
        let hats = InMemoryHatTokenMap::new();
        let two = vec![
            SelectionWithEditor::new(editor.clone(), range(0, 3)),
            SelectionWithEditor::new(editor.clone(), range(4, 7)),
        ];
        let three = vec![
            SelectionWithEditor::new(editor.clone(), range(0, 1)),
            SelectionWithEditor::new(editor.clone(), range(1, 2)),
            SelectionWithEditor::new(editor.clone(), range(2, 3)),
        ];
        let marks = MarkHistory::new(two, vec![]);
        let context = PipelineContext::new(&hats, &marks, &NoSyntax).with_cursor_selections(&three);

        let target = RangeTarget {
            anchor: PrimitiveTarget::new(Mark::That, vec![]),
            active: PrimitiveTarget::new(Mark::Cursor, vec![]),
            exclude_anchor: false,
            exclude_active: false,
        };
        assert!(matches!(
            target.resolve(&context),
            Err(PipelineError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_target_descriptor_shape() {
        let target = Target::from_json(
            &json!({
                "type": "list",
                "elements": [
                    {
                        "type": "primitive",
                        "mark": {"type": "cursor"},
                        "modifiers": [{"type": "containingScope", "scopeType": "token"}]
                    },
                    {
                        "type": "range",
                        "anchor": {"mark": {"type": "that"}},
                        "active": {
                            "mark": {"type": "source"},
                            "modifiers": [{"type": "position", "position": "end"}]
                        },
                        "excludeActive": true
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let Target::List { elements } = target else {
            panic!("expected list target");
        };
        assert_eq!(
            elements[0],
            Target::Primitive(PrimitiveTarget::new(
                Mark::Cursor,
                vec![Modifier::ContainingScope {
                    scope_type: ScopeType::Token
                }]
            ))
        );
        let Target::Range(range_target) = &elements[1] else {
            panic!("expected range target");
        };
        assert!(!range_target.exclude_anchor);
        assert!(range_target.exclude_active);
        assert_eq!(
            range_target.active.modifiers,
            vec![Modifier::Position {
                position: TargetPosition::End
            }]
        );
    }

    #[test]
    fn test_invalid_target_descriptor() {
        let err = Target::from_json(r#"{"type":"primitive"}"#).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_resolve_targets_keeps_groups() {
        let editor = EditorHandle::new(Document::new("file:///t.txt", "foo bar"));
        let hats = InMemoryHatTokenMap::new();
        let marks = MarkHistory::new(
            vec![SelectionWithEditor::new(editor.clone(), range(0, 3))],
            vec![SelectionWithEditor::new(editor.clone(), range(4, 7))],
        );
        let context = PipelineContext::new(&hats, &marks, &NoSyntax);

        let groups = resolve_targets(
            &context,
            &[
                Target::Primitive(PrimitiveTarget::new(Mark::That, vec![])),
                Target::List {
                    elements: vec![
                        Target::Primitive(PrimitiveTarget::new(Mark::Source, vec![])),
                        Target::Primitive(PrimitiveTarget::new(Mark::Nothing, vec![])),
                    ],
                },
            ],
        )
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].content_range, range(0, 3));
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].content_range, range(4, 7));
    }
}
