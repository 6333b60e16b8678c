//! Read-only services a pipeline run may consult.
//!
//! The context is assembled once per command by the caller and borrowed by
//! every stage. Each service sits behind a trait so tests can hand in fakes.

use serde::Serialize;
use std::collections::HashMap;

use crate::document::EditorHandle;
use crate::selection::SelectionWithEditor;
use crate::text::Range;

/// Hat style used when a decorated mark names none
pub const DEFAULT_HAT_STYLE: &str = "default";

/// A token previously recorded under a hat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub editor: EditorHandle,
    pub range: Range,
}

/// Lookup from (hat style, character) to the token wearing that hat.
pub trait HatTokenMap {
    fn token(&self, hat_style: &str, character: char) -> Option<&Token>;
}

/// Hat map backed by a `HashMap`, filled in by whoever allocates hats.
#[derive(Debug, Default)]
pub struct InMemoryHatTokenMap {
    tokens: HashMap<(String, char), Token>,
}

impl InMemoryHatTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token, replacing whatever wore the same hat before
    pub fn insert(&mut self, hat_style: impl Into<String>, character: char, token: Token) {
        self.tokens.insert((hat_style.into(), character), token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl HatTokenMap for InMemoryHatTokenMap {
    fn token(&self, hat_style: &str, character: char) -> Option<&Token> {
        self.tokens.get(&(hat_style.to_string(), character))
    }
}

/// Selections left behind by the previous command.
#[derive(Debug, Clone, Default)]
pub struct MarkHistory {
    pub that_mark: Vec<SelectionWithEditor>,
    pub source_mark: Vec<SelectionWithEditor>,
}

impl MarkHistory {
    pub fn new(that_mark: Vec<SelectionWithEditor>, source_mark: Vec<SelectionWithEditor>) -> Self {
        Self {
            that_mark,
            source_mark,
        }
    }
}

/// A place in a document to look up a syntax node for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub editor: EditorHandle,
    pub range: Range,
}

/// Owned summary of a syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxNode {
    pub kind: String,
    pub is_named: bool,
    pub range: Range,
}

/// Resolve a location to the innermost syntax node covering it.
pub trait NodeLocator {
    fn node_at(&self, location: &Location) -> Option<SyntaxNode>;
}

impl<F> NodeLocator for F
where
    F: Fn(&Location) -> Option<SyntaxNode>,
{
    fn node_at(&self, location: &Location) -> Option<SyntaxNode> {
        self(location)
    }
}

/// Node locator for documents without a parsed tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSyntax;

impl NodeLocator for NoSyntax {
    fn node_at(&self, _location: &Location) -> Option<SyntaxNode> {
        None
    }
}

/// Capability bundle handed to every stage.
pub struct PipelineContext<'a> {
    hats: &'a dyn HatTokenMap,
    marks: &'a MarkHistory,
    nodes: &'a dyn NodeLocator,
    cursor_selections: &'a [SelectionWithEditor],
    default_hat_style: &'a str,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        hats: &'a dyn HatTokenMap,
        marks: &'a MarkHistory,
        nodes: &'a dyn NodeLocator,
    ) -> Self {
        Self {
            hats,
            marks,
            nodes,
            cursor_selections: &[],
            default_hat_style: DEFAULT_HAT_STYLE,
        }
    }

    pub fn with_cursor_selections(mut self, selections: &'a [SelectionWithEditor]) -> Self {
        self.cursor_selections = selections;
        self
    }

    pub fn with_default_hat_style(mut self, hat_style: &'a str) -> Self {
        self.default_hat_style = hat_style;
        self
    }

    pub fn hat_token(&self, hat_style: &str, character: char) -> Option<&'a Token> {
        self.hats.token(hat_style, character)
    }

    pub fn that_mark(&self) -> &'a [SelectionWithEditor] {
        &self.marks.that_mark
    }

    pub fn source_mark(&self) -> &'a [SelectionWithEditor] {
        &self.marks.source_mark
    }

    pub fn node_at(&self, location: &Location) -> Option<SyntaxNode> {
        self.nodes.node_at(location)
    }

    pub fn cursor_selections(&self) -> &'a [SelectionWithEditor] {
        self.cursor_selections
    }

    pub fn default_hat_style(&self) -> &'a str {
        self.default_hat_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::text::Position;

    fn editor() -> EditorHandle {
        EditorHandle::new(Document::new("file:///test.txt", "foo bar"))
    }

    #[test]
    fn test_in_memory_hat_map_lookup() {
        let mut hats = InMemoryHatTokenMap::new();
        let token = Token {
            editor: editor(),
            range: Range::new(Position::new(0, 4), Position::new(0, 7)),
        };
        hats.insert("blue", 'b', token.clone());

        assert_eq!(hats.len(), 1);
        assert_eq!(hats.token("blue", 'b'), Some(&token));
        assert_eq!(hats.token("default", 'b'), None);
        assert_eq!(hats.token("blue", 'a'), None);
    }

    #[test]
    fn test_context_defaults() {
        let hats = InMemoryHatTokenMap::new();
        let marks = MarkHistory::default();
        let context = PipelineContext::new(&hats, &marks, &NoSyntax);

        assert_eq!(context.default_hat_style(), DEFAULT_HAT_STYLE);
        assert!(context.cursor_selections().is_empty());
        assert!(context.that_mark().is_empty());
        assert!(context.source_mark().is_empty());
    }

    #[test]
    fn test_context_exposes_mark_history() {
        let hats = InMemoryHatTokenMap::new();
        let that = SelectionWithEditor::new(editor(), Range::empty(Position::new(0, 1)));
        let source = SelectionWithEditor::new(editor(), Range::empty(Position::new(0, 2)));
        let marks = MarkHistory::new(vec![that.clone()], vec![source.clone()]);
        let context = PipelineContext::new(&hats, &marks, &NoSyntax);

        assert_eq!(context.that_mark(), &[that]);
        assert_eq!(context.source_mark(), &[source]);
    }

    #[test]
    fn test_closure_node_locator() {
        let hats = InMemoryHatTokenMap::new();
        let marks = MarkHistory::default();
        let locator = |location: &Location| {
            Some(SyntaxNode {
                kind: "identifier".to_string(),
                is_named: true,
                range: location.range,
            })
        };
        let context = PipelineContext::new(&hats, &marks, &locator);
        let location = Location {
            editor: editor(),
            range: Range::new(Position::new(0, 0), Position::new(0, 3)),
        };

        let node = context.node_at(&location).unwrap();
        assert_eq!(node.kind, "identifier");
        assert_eq!(node.range, location.range);
        assert_eq!(PipelineContext::new(&hats, &marks, &NoSyntax).node_at(&location), None);
    }
}
