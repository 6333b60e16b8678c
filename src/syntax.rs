//! Tree-sitter backed node lookup.
//!
//! Tree-sitter reports byte offsets, while selections use UTF-16 columns.
//! Conversion goes through the document snapshot the tree was parsed from.

use tree_sitter::{Node, Tree};

use crate::document::{Document, EditorHandle};
use crate::pipeline::{Location, NodeLocator, SyntaxNode};
use crate::text::{Position, Range};

/// Convert a tree-sitter node to a range with UTF-16 columns.
///
/// Falls back to the start of the node's row when a byte offset cannot be
/// mapped, which only happens when the tree and text are out of sync.
pub fn node_to_range(node: Node, document: &Document) -> Range {
    let start = document
        .byte_to_position(node.start_byte())
        .unwrap_or_else(|| Position::new(node.start_position().row as u32, 0));
    let end = document
        .byte_to_position(node.end_byte())
        .unwrap_or_else(|| Position::new(node.end_position().row as u32, 0));
    Range::new(start, end)
}

/// Owned summary of a tree-sitter node
pub fn summarize_node(node: Node, document: &Document) -> SyntaxNode {
    SyntaxNode {
        kind: node.kind().to_string(),
        is_named: node.is_named(),
        range: node_to_range(node, document),
    }
}

/// [`NodeLocator`] over a parsed tree of one document.
pub struct TreeNodeLocator<'tree> {
    tree: &'tree Tree,
    editor: EditorHandle,
}

impl<'tree> TreeNodeLocator<'tree> {
    /// `tree` must have been parsed from the text of `editor`.
    pub fn new(tree: &'tree Tree, editor: EditorHandle) -> Self {
        Self { tree, editor }
    }
}

impl NodeLocator for TreeNodeLocator<'_> {
    fn node_at(&self, location: &Location) -> Option<SyntaxNode> {
        if location.editor != self.editor {
            log::debug!(
                target: "target_pipeline::syntax",
                "node lookup for {} against tree of {}",
                location.editor.uri(),
                self.editor.uri()
            );
            return None;
        }

        let document = self.editor.document();
        let start = document.position_to_byte(location.range.start)?;
        let end = document.position_to_byte(location.range.end)?;
        let node = self
            .tree
            .root_node()
            .descendant_for_byte_range(start, end)?;
        Some(summarize_node(node, document))
    }
}
