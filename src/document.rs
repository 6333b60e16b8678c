//! Document snapshots and the editor handle selections carry.

mod model;

pub use model::Document;

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared, read-only handle to the document a selection belongs to.
///
/// Cloning is cheap; every selection derived from another keeps pointing at
/// the same snapshot. Two handles are equal when they refer to the same
/// document URI at the same version.
#[derive(Clone)]
pub struct EditorHandle(Arc<Document>);

impl EditorHandle {
    pub fn new(document: Document) -> Self {
        Self(Arc::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for EditorHandle {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

impl Deref for EditorHandle {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.0
    }
}

impl PartialEq for EditorHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.uri() == other.0.uri() && self.0.version() == other.0.version())
    }
}

impl Eq for EditorHandle {}

impl fmt::Debug for EditorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EditorHandle").field(&self.0.uri()).finish()
    }
}

impl Serialize for EditorHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.uri())
    }
}
