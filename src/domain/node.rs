//! Node record type produced by outline extraction.

use crate::domain::{NodeId, Tag};
use serde::Serialize;

/// An atomic knowledge unit: one identified headline, or the document topic.
///
/// Nodes are what synchronization persists. Only headlines that carry an
/// `:ID:` property become nodes; headlines without one are traversed for tag
/// inheritance and otherwise dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: NodeId,
    file: String,
    title: String,
    level: u32,
    tags: Vec<Tag>,
    master: Option<NodeId>,
}

impl Node {
    /// Creates a node record.
    ///
    /// `file` is the containing file's name (the non-directory component).
    /// `master` is the nearest identifier-bearing ancestor; `None` marks the
    /// document topic, stored as the sentinel value by the store layer.
    pub fn new(
        id: NodeId,
        file: impl Into<String>,
        title: impl Into<String>,
        level: u32,
        tags: Vec<Tag>,
        master: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            file: file.into(),
            title: title.into(),
            level,
            tags,
            master,
        }
    }

    /// Returns the node's identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the name of the containing file.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the display title, with embedded links flattened.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the outline depth (0 for the document topic).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the node's tags, own tags unioned with inherited ones.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the nearest identifier-bearing ancestor, if any.
    pub fn master(&self) -> Option<&NodeId> {
        self.master.as_ref()
    }
}

/// A directed link edge: `source` is the node where the reference appears,
/// `dest` is the node being referenced.
///
/// This orientation is applied uniformly: title-embedded links, body-scanned
/// links, and the synthesized master links all point away from the reference
/// site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    source: NodeId,
    dest: NodeId,
}

impl Link {
    /// Creates a link edge from `source` to `dest`.
    pub fn new(source: NodeId, dest: NodeId) -> Self {
        Self { source, dest }
    }

    /// Returns the node the reference appears in.
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Returns the node being referenced.
    pub fn dest(&self) -> &NodeId {
        &self.dest
    }
}
