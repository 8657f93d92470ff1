//! Core types: NodeId, Tag, Node, Link

mod node;
mod node_id;
mod tag;

pub use node::{Link, Node};
pub use node_id::{NodeId, ParseNodeIdError};
pub use tag::{ParseTagError, Tag};
