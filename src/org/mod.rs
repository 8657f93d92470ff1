//! Outline parsing: org text to a typed element tree.

mod element;
mod parser;

pub use element::{Document, Headline, Keyword, NodeProperty, PropertyDrawer};
pub use parser::parse;
