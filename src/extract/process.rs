//! File processing: path in, unified record set out.

use crate::domain::{Link, Node};
use crate::extract::links::scan_body;
use crate::extract::outline::extract_outline;
use crate::infra::{FsError, read_org_text};
use crate::org;
use std::path::Path;

/// The unified record set for one file: topic, headline nodes, and every
/// link pair both extraction passes produced.
#[derive(Debug, Clone, Default)]
pub struct FileRecords {
    /// The file's name (non-directory component), the key all rows share.
    pub file: String,
    /// Document-level node, when the file carries an identifier.
    pub topic: Option<Node>,
    /// Identified headline nodes in document order.
    pub nodes: Vec<Node>,
    /// Title-pass links followed by body-scan links, in extraction order.
    pub links: Vec<Link>,
}

impl FileRecords {
    /// Iterates the topic (if any) followed by the headline nodes.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.topic.iter().chain(self.nodes.iter())
    }
}

/// Reads and processes one file into its record set.
///
/// The source file is never mutated; title rewriting happens only on the
/// extracted records. Read failures surface as [`FsError`]; the parse itself
/// is total and cannot fail.
pub fn process_file(path: &Path) -> Result<FileRecords, FsError> {
    let text = read_org_text(path)?;
    Ok(process_text(&text, &file_name(path)))
}

/// Pure form of [`process_file`], for callers that already hold the text.
pub fn process_text(text: &str, file: &str) -> FileRecords {
    let doc = org::parse(text);
    let outline = extract_outline(&doc, file);

    let topic_id = outline.topic.as_ref().map(|t| t.id().clone());
    let mut links = outline.links;
    links.extend(scan_body(text, &doc, topic_id.as_ref()));

    FileRecords {
        file: file.to_string(),
        topic: outline.topic,
        nodes: outline.nodes,
        links,
    }
}

/// Non-directory component of a path, used as the row key.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
