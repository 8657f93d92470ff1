//! Link extraction: title rewriting and body scanning.
//!
//! Two independent passes, both contributing to the same link set:
//!
//! 1. **Title rewriting** flattens `[[id:target][Visible]]` constructs inside
//!    a title to their visible text and records an edge from the titled node
//!    to each target.
//! 2. **Body scanning** finds every `[[id:...]]` occurrence in the raw file
//!    text and attributes it to the nearest enclosing headline that carries
//!    an identifier, falling back to the document topic.
//!
//! The passes are not deduplicated against each other; the store's unique
//! (source, dest) constraint absorbs exact duplicates.

use crate::domain::{Link, NodeId};
use crate::org::Document;
use regex::Regex;
use std::sync::LazyLock;

/// Any org bracket link, with optional description:
/// `[[path][description]]` or `[[path]]`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]\[]+)\](?:\[([^\]\[]*)\])?\]").expect("link regex"));

/// Strips the `id:` scheme from a link path, if present.
fn id_target(path: &str) -> Option<NodeId> {
    path.strip_prefix("id:").and_then(|t| NodeId::new(t).ok())
}

/// Flattens embedded links in a title and records edges for identifier links.
///
/// Every bracket link is replaced by its visible text: the description when
/// one is written, otherwise the path as-is. Edges are recorded only for
/// `id:` scheme links, in left-to-right order, and only when the titled
/// node's own identifier is known; rewriting still happens without one.
pub fn rewrite_title(raw: &str, source: Option<&NodeId>) -> (String, Vec<Link>) {
    let mut title = String::with_capacity(raw.len());
    let mut links = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(raw) {
        let whole = caps.get(0).expect("match");
        title.push_str(&raw[last..whole.start()]);

        let path = &caps[1];
        let visible = caps.get(2).map_or(path, |m| m.as_str());
        title.push_str(visible);

        if let (Some(source), Some(target)) = (source, id_target(path)) {
            links.push(Link::new(source.clone(), target));
        }

        last = whole.end();
    }
    title.push_str(&raw[last..]);

    (title, links)
}

/// Scans raw file text for identifier links and attributes each to the
/// nearest enclosing identified headline.
///
/// The search walks upward from the link's position: the deepest headline
/// whose section contains it, then its ancestors, then the document topic.
/// Matches with no identified source are discarded.
pub fn scan_body(text: &str, doc: &Document, topic_id: Option<&NodeId>) -> Vec<Link> {
    let mut links = Vec::new();

    for caps in LINK_RE.captures_iter(text) {
        let Some(target) = id_target(&caps[1]) else {
            continue;
        };
        let pos = caps.get(0).expect("match").start();
        if let Some(source) = enclosing_id(doc, pos, topic_id) {
            links.push(Link::new(source, target));
        }
    }

    links
}

/// Identifier of the nearest identified headline enclosing `pos`, falling
/// back to the document topic.
fn enclosing_id(doc: &Document, pos: usize, topic_id: Option<&NodeId>) -> Option<NodeId> {
    let mut current = doc.headline_at(pos);
    while let Some(i) = current {
        let headline = &doc.headlines[i];
        if let Some(id) = headline.id().and_then(|s| NodeId::new(s).ok()) {
            return Some(id);
        }
        current = headline.parent;
    }
    topic_id.cloned()
}
