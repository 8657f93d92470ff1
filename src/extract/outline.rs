//! Outline extraction: parsed document tree to flat node records.
//!
//! Walks the headline tree, propagating inherited tags down each path and
//! resolving every node's master (nearest identifier-bearing ancestor).
//! Identifier presence alone gates persistence: headlines without an `:ID:`
//! contribute their tags to descendants but produce no record.

use crate::domain::{Link, Node, NodeId, Tag};
use crate::extract::links::rewrite_title;
use crate::org::Document;

/// The records extracted from one document's outline.
#[derive(Debug, Clone, Default)]
pub struct OutlineRecords {
    /// The document-level node, present only when the top property drawer
    /// carries an identifier.
    pub topic: Option<Node>,
    /// Identified headline nodes in document (depth-first) order.
    pub nodes: Vec<Node>,
    /// Edges recorded while flattening title-embedded links.
    pub links: Vec<Link>,
}

/// Extracts node records from a parsed document.
///
/// `file` is the containing file's name (non-directory component), stored on
/// every record. Malformed identifiers and tags are skipped, never fatal.
pub fn extract_outline(doc: &Document, file: &str) -> OutlineRecords {
    let mut records = OutlineRecords::default();

    let topic_id = doc.id().and_then(|s| NodeId::new(s).ok());
    let filetags = valid_tags(&doc.filetags());

    if let Some(topic_id) = &topic_id {
        let raw_title = doc
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| file.trim_end_matches(".org").to_string());
        let (title, title_links) = rewrite_title(&raw_title, Some(topic_id));
        records.links.extend(title_links);
        records.topic = Some(Node::new(
            topic_id.clone(),
            file,
            title,
            0,
            filetags.clone(),
            None,
        ));
    }

    // Tags accumulated down the path from the root, one entry per headline.
    // Inheritance is monotonic: a descendant never loses an ancestor's tag.
    let mut inherited: Vec<Vec<Tag>> = Vec::with_capacity(doc.headlines.len());
    // Nearest identifier on the path, including the headline itself.
    let mut nearest_id: Vec<Option<NodeId>> = Vec::with_capacity(doc.headlines.len());

    for headline in &doc.headlines {
        let mut all_tags = match headline.parent {
            Some(p) => inherited[p].clone(),
            None => filetags.clone(),
        };
        for tag in valid_tags(&headline.tags) {
            push_unique(&mut all_tags, tag);
        }

        let own_id = headline.id().and_then(|s| NodeId::new(s).ok());
        let master = match headline.parent {
            Some(p) => nearest_id[p].clone(),
            None => topic_id.clone(),
        };

        if let Some(id) = &own_id {
            let (title, title_links) = rewrite_title(&headline.raw_title, Some(id));
            records.links.extend(title_links);
            records.nodes.push(Node::new(
                id.clone(),
                file,
                title,
                headline.level,
                all_tags.clone(),
                master.clone(),
            ));
        }

        nearest_id.push(own_id.or(master));
        inherited.push(all_tags);
    }

    records
}

fn valid_tags(raw: &[String]) -> Vec<Tag> {
    let mut tags = Vec::new();
    for s in raw {
        if let Ok(tag) = Tag::new(s) {
            push_unique(&mut tags, tag);
        }
    }
    tags
}

fn push_unique(tags: &mut Vec<Tag>, tag: Tag) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org;
    use pretty_assertions::assert_eq;

    fn tag_strs(node: &Node) -> Vec<&str> {
        node.tags().iter().map(|t| t.as_str()).collect()
    }

    const SAMPLE: &str = "\
:PROPERTIES:
:ID: T1
:END:
#+TITLE: Project Notes
#+FILETAGS: :proj:

* Urgent heading :urgent:
:PROPERTIES:
:ID: H1
:END:
** Deep child :deep:
:PROPERTIES:
:ID: H2
:END:
** Untracked child :scratch:
*** Grandchild :leaf:
:PROPERTIES:
:ID: H3
:END:
";

    #[test]
    fn topic_record_shape() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let topic = records.topic.unwrap();
        assert_eq!(topic.id().as_str(), "T1");
        assert_eq!(topic.title(), "Project Notes");
        assert_eq!(topic.level(), 0);
        assert_eq!(tag_strs(&topic), vec!["proj"]);
        assert!(topic.master().is_none());
    }

    #[test]
    fn level_one_master_is_topic() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let h1 = &records.nodes[0];
        assert_eq!(h1.id().as_str(), "H1");
        assert_eq!(h1.master().unwrap().as_str(), "T1");
        assert_eq!(h1.level(), 1);
    }

    #[test]
    fn tags_inherit_down_the_path() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let h2 = records.nodes.iter().find(|n| n.id().as_str() == "H2").unwrap();
        assert_eq!(tag_strs(h2), vec!["proj", "urgent", "deep"]);
    }

    #[test]
    fn unidentified_headline_still_passes_tags_down() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let h3 = records.nodes.iter().find(|n| n.id().as_str() == "H3").unwrap();
        assert_eq!(tag_strs(h3), vec!["proj", "urgent", "scratch", "leaf"]);
    }

    #[test]
    fn master_skips_unidentified_ancestors() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let h3 = records.nodes.iter().find(|n| n.id().as_str() == "H3").unwrap();
        assert_eq!(h3.master().unwrap().as_str(), "H1");
    }

    #[test]
    fn unidentified_headlines_emit_no_record() {
        let records = extract_outline(&org::parse(SAMPLE), "notes.org");
        let ids: Vec<&str> = records.nodes.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["H1", "H2", "H3"]);
    }

    #[test]
    fn no_document_id_gates_topic_but_not_headings() {
        let text = "\
#+FILETAGS: :proj:
* Heading
:PROPERTIES:
:ID: H1
:END:
";
        let records = extract_outline(&org::parse(text), "notes.org");
        assert!(records.topic.is_none());
        assert_eq!(records.nodes.len(), 1);
        // Filetags still inherited without a document id.
        assert_eq!(tag_strs(&records.nodes[0]), vec!["proj"]);
        // No identified ancestor at all: sentinel master.
        assert!(records.nodes[0].master().is_none());
    }

    #[test]
    fn topic_title_defaults_to_file_stem() {
        let text = ":PROPERTIES:\n:ID: T1\n:END:\n";
        let records = extract_outline(&org::parse(text), "daily.org");
        assert_eq!(records.topic.unwrap().title(), "daily");
    }

    #[test]
    fn title_links_are_flattened_and_recorded() {
        let text = "\
:PROPERTIES:
:ID: T1
:END:
* About [[id:other][the other note]]
:PROPERTIES:
:ID: H1
:END:
";
        let records = extract_outline(&org::parse(text), "notes.org");
        assert_eq!(records.nodes[0].title(), "About the other note");
        assert_eq!(
            records.links,
            vec![Link::new("H1".parse().unwrap(), "other".parse().unwrap())]
        );
    }

    #[test]
    fn duplicate_tags_deduplicated() {
        let text = "\
#+FILETAGS: :proj:
* Heading :proj:extra:
:PROPERTIES:
:ID: H1
:END:
";
        let records = extract_outline(&org::parse(text), "notes.org");
        assert_eq!(tag_strs(&records.nodes[0]), vec!["proj", "extra"]);
    }

    #[test]
    fn order_is_document_order() {
        let text = "\
* A
:PROPERTIES:
:ID: a
:END:
** B
:PROPERTIES:
:ID: b
:END:
* C
:PROPERTIES:
:ID: c
:END:
";
        let records = extract_outline(&org::parse(text), "notes.org");
        let ids: Vec<&str> = records.nodes.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
