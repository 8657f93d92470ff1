//! Typed element tree produced by the outline parser.
//!
//! The extractors consume this tree and never look at raw text themselves,
//! with the one documented exception of the body link scan, which works on
//! the original source string using the headline spans recorded here.

use std::ops::Range;

/// A `#+KEY: value` keyword line from the document preface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub key: String,
    pub value: String,
}

/// A single `:KEY: value` line inside a property drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeProperty {
    pub key: String,
    pub value: String,
}

/// A `:PROPERTIES:` ... `:END:` drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDrawer {
    pub properties: Vec<NodeProperty>,
}

impl PropertyDrawer {
    /// Looks up a property by key, case-insensitively. Last entry wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .map(|p| p.value.as_str())
    }
}

/// One parsed headline and the extent of its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// Outline depth, 1 for a top-level `*` headline.
    pub level: u32,
    /// Title text as written, tags stripped, embedded links not yet rewritten.
    pub raw_title: String,
    /// The headline's own tags, as written (unvalidated).
    pub tags: Vec<String>,
    /// Property drawer directly under the headline, if present.
    pub drawer: Option<PropertyDrawer>,
    /// Index of the parent headline in `Document::headlines`.
    pub parent: Option<usize>,
    /// Byte range of the headline plus its entire subtree section.
    pub span: Range<usize>,
}

impl Headline {
    /// Returns the `:ID:` property, if the headline carries one.
    pub fn id(&self) -> Option<&str> {
        self.drawer.as_ref().and_then(|d| d.get("ID"))
    }
}

/// A parsed outline document.
///
/// Headlines are stored flat, in document (depth-first) order, with parent
/// references by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Keyword lines from before the first headline.
    pub keywords: Vec<Keyword>,
    /// Top-of-file property drawer, if present before the first headline.
    pub drawer: Option<PropertyDrawer>,
    /// All headlines in document order.
    pub headlines: Vec<Headline>,
}

impl Document {
    /// Returns the document title from `#+TITLE:`, if declared.
    pub fn title(&self) -> Option<&str> {
        self.keyword("TITLE")
    }

    /// Returns the document identifier from the top property drawer.
    pub fn id(&self) -> Option<&str> {
        self.drawer.as_ref().and_then(|d| d.get("ID"))
    }

    /// Returns the raw `#+FILETAGS:` values, split but unvalidated.
    ///
    /// Accepts org's `:a:b:` form as well as space- or comma-separated lists.
    pub fn filetags(&self) -> Vec<String> {
        match self.keyword("FILETAGS") {
            Some(value) => value
                .split([':', ' ', ','])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the index of the deepest headline whose section contains the
    /// given byte position, or `None` for positions before the first headline.
    pub fn headline_at(&self, pos: usize) -> Option<usize> {
        let mut found = None;
        for (i, h) in self.headlines.iter().enumerate() {
            if h.span.contains(&pos) {
                // Spans nest, so a later containing span is a deeper one.
                found = Some(i);
            }
        }
        found
    }

    fn keyword(&self, key: &str) -> Option<&str> {
        self.keywords
            .iter()
            .rev()
            .find(|k| k.key.eq_ignore_ascii_case(key))
            .map(|k| k.value.as_str())
    }
}
