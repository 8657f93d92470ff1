//! Outline parser: raw org text to a typed element tree.
//!
//! This covers the subset of org syntax the extractors need: headlines with
//! trailing tags, property drawers, and `#+KEY:` keyword lines. Parsing is
//! total; malformed constructs are skipped rather than reported, so a parse
//! always yields a (possibly partial) document.

use crate::org::element::{Document, Headline, Keyword, NodeProperty, PropertyDrawer};
use regex::Regex;
use std::sync::LazyLock;

static HEADLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*+)[ \t]+(.*)$").expect("headline regex"));

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)[ \t]+(:(?:[\w@#%]+:)+)[ \t]*$").expect("tags regex"));

static TAGS_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(:(?:[\w@#%]+:)+)[ \t]*$").expect("tags-only regex"));

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\+([A-Za-z_]+):[ \t]*(.*)$").expect("keyword regex"));

static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z0-9_@#%-]+):(?:[ \t]+(.*))?$").expect("property regex"));

/// Parses org text into a [`Document`].
pub fn parse(text: &str) -> Document {
    let lines = line_offsets(text);

    let mut keywords = Vec::new();
    let mut doc_drawer: Option<PropertyDrawer> = None;
    let mut headlines: Vec<Headline> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (offset, line) = lines[i];

        if let Some(caps) = HEADLINE_RE.captures(line) {
            let level = caps[1].len() as u32;
            let (raw_title, tags) = split_tags(&caps[2]);

            i += 1;
            while i < lines.len() && is_planning(lines[i].1) {
                i += 1;
            }
            let drawer = if i < lines.len() && is_drawer_start(lines[i].1) {
                let (drawer, next) = parse_drawer(&lines, i + 1);
                i = next;
                Some(drawer)
            } else {
                None
            };

            headlines.push(Headline {
                level,
                raw_title,
                tags,
                drawer,
                parent: None,
                // End is patched below once the following headlines are known.
                span: offset..text.len(),
            });
            continue;
        }

        if headlines.is_empty() {
            if let Some(caps) = KEYWORD_RE.captures(line) {
                keywords.push(Keyword {
                    key: caps[1].to_string(),
                    value: caps[2].trim().to_string(),
                });
            } else if doc_drawer.is_none() && is_drawer_start(line) {
                let (drawer, next) = parse_drawer(&lines, i + 1);
                doc_drawer = Some(drawer);
                i = next;
                continue;
            }
        }

        i += 1;
    }

    resolve_parents(&mut headlines);
    resolve_spans(&mut headlines, text.len());

    Document {
        keywords,
        drawer: doc_drawer,
        headlines,
    }
}

/// Byte offset of each line start, paired with the line content sans newline.
fn line_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let content = raw.trim_end_matches('\n').trim_end_matches('\r');
        lines.push((offset, content));
        offset += raw.len();
    }
    lines
}

/// Splits a headline's text into title and trailing tags.
fn split_tags(rest: &str) -> (String, Vec<String>) {
    if let Some(caps) = TAGS_RE.captures(rest) {
        let title = caps[1].trim_end().to_string();
        return (title, split_tag_group(&caps[2]));
    }
    if let Some(caps) = TAGS_ONLY_RE.captures(rest) {
        return (String::new(), split_tag_group(&caps[1]));
    }
    (rest.trim_end().to_string(), Vec::new())
}

fn split_tag_group(group: &str) -> Vec<String> {
    group
        .split(':')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_planning(line: &str) -> bool {
    let trimmed = line.trim_start();
    ["SCHEDULED:", "DEADLINE:", "CLOSED:"]
        .iter()
        .any(|p| trimmed.starts_with(p))
}

fn is_drawer_start(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(":PROPERTIES:")
}

fn is_drawer_end(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(":END:")
}

/// Consumes `:KEY: value` lines starting at `start` until `:END:`, a new
/// headline, or end of input. Returns the drawer and the index of the first
/// unconsumed line. Lines that are not properties are skipped.
fn parse_drawer(lines: &[(usize, &str)], start: usize) -> (PropertyDrawer, usize) {
    let mut drawer = PropertyDrawer::default();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].1;
        if is_drawer_end(line) {
            return (drawer, i + 1);
        }
        if HEADLINE_RE.is_match(line) {
            // Unclosed drawer; give the headline back.
            return (drawer, i);
        }
        if let Some(caps) = PROPERTY_RE.captures(line.trim()) {
            drawer.properties.push(NodeProperty {
                key: caps[1].to_string(),
                value: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
            });
        }
        i += 1;
    }
    (drawer, i)
}

/// Links each headline to its structural parent via an index stack.
fn resolve_parents(headlines: &mut [Headline]) {
    let mut stack: Vec<usize> = Vec::new();
    for i in 0..headlines.len() {
        while let Some(&top) = stack.last() {
            if headlines[top].level >= headlines[i].level {
                stack.pop();
            } else {
                break;
            }
        }
        headlines[i].parent = stack.last().copied();
        stack.push(i);
    }
}

/// Extends each headline's span to cover its whole subtree: from the headline
/// line to the next headline of the same or shallower level.
fn resolve_spans(headlines: &mut [Headline], text_len: usize) {
    for i in 0..headlines.len() {
        let start = headlines[i].span.start;
        let end = headlines[i + 1..]
            .iter()
            .find(|h| h.level <= headlines[i].level)
            .map_or(text_len, |h| h.span.start);
        headlines[i].span = start..end;
    }
}
