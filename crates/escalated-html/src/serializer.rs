//! HTML Serialization (innerHTML/outerHTML)
//!
//! Renders a tree back to markup that re-parses to the same tree.
//!
//! - Text and attribute values are always escaped, attribute values always quoted
//! - Void elements are written self-closing, without an end tag
//! - Comments are not written
//! - Attributes whose names cannot be written back unambiguously are omitted

use escalated_dom::{DomTree, ElementData, NodeData, NodeId};

/// Void elements (self-closing, no end tag)
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose first newline is swallowed by the parser
const NEWLINE_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

/// HTML serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

enum Step<'a> {
    Enter(NodeId),
    Exit(&'a str),
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        let mut stack: Vec<Step<'_>> = Vec::new();
        push_children(tree, node_id, &mut stack);
        self.drive(tree, stack, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.drive(tree, vec![Step::Enter(node_id)], &mut output);
        output
    }

    fn drive<'a>(&self, tree: &'a DomTree, mut stack: Vec<Step<'a>>, output: &mut String) {
        while let Some(step) = stack.pop() {
            let node_id = match step {
                Step::Exit(tag) => {
                    output.push_str("</");
                    output.push_str(tag);
                    output.push('>');
                    continue;
                }
                Step::Enter(node_id) => node_id,
            };
            let Some(node) = tree.get(node_id) else {
                continue;
            };

            match &node.data {
                NodeData::Document => push_children(tree, node_id, &mut stack),
                NodeData::Element(elem) => {
                    write_start_tag(elem, output);
                    if VOID_ELEMENTS.contains(&elem.name.as_str()) {
                        output.push_str(" />");
                        continue;
                    }
                    output.push('>');
                    if NEWLINE_ELEMENTS.contains(&elem.name.as_str())
                        && starts_with_newline(tree, node_id)
                    {
                        output.push('\n');
                    }
                    stack.push(Step::Exit(&elem.name));
                    push_children(tree, node_id, &mut stack);
                }
                NodeData::Text(text) => escape_text(text, output),
                NodeData::Comment(_) => {}
            }
        }
    }
}

fn push_children<'a>(tree: &'a DomTree, parent: NodeId, stack: &mut Vec<Step<'a>>) {
    let children = tree.child_ids(parent);
    stack.extend(children.into_iter().rev().map(Step::Enter));
}

fn starts_with_newline(tree: &DomTree, node_id: NodeId) -> bool {
    tree.children(node_id)
        .next()
        .and_then(|(_, child)| child.as_text())
        .is_some_and(|text| text.starts_with('\n'))
}

fn write_start_tag(elem: &ElementData, output: &mut String) {
    output.push('<');
    output.push_str(&elem.name);
    for attr in &elem.attrs {
        if !is_writable_attr_name(&attr.name) {
            tracing::trace!(name = %attr.name, "omitting unwritable attribute");
            continue;
        }
        output.push(' ');
        output.push_str(&attr.name);
        output.push_str("=\"");
        escape_attribute(&attr.value, output);
        output.push('"');
    }
}

/// Whether an attribute name survives a write/re-parse cycle unchanged
fn is_writable_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '`')
        })
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}
