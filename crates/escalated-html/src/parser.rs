//! HTML5 fragment parser
//!
//! Uses html5ever's RcDom and converts it to our arena tree.
//! html5ever implements the browser tree-construction algorithm, so malformed
//! markup is repaired exactly the way a rendering engine would repair it.

use escalated_dom::{DomTree, ElementData, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Puts the document in standards mode and every input construct in body
/// context, which is what fragment parsing with a `<body>` context element does.
const BODY_PREFIX: &str = "<!DOCTYPE html><body>";

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML fragment. The top-level nodes of the fragment become
    /// children of the tree's synthetic root.
    pub fn parse_fragment(&self, html: &str) -> DomTree {
        let mut source = String::with_capacity(BODY_PREFIX.len() + html.len());
        source.push_str(BODY_PREFIX);
        source.push_str(html);

        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);

        let mut tree = DomTree::new();
        match find_body(&dom.document) {
            Some(body) => convert_children(&body, &mut tree),
            None => tracing::warn!("parsed document has no body element"),
        }

        tracing::debug!("Parsed fragment into {} nodes", tree.len());
        tree
    }
}

/// Locate `<html><body>` under the RcDom document node
fn find_body(document: &Handle) -> Option<Handle> {
    let html = first_element_child(document, "html")?;
    first_element_child(&html, "body")
}

fn first_element_child(parent: &Handle, local: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| match &child.data {
            RcNodeData::Element { name, .. } => &*name.local == local,
            _ => false,
        })
        .cloned()
}

/// Copy the children of `body` under the root of `tree`.
///
/// Walks with an explicit stack; input nesting depth never turns into call
/// stack depth.
fn convert_children(body: &Handle, tree: &mut DomTree) {
    let root = tree.root();
    let mut stack: Vec<(Handle, NodeId)> = body
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        match &handle.data {
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new(&name.local);
                for attr in attrs.borrow().iter() {
                    let attr_name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    elem.set_attr(&attr_name, attr.value.to_string());
                }

                let id = tree.create_element_with(elem);
                attach(tree, parent, id);

                // Template contents live outside `children` and are not copied
                for child in handle.children.borrow().iter().rev() {
                    stack.push((child.clone(), id));
                }
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                attach(tree, parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                attach(tree, parent, id);
            }
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

fn attach(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    if let Err(err) = tree.append_child(parent, child) {
        tracing::warn!(%err, "dropping node during conversion");
    }
}
