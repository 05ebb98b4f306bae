//! Escalated HTML
//!
//! Lenient HTML fragment parsing built on html5ever, and serialization of the
//! resulting tree back to markup.

mod parser;
mod serializer;

pub use escalated_dom::{DomTree, Node, NodeData, NodeId};
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, VOID_ELEMENTS};

/// Parse an HTML fragment in `<body>` context
pub fn parse_fragment(html: &str) -> DomTree {
    HtmlParser::new().parse_fragment(html)
}

/// Serialize the children of a node (innerHTML)
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Serialize a node and its descendants (outerHTML)
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
