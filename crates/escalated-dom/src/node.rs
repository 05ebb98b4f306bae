//! DOM Node
//!
//! Nodes reference their neighbours by `NodeId` instead of pointers, which
//! keeps the tree free of `Rc` cycles and lets it be walked without recursion.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Whether this node has at least one child
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_valid()
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document/fragment root
    Document,
    /// Element
    Element(ElementData),
    /// Text content (entities already decoded)
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, lowercase
    pub name: String,
    /// Attributes in source order, names lowercase
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value (name is matched case-insensitively)
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute. A later value for the same name replaces the earlier
    /// one in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute { name, value });
    }

    /// Remove an attribute by name, returning its value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).value)
    }

    /// Remove every attribute matching `pred`, returning how many were removed
    pub fn remove_attrs_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Attribute) -> bool,
    {
        let before = self.attrs.len();
        self.attrs.retain(|a| !pred(a));
        before - self.attrs.len()
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase name, `prefix:local` for namespaced attributes
    pub name: String,
    /// Decoded value
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_is_lowercased() {
        let elem = ElementData::new("DIV");
        assert_eq!(elem.name, "div");
    }

    #[test]
    fn test_set_attr_last_wins() {
        let mut elem = ElementData::new("a");
        elem.set_attr("HREF", "/first");
        elem.set_attr("href", "/second");

        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.get_attr("href"), Some("/second"));
    }

    #[test]
    fn test_set_attr_keeps_position() {
        let mut elem = ElementData::new("p");
        elem.set_attr("id", "x");
        elem.set_attr("class", "y");
        elem.set_attr("id", "z");

        let names: Vec<_> = elem.attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["id", "class"]);
    }

    #[test]
    fn test_remove_attrs_where_counts() {
        let mut elem = ElementData::new("img");
        elem.set_attr("onclick", "a()");
        elem.set_attr("src", "x.png");
        elem.set_attr("onload", "b()");

        let removed = elem.remove_attrs_where(|a| a.name.starts_with("on"));
        assert_eq!(removed, 2);
        assert_eq!(elem.attrs.len(), 1);
        assert!(elem.has_attr("src"));
    }

    #[test]
    fn test_remove_attr() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "color:red");
        assert_eq!(elem.remove_attr("STYLE").as_deref(), Some("color:red"));
        assert!(elem.remove_attr("style").is_none());
    }
}
