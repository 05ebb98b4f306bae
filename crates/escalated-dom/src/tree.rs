//! DOM Tree (arena-based allocation)
//!
//! All structural edits go through `DomTree` so parent and sibling links stay
//! consistent. Detached nodes remain in the arena but are unreachable from the
//! root; they are freed together with the tree.

use crate::{DomError, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the synthetic root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The synthetic document/fragment root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        !self.nodes[NodeId::ROOT.index()].has_children()
    }

    /// Number of nodes reachable from the root, the root included
    pub fn reachable_len(&self) -> usize {
        1 + self.descendants(NodeId::ROOT).count()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached element from prepared data
    pub fn create_element_with(&mut self, data: ElementData) -> NodeId {
        self.push(NodeData::Element(data))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Text(content.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Comment(content.to_string()))
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::UnknownNode(id))
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.nodes[current.index()].parent;
        }
        false
    }

    fn check_move(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if child == NodeId::ROOT {
            return Err(DomError::RootImmovable);
        }
        // A leaf can only be its own ancestor
        let may_contain = child == parent || self.nodes[child.index()].has_children();
        if may_contain && self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings. Its own children stay attached.
    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_move(parent, child)?;
        self.unlink(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Insert `child` into `parent` immediately before `reference`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.check_move(parent, child)?;
        self.check(reference)?;
        if self.nodes[reference.index()].parent != parent {
            return Err(DomError::NotAChild { parent, reference });
        }
        if child == reference {
            return Ok(());
        }
        self.unlink(child);
        self.link_before(parent, child, reference);
        Ok(())
    }

    /// Link an unlinked `child` before `reference`, a child of `parent`
    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let prev = self.nodes[reference.index()].prev_sibling;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        self.nodes[reference.index()].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
    }

    /// Detach a node (and with it, its whole subtree) from the tree
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        self.check(id)?;
        if id == NodeId::ROOT {
            return Err(DomError::RootImmovable);
        }
        self.unlink(id);
        Ok(())
    }

    /// Replace an element with its children, keeping their order and position.
    /// Returns the ids of the moved children.
    pub fn unwrap_element(&mut self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        self.check(id)?;
        if id == NodeId::ROOT {
            return Err(DomError::RootImmovable);
        }
        let parent = self.nodes[id.index()].parent;
        let children = self.child_ids(id);
        // Descendants of `id` can never be ancestors of its parent, so the
        // cycle check is skipped here
        for &child in &children {
            self.unlink(child);
            if parent.is_valid() {
                self.link_before(parent, child, id);
            }
        }
        self.unlink(id);
        Ok(children)
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self
            .get(id)
            .map(|node| node.first_child)
            .unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Snapshot of the direct children ids, safe to hold across edits
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Pre-order iterator over the descendants of `id` (not including `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self
            .get(id)
            .map(|node| node.first_child)
            .unwrap_or(NodeId::NONE);
        Descendants {
            tree: self,
            start: id,
            next,
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| self.nodes[d.index()].as_text())
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order descendant iterator driven by the sibling/parent links, no stack
pub struct Descendants<'a> {
    tree: &'a DomTree,
    start: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut climb = current;
            loop {
                if climb == self.start {
                    break NodeId::NONE;
                }
                let n = &self.tree.nodes[climb.index()];
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                climb = n.parent;
                if !climb.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}
