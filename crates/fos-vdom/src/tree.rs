//! Virtual DOM Tree (arena-based allocation)
//!
//! Owns every node, the document registry and the tree configuration.
//! Structural mutation entry points live here; property setters are in
//! `properties.rs`.
//!
//! Redundant requests (foreign parent, node already in the requested slot)
//! are silent no-ops so that reconciliation code can issue them freely.

use crate::config::TreeConfig;
use crate::element::{ElementData, ElementProps};
use crate::error::{DomError, DomResult};
use crate::listener::{ChildIndex, Command, Listener};
use crate::node::{Lifecycle, Node};
use crate::ordering::ChildList;
use crate::registry::DocumentRegistry;
use crate::{DocumentId, NodeId};

/// Arena-based virtual DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    registry: DocumentRegistry,
    config: TreeConfig,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.initial_capacity),
            registry: DocumentRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// Number of nodes ever allocated (destroyed ones included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    /// Create an unattached element
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.create_element_with_props(tag, ElementProps::default())
    }

    /// Create an unattached element with the configured default tag
    pub fn create_element_default(&mut self) -> NodeId {
        let tag = self.config.default_tag.clone();
        self.create_element(tag)
    }

    /// Create an unattached element with initial property maps.
    ///
    /// Initial values are not announced on their own; they reach the host
    /// inside the `addElement` snapshot.
    pub fn create_element_with_props(&mut self, tag: impl Into<String>, props: ElementProps) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node::element(id, ElementData::with_props(tag, props)));
        id
    }

    /// Create an unattached comment (non-renderable placeholder)
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node::comment(id, text.into()));
        id
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    pub fn create_document(&mut self) -> DocumentId {
        let doc = self.registry.open();
        tracing::debug!("Opened document {}", doc);
        doc
    }

    /// Create the root element of `doc`. An empty tag picks the default.
    pub fn create_body(&mut self, doc: DocumentId, tag: &str) -> DomResult<NodeId> {
        if !self.registry.is_open(doc) {
            return Err(DomError::UnknownDocument(doc));
        }
        if self.registry.body(doc).is_some() {
            return Err(DomError::BodyExists(doc));
        }
        let id = if tag.is_empty() {
            self.create_element_default()
        } else {
            self.create_element(tag)
        };
        self.registry.set_body(doc, id)?;
        let node = self.node_mut(id)?;
        node.state = Lifecycle::Attached;
        node.document = Some(doc);
        self.registry.register(doc, id);
        Ok(id)
    }

    pub fn body(&self, doc: DocumentId) -> Option<NodeId> {
        self.registry.body(doc)
    }

    pub fn bind_listener(&mut self, doc: DocumentId, listener: impl Listener + 'static) -> DomResult<()> {
        self.registry.bind_listener(doc, Box::new(listener))
    }

    pub fn unbind_listener(&mut self, doc: DocumentId) -> Option<Box<dyn Listener>> {
        self.registry.unbind_listener(doc)
    }

    /// Tear down a document: drop its listener, destroy the body subtree
    /// and forget the registry entry. No commands are sent.
    pub fn destroy_document(&mut self, doc: DocumentId) -> DomResult<()> {
        if !self.registry.is_open(doc) {
            return Err(DomError::UnknownDocument(doc));
        }
        self.registry.unbind_listener(doc);
        if let Some(body) = self.registry.body(doc) {
            self.destroy_subtree(body);
        }
        self.registry.close(doc);
        tracing::debug!("Destroyed document {}", doc);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Get a node by ID, destroyed or not
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a live node
    pub(crate) fn live(&self, id: NodeId) -> DomResult<&Node> {
        let node = self.nodes.get(id.index()).ok_or(DomError::NotFound(id))?;
        if node.is_destroyed() {
            return Err(DomError::Destroyed(id));
        }
        Ok(node)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        let node = self.nodes.get_mut(id.index()).ok_or(DomError::NotFound(id))?;
        if node.is_destroyed() {
            return Err(DomError::Destroyed(id));
        }
        Ok(node)
    }

    /// Get a live element
    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.live(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.node_mut(id)?.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    /// All direct children in document order
    pub fn children(&self, id: NodeId) -> DomResult<&[NodeId]> {
        Ok(&self.element(id)?.children)
    }

    /// Renderable direct children, in the order the host sees them
    pub fn pure_children(&self, id: NodeId) -> DomResult<&[NodeId]> {
        Ok(&self.element(id)?.pure_children)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.next_sibling
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.prev_sibling
    }

    pub fn document_of(&self, id: NodeId) -> Option<DocumentId> {
        self.node(id)?.document
    }

    pub fn is_destroyed(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_destroyed)
    }

    fn is_body(&self, id: NodeId) -> bool {
        self.document_of(id)
            .is_some_and(|doc| self.registry.body(doc) == Some(id))
    }

    // ------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------

    /// Append `node` as the last child of `parent`, or move it to the end
    /// if it already is a child.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> DomResult<()> {
        self.element(parent)?;
        let (current, renderable) = self.placement(node)?;
        match current {
            Some(p) if p != parent => {
                tracing::debug!("append_child: {} belongs to {}, ignored", node, p);
            }
            Some(_) => {
                let end = self.element(parent)?.children.len();
                self.move_child_index(parent, node, end, ChildList::Full)?;
                if renderable {
                    let end = self.element(parent)?.pure_children.len();
                    let moved = self.move_child_index(parent, node, end, ChildList::Pure)?;
                    self.emit_move(parent, node, moved)?;
                }
            }
            None => {
                self.check_hierarchy(parent, node)?;
                self.link_parent(parent, node)?;
                let end = self.element(parent)?.children.len();
                self.insert_child_index(parent, node, end, ChildList::Full)?;
                if renderable {
                    let end = self.element(parent)?.pure_children.len();
                    self.insert_child_index(parent, node, end, ChildList::Pure)?;
                    self.emit_add(parent, node, ChildIndex::Append)?;
                }
            }
        }
        Ok(())
    }

    /// Place `node` immediately before `before` in `parent`
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, before: NodeId) -> DomResult<()> {
        self.element(parent)?;
        let (current, renderable) = self.placement(node)?;
        if current.is_some_and(|p| p != parent) {
            tracing::debug!("insert_before: {} has a foreign parent, ignored", node);
            return Ok(());
        }
        if node == before || self.live(node)?.next_sibling == Some(before) {
            return Ok(());
        }
        let full_position = self.child_position(parent, before)?;
        let pure_position = if renderable {
            Some(self.pure_position_before(parent, before, node)?)
        } else {
            None
        };
        self.place(parent, node, current.is_some(), full_position, pure_position)
    }

    /// Place `node` immediately after `after` in `parent`
    pub fn insert_after(&mut self, parent: NodeId, node: NodeId, after: NodeId) -> DomResult<()> {
        self.element(parent)?;
        let (current, renderable) = self.placement(node)?;
        if current.is_some_and(|p| p != parent) {
            tracing::debug!("insert_after: {} has a foreign parent, ignored", node);
            return Ok(());
        }
        if node == after || self.live(node)?.prev_sibling == Some(after) {
            return Ok(());
        }
        let full_position = self.child_position(parent, after)? + 1;
        let pure_position = if renderable {
            Some(self.pure_position_after(parent, after, node)?)
        } else {
            None
        };
        self.place(parent, node, current.is_some(), full_position, pure_position)
    }

    /// Shared tail of insert_before/insert_after. Positions are expressed
    /// against the lists as they stand before the node is moved.
    fn place(
        &mut self,
        parent: NodeId,
        node: NodeId,
        is_child: bool,
        full_position: usize,
        pure_position: Option<usize>,
    ) -> DomResult<()> {
        if is_child {
            self.move_child_index(parent, node, full_position, ChildList::Full)?;
            if let Some(position) = pure_position {
                let moved = self.move_child_index(parent, node, position, ChildList::Pure)?;
                self.emit_move(parent, node, moved)?;
            }
        } else {
            self.check_hierarchy(parent, node)?;
            self.link_parent(parent, node)?;
            self.insert_child_index(parent, node, full_position, ChildList::Full)?;
            if let Some(position) = pure_position {
                let index = self.insert_child_index(parent, node, position, ChildList::Pure)?;
                self.emit_add(parent, node, ChildIndex::At(index))?;
            }
        }
        Ok(())
    }

    /// Detach `node` from `parent`.
    ///
    /// With `preserved` the subtree stays alive and can be attached
    /// elsewhere; otherwise it is destroyed.
    pub fn remove_child(&mut self, parent: NodeId, node: NodeId, preserved: bool) -> DomResult<()> {
        self.element(parent)?;
        let (current, renderable) = self.placement(node)?;
        match current {
            Some(p) if p == parent => {
                let doc = self.live(parent)?.document;
                self.remove_child_index(parent, node, ChildList::Full)?;
                if renderable {
                    self.remove_child_index(parent, node, ChildList::Pure)?;
                    self.emit(doc, |_| Ok(Command::RemoveElement { node_ref: node }))?;
                }
                let n = self.node_mut(node)?;
                n.parent = None;
                n.state = Lifecycle::Unattached;
                self.adopt_subtree(node, None);
            }
            Some(p) => {
                tracing::debug!("remove_child: {} belongs to {}, ignored", node, p);
                return Ok(());
            }
            None if self.is_body(node) => return Ok(()),
            None => {}
        }
        if !preserved {
            self.destroy_subtree(node);
        }
        Ok(())
    }

    /// Remove and destroy every child of `parent`
    pub fn clear(&mut self, parent: NodeId) -> DomResult<()> {
        let doc = self.live(parent)?.document;
        let el = self.element_mut(parent)?;
        let children = std::mem::take(&mut el.children);
        let pure = std::mem::take(&mut el.pure_children);
        for node in pure {
            self.emit(doc, |_| Ok(Command::RemoveElement { node_ref: node }))?;
        }
        for node in children {
            self.destroy_subtree(node);
        }
        Ok(())
    }

    /// Destroy `node` and its subtree, detaching it from its parent first.
    /// Calling this on an already destroyed node is harmless.
    pub fn destroy(&mut self, node: NodeId) -> DomResult<()> {
        let n = self.nodes.get(node.index()).ok_or(DomError::NotFound(node))?;
        if n.is_destroyed() {
            tracing::warn!("destroy: {} is already destroyed", node);
            return Ok(());
        }
        if let Some(parent) = n.parent {
            return self.remove_child(parent, node, false);
        }
        if let Some(doc) = n.document.filter(|_| self.is_body(node)) {
            return self.destroy_document(doc);
        }
        self.destroy_subtree(node);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Current parent and renderability of a live node
    fn placement(&self, node: NodeId) -> DomResult<(Option<NodeId>, bool)> {
        let n = self.live(node)?;
        Ok((n.parent, n.is_renderable()))
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> DomResult<usize> {
        self.element(parent)?
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(DomError::NotAChild { parent, node: child })
    }

    /// Reject attaching a node under itself, under its own descendants, or
    /// a document body under anything.
    fn check_hierarchy(&self, parent: NodeId, node: NodeId) -> DomResult<()> {
        if self.is_body(node) {
            return Err(DomError::HierarchyRequest { parent, node });
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == node {
                return Err(DomError::HierarchyRequest { parent, node });
            }
            cursor = self.parent(id);
        }
        Ok(())
    }

    fn link_parent(&mut self, parent: NodeId, node: NodeId) -> DomResult<()> {
        let doc = self.live(parent)?.document;
        let n = self.node_mut(node)?;
        n.parent = Some(parent);
        n.state = Lifecycle::Attached;
        self.adopt_subtree(node, doc);
        Ok(())
    }

    /// Move the subtree rooted at `node` into `doc` (or out of any
    /// document), keeping the registry's node tables in step.
    fn adopt_subtree(&mut self, node: NodeId, doc: Option<DocumentId>) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.nodes.get_mut(id.index()) else {
                continue;
            };
            if let Some(old) = n.document {
                self.registry.unregister(old, id);
            }
            n.document = doc;
            if let Some(new) = doc {
                self.registry.register(new, id);
            }
            if let Some(el) = n.as_element() {
                stack.extend_from_slice(&el.children);
            }
        }
    }

    pub(crate) fn destroy_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.nodes.get_mut(id.index()) else {
                continue;
            };
            if n.is_destroyed() {
                continue;
            }
            if let Some(el) = n.as_element() {
                stack.extend_from_slice(&el.children);
            }
            if let Some(doc) = n.document {
                self.registry.unregister(doc, id);
            }
            n.destroy();
        }
    }

    /// Send a command if the document has a listener. `build` only runs
    /// when someone is listening.
    pub(crate) fn emit(
        &mut self,
        doc: Option<DocumentId>,
        build: impl FnOnce(&Self) -> DomResult<Command>,
    ) -> DomResult<()> {
        let Some(doc) = doc else {
            return Ok(());
        };
        if !self.registry.has_listener(doc) {
            return Ok(());
        }
        let command = build(self)?;
        tracing::trace!("{} <- {} {}", doc, command.method(), command.node_ref());
        if let Some(listener) = self.registry.resolve_listener(doc) {
            listener.send(command);
        }
        Ok(())
    }

    fn emit_add(&mut self, parent: NodeId, node: NodeId, index: ChildIndex) -> DomResult<()> {
        let doc = self.live(parent)?.document;
        self.emit(doc, |tree| {
            Ok(Command::AddElement {
                element: tree.to_snapshot(node)?,
                parent_ref: parent,
                index,
            })
        })
    }

    fn emit_move(&mut self, parent: NodeId, node: NodeId, moved: Option<usize>) -> DomResult<()> {
        let Some(index) = moved else {
            tracing::debug!("{} already in place under {}, no move sent", node, parent);
            return Ok(());
        };
        let doc = self.live(parent)?.document;
        self.emit(doc, |_| {
            Ok(Command::MoveElement {
                node_ref: node,
                parent_ref: parent,
                index,
            })
        })
    }
}
