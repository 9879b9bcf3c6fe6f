//! Virtual DOM Node
//!
//! Identity and tree linkage shared by every node kind. Linkage fields are
//! plain ids into the tree arena; they never own anything and are only
//! rewritten by the ordering engine.

use crate::element::ElementData;
use crate::{DocumentId, NodeId};

/// Node lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, no parent
    Unattached,
    /// Linked under a parent (or the body of a document)
    Attached,
    /// Removed without preservation; unusable
    Destroyed,
}

/// Node kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Renderable node, visible to the host
    Element,
    /// Non-renderable placeholder
    Comment,
}

/// Virtual DOM node
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    /// Owning document, `None` while detached
    pub(crate) document: Option<DocumentId>,
    pub(crate) state: Lifecycle,
    pub(crate) data: NodeData,
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Element(ElementData),
    Comment(String),
}

impl Node {
    pub(crate) fn element(id: NodeId, data: ElementData) -> Self {
        Self::with_data(id, NodeData::Element(data))
    }

    pub(crate) fn comment(id: NodeId, text: String) -> Self {
        Self::with_data(id, NodeData::Comment(text))
    }

    fn with_data(id: NodeId, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            document: None,
            state: Lifecycle::Unattached,
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }

    /// Whether the host can see this node
    #[inline]
    pub fn is_renderable(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn previous_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn document(&self) -> Option<DocumentId> {
        self.document
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == Lifecycle::Destroyed
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Comment(_) => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Comment(_) => None,
        }
    }

    pub fn as_comment(&self) -> Option<&str> {
        match &self.data {
            NodeData::Comment(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }

    /// Sever linkage and mark the node unusable.
    ///
    /// Children are not touched here; the tree walks the subtree.
    pub(crate) fn destroy(&mut self) {
        self.parent = None;
        self.prev_sibling = None;
        self.next_sibling = None;
        self.document = None;
        self.state = Lifecycle::Destroyed;
        if let NodeData::Element(e) = &mut self.data {
            e.release();
        }
    }
}
