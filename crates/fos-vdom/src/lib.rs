//! fOS VDOM - Virtual UI tree
//!
//! In-memory node graph mirroring a rendered interface. Every structural or
//! property change is forwarded to the rendering host as an ordered
//! [`Command`].
//!
//! Each element keeps two child lists: `children` holds every direct child
//! in document order (comments included), `pure_children` holds only the
//! renderable ones. Host-facing indices always refer to `pure_children`.

mod config;
mod element;
mod error;
mod listener;
mod node;
mod ordering;
mod properties;
mod registry;
mod snapshot;
mod tree;

pub use config::TreeConfig;
pub use element::{DomEvent, ElementData, ElementProps, EventHandler, Notify, Props};
pub use error::{DomError, DomResult};
pub use listener::{ChildIndex, Command, CommandLog, Listener};
pub use node::{Lifecycle, Node, NodeData, NodeKind};
pub use ordering::{insert_index, move_index, remove_index};
pub use registry::DocumentRegistry;
pub use snapshot::Snapshot;
pub use tree::DomTree;

pub use serde_json::Value;

use std::fmt;

/// Node identifier (index into the tree arena)
///
/// Also serves as the element `ref` on the host side, where it travels as a
/// decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Host-side reference string
    pub fn to_ref(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identifier of one tree instance (document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub(crate) u32);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}
