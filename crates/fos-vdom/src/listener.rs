//! Host command protocol
//!
//! Commands are sent one per host-visible change, in mutation order, and
//! only while the owning document has a bound listener. Indices refer to
//! the parent's renderable-only child order.

use crate::element::Props;
use crate::snapshot::Snapshot;
use crate::NodeId;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Target index for [`Command::AddElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildIndex {
    /// After the last renderable child (`-1` on the wire)
    Append,
    At(usize),
}

impl Serialize for ChildIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChildIndex::Append => serializer.serialize_i64(-1),
            ChildIndex::At(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// Host command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Insert a new renderable subtree under `parent_ref`
    AddElement {
        element: Snapshot,
        parent_ref: NodeId,
        index: ChildIndex,
    },
    /// Relocate an existing renderable node; `index` is its final position
    MoveElement {
        node_ref: NodeId,
        parent_ref: NodeId,
        index: usize,
    },
    RemoveElement { node_ref: NodeId },
    SetAttr { node_ref: NodeId, key: String, value: Value },
    SetStyle { node_ref: NodeId, key: String, value: Value },
    /// Replace the full computed style
    SetStyles { node_ref: NodeId, styles: Props },
    AddEvent { node_ref: NodeId, event_type: String },
    RemoveEvent { node_ref: NodeId, event_type: String },
}

impl Command {
    /// Protocol method name
    pub fn method(&self) -> &'static str {
        match self {
            Command::AddElement { .. } => "addElement",
            Command::MoveElement { .. } => "moveElement",
            Command::RemoveElement { .. } => "removeElement",
            Command::SetAttr { .. } => "setAttr",
            Command::SetStyle { .. } => "setStyle",
            Command::SetStyles { .. } => "setStyles",
            Command::AddEvent { .. } => "addEvent",
            Command::RemoveEvent { .. } => "removeEvent",
        }
    }

    /// Node the command is about
    pub fn node_ref(&self) -> NodeId {
        match self {
            Command::AddElement { element, .. } => element.id,
            Command::MoveElement { node_ref, .. }
            | Command::RemoveElement { node_ref }
            | Command::SetAttr { node_ref, .. }
            | Command::SetStyle { node_ref, .. }
            | Command::SetStyles { node_ref, .. }
            | Command::AddEvent { node_ref, .. }
            | Command::RemoveEvent { node_ref, .. } => *node_ref,
        }
    }
}

/// Receiver of host commands (the rendering host bridge)
pub trait Listener {
    fn send(&mut self, command: Command);
}

impl<F: FnMut(Command)> Listener for F {
    fn send(&mut self, command: Command) {
        (self)(command)
    }
}

/// Shared command recorder.
///
/// Clones share one buffer, so a clone can be bound to a document while
/// the first handle is used to inspect what was sent.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<Command>>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded commands
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Method names of recorded commands, oldest first
    pub fn methods(&self) -> Vec<&'static str> {
        self.commands.borrow().iter().map(Command::method).collect()
    }
}

impl Listener for CommandLog {
    fn send(&mut self, command: Command) {
        self.commands.borrow_mut().push(command);
    }
}
