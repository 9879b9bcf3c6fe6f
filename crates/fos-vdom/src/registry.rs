//! Document registry
//!
//! Per-document live node table and listener lookup. Owned by the tree
//! and handed every attach/destroy, so there is no global state.

use crate::error::{DomError, DomResult};
use crate::listener::Listener;
use crate::{DocumentId, NodeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Default)]
struct DocumentEntry {
    nodes: HashSet<NodeId>,
    listener: Option<Box<dyn Listener>>,
    body: Option<NodeId>,
}

/// Document id → live nodes + bound listener
#[derive(Default)]
pub struct DocumentRegistry {
    next_id: u32,
    documents: HashMap<DocumentId, DocumentEntry>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new document entry
    pub fn open(&mut self) -> DocumentId {
        self.next_id += 1;
        let id = DocumentId(self.next_id);
        self.documents.insert(id, DocumentEntry::default());
        id
    }

    /// Drop a document entry along with its listener
    pub fn close(&mut self, doc: DocumentId) -> bool {
        self.documents.remove(&doc).is_some()
    }

    pub fn is_open(&self, doc: DocumentId) -> bool {
        self.documents.contains_key(&doc)
    }

    pub fn register(&mut self, doc: DocumentId, node: NodeId) {
        if let Some(entry) = self.documents.get_mut(&doc) {
            entry.nodes.insert(node);
        }
    }

    pub fn unregister(&mut self, doc: DocumentId, node: NodeId) {
        if let Some(entry) = self.documents.get_mut(&doc) {
            entry.nodes.remove(&node);
        }
    }

    pub fn contains(&self, doc: DocumentId, node: NodeId) -> bool {
        self.documents
            .get(&doc)
            .is_some_and(|entry| entry.nodes.contains(&node))
    }

    /// Number of live nodes registered to `doc`
    pub fn node_count(&self, doc: DocumentId) -> usize {
        self.documents.get(&doc).map_or(0, |entry| entry.nodes.len())
    }

    pub fn bind_listener(&mut self, doc: DocumentId, listener: Box<dyn Listener>) -> DomResult<()> {
        let entry = self.documents.get_mut(&doc).ok_or(DomError::UnknownDocument(doc))?;
        entry.listener = Some(listener);
        Ok(())
    }

    pub fn unbind_listener(&mut self, doc: DocumentId) -> Option<Box<dyn Listener>> {
        self.documents.get_mut(&doc)?.listener.take()
    }

    pub fn has_listener(&self, doc: DocumentId) -> bool {
        self.documents
            .get(&doc)
            .is_some_and(|entry| entry.listener.is_some())
    }

    pub fn resolve_listener(&mut self, doc: DocumentId) -> Option<&mut (dyn Listener + 'static)> {
        self.documents.get_mut(&doc)?.listener.as_deref_mut()
    }

    pub fn body(&self, doc: DocumentId) -> Option<NodeId> {
        self.documents.get(&doc)?.body
    }

    pub(crate) fn set_body(&mut self, doc: DocumentId, body: NodeId) -> DomResult<()> {
        let entry = self.documents.get_mut(&doc).ok_or(DomError::UnknownDocument(doc))?;
        if entry.body.is_some() {
            return Err(DomError::BodyExists(doc));
        }
        entry.body = Some(body);
        Ok(())
    }
}

impl fmt::Debug for DocumentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, entry) in &self.documents {
            map.entry(id, &(entry.nodes.len(), entry.listener.is_some()));
        }
        map.finish()
    }
}
