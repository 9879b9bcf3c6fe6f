//! Shared helpers for fos-vdom integration tests

#![allow(dead_code)]

use fos_vdom::{ChildIndex, Command, CommandLog, DocumentId, DomTree, NodeId, Snapshot};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness (filter with RUST_LOG)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Tree with one document, its body and a recording listener
pub struct Fixture {
    pub tree: DomTree,
    pub doc: DocumentId,
    pub body: NodeId,
    pub log: CommandLog,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let body = tree.create_body(doc, "div").expect("fresh document");
        let log = CommandLog::new();
        tree.bind_listener(doc, log.clone()).expect("open document");
        Self { tree, doc, body, log }
    }
}

/// Minimal rendering host: applies commands to per-parent child lists
#[derive(Debug, Default)]
pub struct HostModel {
    pub children: HashMap<NodeId, Vec<NodeId>>,
}

impl HostModel {
    pub fn apply_all(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::AddElement { element, parent_ref, index } => {
                let id = element.id;
                self.add_subtree(&element);
                let list = self.children.entry(parent_ref).or_default();
                match index {
                    ChildIndex::Append => list.push(id),
                    ChildIndex::At(i) => list.insert(i, id),
                }
            }
            Command::MoveElement { node_ref, parent_ref, index } => {
                let list = self.children.entry(parent_ref).or_default();
                let from = list.iter().position(|&id| id == node_ref).expect("moved node on host");
                list.remove(from);
                list.insert(index, node_ref);
            }
            Command::RemoveElement { node_ref } => {
                for list in self.children.values_mut() {
                    list.retain(|&id| id != node_ref);
                }
                self.children.remove(&node_ref);
            }
            _ => {}
        }
    }

    fn add_subtree(&mut self, snapshot: &Snapshot) {
        let ids = snapshot.children.iter().map(|c| c.id).collect();
        self.children.insert(snapshot.id, ids);
        for child in &snapshot.children {
            self.add_subtree(child);
        }
    }

    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.children.get(&parent).cloned().unwrap_or_default()
    }
}

/// Check the two-list invariant and sibling linkage under `parent`
pub fn assert_consistent(tree: &DomTree, parent: NodeId) {
    let children = tree.children(parent).expect("live parent");
    let renderable: Vec<NodeId> = children
        .iter()
        .copied()
        .filter(|&id| tree.node(id).is_some_and(|n| n.is_renderable()))
        .collect();
    assert_eq!(tree.pure_children(parent).unwrap(), renderable.as_slice());

    for (i, &id) in children.iter().enumerate() {
        assert_eq!(tree.parent(id), Some(parent), "parent of {}", id);
        let prev = i.checked_sub(1).map(|p| children[p]);
        assert_eq!(tree.previous_sibling(id), prev, "previous sibling of {}", id);
        assert_eq!(tree.next_sibling(id), children.get(i + 1).copied(), "next sibling of {}", id);
    }
}
