//! Child ordering
//!
//! Index manipulation on a parent's two child lists and anchor resolution
//! between them. The list functions are pure; the tree methods below keep
//! sibling pointers in step with the full list.

use crate::error::DomResult;
use crate::tree::DomTree;
use crate::NodeId;

/// Insert `node` at `position`, clamped to `[0, len]`. Returns the index used.
pub fn insert_index(list: &mut Vec<NodeId>, node: NodeId, position: usize) -> usize {
    let position = position.min(list.len());
    list.insert(position, node);
    position
}

/// Move `node` so that it lands before the entry currently at `position`
/// (`len` means the end).
///
/// Returns the node's new index, or `None` when the node is not in the list
/// or the move would leave it where it is.
pub fn move_index(list: &mut Vec<NodeId>, node: NodeId, position: usize) -> Option<usize> {
    let from = list.iter().position(|&id| id == node)?;
    let position = position.min(list.len());
    // Removing the node first shifts every later slot down by one
    let to = if from < position { position - 1 } else { position };
    if to == from {
        return None;
    }
    list.remove(from);
    list.insert(to, node);
    Some(to)
}

/// Remove `node` from the list. Returns its former index.
pub fn remove_index(list: &mut Vec<NodeId>, node: NodeId) -> Option<usize> {
    let index = list.iter().position(|&id| id == node)?;
    list.remove(index);
    Some(index)
}

/// Which of a parent's child lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildList {
    Full,
    Pure,
}

impl DomTree {
    fn child_list_mut(&mut self, parent: NodeId, which: ChildList) -> DomResult<&mut Vec<NodeId>> {
        let el = self.element_mut(parent)?;
        Ok(match which {
            ChildList::Full => &mut el.children,
            ChildList::Pure => &mut el.pure_children,
        })
    }

    pub(crate) fn insert_child_index(
        &mut self,
        parent: NodeId,
        node: NodeId,
        position: usize,
        which: ChildList,
    ) -> DomResult<usize> {
        let index = insert_index(self.child_list_mut(parent, which)?, node, position);
        if which == ChildList::Full {
            self.relink(parent, &[index.wrapping_sub(1), index, index + 1])?;
        }
        Ok(index)
    }

    pub(crate) fn move_child_index(
        &mut self,
        parent: NodeId,
        node: NodeId,
        position: usize,
        which: ChildList,
    ) -> DomResult<Option<usize>> {
        let list = self.child_list_mut(parent, which)?;
        let Some(from) = list.iter().position(|&id| id == node) else {
            return Ok(None);
        };
        let moved = move_index(list, node, position);
        if let (Some(to), ChildList::Full) = (moved, which) {
            self.relink(
                parent,
                &[from.wrapping_sub(1), from, from + 1, to.wrapping_sub(1), to, to + 1],
            )?;
        }
        Ok(moved)
    }

    pub(crate) fn remove_child_index(
        &mut self,
        parent: NodeId,
        node: NodeId,
        which: ChildList,
    ) -> DomResult<Option<usize>> {
        let removed = remove_index(self.child_list_mut(parent, which)?, node);
        if let (Some(index), ChildList::Full) = (removed, which) {
            let n = self.node_mut(node)?;
            n.prev_sibling = None;
            n.next_sibling = None;
            self.relink(parent, &[index.wrapping_sub(1), index])?;
        }
        Ok(removed)
    }

    /// Rewrite sibling pointers of the full-list entries at `indices`.
    /// Out-of-range indices are ignored.
    fn relink(&mut self, parent: NodeId, indices: &[usize]) -> DomResult<()> {
        let list = &self.element(parent)?.children;
        let links: Vec<_> = indices
            .iter()
            .filter(|&&i| i < list.len())
            .map(|&i| {
                let prev = i.checked_sub(1).map(|p| list[p]);
                (list[i], prev, list.get(i + 1).copied())
            })
            .collect();
        for (id, prev, next) in links {
            let n = self.node_mut(id)?;
            n.prev_sibling = prev;
            n.next_sibling = next;
        }
        Ok(())
    }

    /// Nearest renderable sibling after `node` in full order
    pub fn next_element(&self, node: NodeId) -> Option<NodeId> {
        let start = self.node(node)?.next_sibling;
        self.walk_renderable(start, true, None)
    }

    /// Nearest renderable sibling before `node` in full order
    pub fn previous_element(&self, node: NodeId) -> Option<NodeId> {
        let start = self.node(node)?.prev_sibling;
        self.walk_renderable(start, false, None)
    }

    /// First renderable node at or after `start`, skipping `skip`
    fn walk_renderable(&self, mut cursor: Option<NodeId>, forward: bool, skip: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = cursor {
            let node = self.node(id)?;
            if node.is_renderable() && Some(id) != skip {
                return Some(id);
            }
            cursor = if forward { node.next_sibling } else { node.prev_sibling };
        }
        None
    }

    /// Pure-list insertion point for placing `moving` before `reference`.
    ///
    /// The anchor is `reference` itself when renderable, else the nearest
    /// renderable node after it. `moving` never anchors itself.
    pub(crate) fn pure_position_before(&self, parent: NodeId, reference: NodeId, moving: NodeId) -> DomResult<usize> {
        let pure = &self.element(parent)?.pure_children;
        let anchor = self.walk_renderable(Some(reference), true, Some(moving));
        Ok(anchor
            .and_then(|a| pure.iter().position(|&id| id == a))
            .unwrap_or(pure.len()))
    }

    /// Pure-list insertion point for placing `moving` after `reference`
    pub(crate) fn pure_position_after(&self, parent: NodeId, reference: NodeId, moving: NodeId) -> DomResult<usize> {
        let pure = &self.element(parent)?.pure_children;
        let anchor = self.walk_renderable(Some(reference), false, Some(moving));
        Ok(anchor
            .and_then(|a| pure.iter().position(|&id| id == a))
            .map_or(0, |i| i + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().map(|&n| NodeId(n)).collect()
    }

    #[test]
    fn test_insert_index_clamps() {
        let mut list = ids(&[1, 2]);
        assert_eq!(insert_index(&mut list, NodeId(3), 10), 2);
        assert_eq!(insert_index(&mut list, NodeId(4), 0), 0);
        assert_eq!(list, ids(&[4, 1, 2, 3]));
    }

    #[test]
    fn test_move_to_end() {
        let mut list = ids(&[1, 2, 3]);
        assert_eq!(move_index(&mut list, NodeId(1), 3), Some(2));
        assert_eq!(list, ids(&[2, 3, 1]));
    }

    #[test]
    fn test_move_backwards() {
        let mut list = ids(&[1, 2, 3]);
        assert_eq!(move_index(&mut list, NodeId(3), 0), Some(0));
        assert_eq!(list, ids(&[3, 1, 2]));
    }

    #[test]
    fn test_move_in_place_is_noop() {
        let mut list = ids(&[1, 2, 3]);
        // Before itself, before its successor, and past the end when last
        assert_eq!(move_index(&mut list, NodeId(2), 1), None);
        assert_eq!(move_index(&mut list, NodeId(2), 2), None);
        assert_eq!(move_index(&mut list, NodeId(3), 3), None);
        assert_eq!(list, ids(&[1, 2, 3]));
    }

    #[test]
    fn test_move_missing_node() {
        let mut list = ids(&[1, 2]);
        assert_eq!(move_index(&mut list, NodeId(9), 0), None);
        assert_eq!(list, ids(&[1, 2]));
    }

    #[test]
    fn test_remove_index() {
        let mut list = ids(&[1, 2, 3]);
        assert_eq!(remove_index(&mut list, NodeId(2)), Some(1));
        assert_eq!(remove_index(&mut list, NodeId(2)), None);
        assert_eq!(list, ids(&[1, 3]));
    }

    #[test]
    fn test_anchor_resolution_skips_comments() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("a");
        let c1 = tree.create_comment("x");
        let c2 = tree.create_comment("y");
        let b = tree.create_element("b");
        for id in [a, c1, c2, b] {
            tree.append_child(root, id).unwrap();
        }

        assert_eq!(tree.next_element(c1), Some(b));
        assert_eq!(tree.next_element(a), Some(b));
        assert_eq!(tree.previous_element(c2), Some(a));
        assert_eq!(tree.previous_element(a), None);
        assert_eq!(tree.next_element(b), None);
    }

    #[test]
    fn test_sibling_pointers_follow_full_list() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_comment("b");
        let c = tree.create_element("c");
        for id in [a, b, c] {
            tree.append_child(root, id).unwrap();
        }
        tree.append_child(root, a).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[b, c, a]);
        assert_eq!(tree.previous_sibling(b), None);
        assert_eq!(tree.next_sibling(b), Some(c));
        assert_eq!(tree.previous_sibling(a), Some(c));
        assert_eq!(tree.next_sibling(a), None);
    }
}
