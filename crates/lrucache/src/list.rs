//! Recency-ordered doubly linked list
//!
//! Nodes live in a slot arena and link to each other by index, so the list
//! owns every node and unlinking by handle is O(1). Vacated slots are kept
//! on a free list and reused by the next insert.

/// Handle to a node owned by an [`OrderedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Node in the recency list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked list ordered from most (head) to least (tail) recently used
pub(crate) struct OrderedList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> OrderedList<K, V> {
    /// Create an empty list with room for `capacity` nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked nodes
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently used node
    pub(crate) fn front(&self) -> Option<NodeId> {
        self.head
    }

    /// Least recently used node, the next eviction candidate
    pub(crate) fn back(&self) -> Option<NodeId> {
        self.tail
    }

    #[cfg(test)]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    pub(crate) fn value(&self, id: NodeId) -> &V {
        &self.node(id).value
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    /// Allocate a node for `(key, value)` and link it as the new head
    pub(crate) fn push_front(&mut self, key: K, value: V) -> NodeId {
        let id = self.alloc_node(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_front(id);
        self.len += 1;
        id
    }

    /// Relink an existing node as the head
    pub(crate) fn move_to_front(&mut self, id: NodeId) {
        if self.front() == Some(id) {
            return;
        }

        self.unlink(id);
        self.link_front(id);
    }

    /// Unlink a node from wherever it sits and release its slot
    pub(crate) fn remove(&mut self, id: NodeId) -> (K, V) {
        self.unlink(id);
        self.len -= 1;
        let node = match self.nodes[id.0].take() {
            Some(node) => node,
            None => panic!("list handle {:?} refers to a vacant slot", id),
        };
        self.free_list.push(id.0);
        (node.key, node.value)
    }

    /// Remove the tail node; `None` if the list is empty
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.back()?;
        Some(self.remove(tail))
    }

    /// Drop every node
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate front (most recent) to back (least recent)
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("list handle {:?} refers to a vacant slot", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("list handle {:?} refers to a vacant slot", id),
        }
    }

    fn link_front(&mut self, id: NodeId) {
        let old_head = self.head;
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head) => self.node_mut(head).prev = Some(id),
            None => self.tail = Some(id),
        }

        self.head = Some(id);
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = self.node_mut(id);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn alloc_node(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            NodeId(idx)
        } else {
            self.nodes.push(Some(node));
            NodeId(self.nodes.len() - 1)
        }
    }

    /// Walk head to tail checking back-links, tail and `len` agree
    #[cfg(test)]
    pub(crate) fn check_links(&self) -> Result<(), String> {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.prev != prev {
                return Err(format!(
                    "node {:?} has prev {:?}, expected {:?}",
                    id, node.prev, prev
                ));
            }
            count += 1;
            if count > self.len {
                return Err(format!("more than {} nodes reachable from head", self.len));
            }
            prev = Some(id);
            cursor = node.next;
        }

        if prev != self.tail {
            return Err(format!("walk ended at {:?}, tail is {:?}", prev, self.tail));
        }
        if count != self.len {
            return Err(format!("{} nodes reachable, len is {}", count, self.len));
        }
        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len {
            return Err(format!("{} occupied slots, len is {}", occupied, self.len));
        }
        Ok(())
    }
}

/// Front-to-back iterator over `(key, value)` pairs
pub(crate) struct Iter<'a, K, V> {
    list: &'a OrderedList<K, V>,
    cursor: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id);
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &OrderedList<u32, &'static str>) -> Vec<u32> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_push_front() {
        let mut list = OrderedList::with_capacity(4);

        let a = list.push_front(1, "a");
        assert_eq!(list.front(), Some(a));
        assert_eq!(list.back(), Some(a));

        list.push_front(2, "b");
        list.push_front(3, "c");

        assert_eq!(keys(&list), vec![3, 2, 1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.back(), Some(a));
        list.check_links().unwrap();
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = OrderedList::with_capacity(4);
        let a = list.push_front(1, "a");
        let b = list.push_front(2, "b");
        let c = list.push_front(3, "c");
        let d = list.push_front(4, "d");

        assert_eq!(list.remove(c), (3, "c"));
        assert_eq!(keys(&list), vec![4, 2, 1]);
        list.check_links().unwrap();

        assert_eq!(list.remove(d), (4, "d"));
        assert_eq!(list.front(), Some(b));
        list.check_links().unwrap();

        assert_eq!(list.remove(a), (1, "a"));
        assert_eq!(list.back(), Some(b));
        assert_eq!(keys(&list), vec![2]);
        list.check_links().unwrap();

        assert_eq!(list.remove(b), (2, "b"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.check_links().unwrap();
    }

    #[test]
    fn test_pop_back() {
        let mut list = OrderedList::with_capacity(2);
        assert_eq!(list.pop_back(), None);

        list.push_front(1, "a");
        list.push_front(2, "b");

        assert_eq!(list.pop_back(), Some((1, "a")));
        assert_eq!(list.pop_back(), Some((2, "b")));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_links().unwrap();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = OrderedList::with_capacity(3);
        let a = list.push_front(1, "a");
        let b = list.push_front(2, "b");
        list.push_front(3, "c");

        list.move_to_front(a);
        assert_eq!(keys(&list), vec![1, 3, 2]);
        assert_eq!(list.back(), Some(b));

        // Already at the head
        list.move_to_front(a);
        assert_eq!(keys(&list), vec![1, 3, 2]);
        assert_eq!(list.len(), 3);
        list.check_links().unwrap();
    }

    #[test]
    fn test_slot_reuse() {
        let mut list = OrderedList::with_capacity(2);
        let a = list.push_front(1, "a");
        list.push_front(2, "b");
        list.remove(a);

        let c = list.push_front(3, "c");
        assert_eq!(c, a);
        assert_eq!(list.key(c), &3);
        assert_eq!(list.value(c), &"c");
        assert_eq!(keys(&list), vec![3, 2]);
        list.check_links().unwrap();
    }

    #[test]
    fn test_value_mut() {
        let mut list = OrderedList::with_capacity(1);
        let a = list.push_front(1, "a");
        *list.value_mut(a) = "z";
        assert_eq!(list.value(a), &"z");
    }

    #[test]
    fn test_clear() {
        let mut list = OrderedList::with_capacity(2);
        list.push_front(1, "a");
        list.push_front(2, "b");
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.check_links().unwrap();
    }

    #[test]
    #[should_panic(expected = "vacant slot")]
    fn test_stale_handle_panics() {
        let mut list = OrderedList::with_capacity(1);
        let a = list.push_front(1, "a");
        list.remove(a);
        list.remove(a);
    }
}
