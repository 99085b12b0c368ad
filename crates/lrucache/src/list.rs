//! Recency list: doubly-linked list stored in an arena
//!
//! Nodes live in a `Vec` of slots and link to each other through generational
//! [`NodeId`] handles, so moving or removing a known node is O(1) without raw
//! pointers. The head is the least recently used end, the tail the most
//! recently used.
//!
//! ```text
//!   head ─► [a] ◄──► [b] ◄──► [c] ◄── tail
//!           LRU                MRU
//! ```

/// Handle to a node in a [`RecencyList`].
///
/// A handle stays valid until its node is removed. Slots are reused, but every
/// reuse bumps the slot generation, so a stale handle never resolves to a
/// node allocated later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Arena slot backing this node
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Doubly-linked recency list with O(1) insertion, removal and relocation
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if `id` refers to a live node of this list
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Handle of the head (least recently used) node
    pub fn head_id(&self) -> Option<NodeId> {
        self.head
    }

    /// Handle of the tail (most recently used) node
    pub fn tail_id(&self) -> Option<NodeId> {
        self.tail
    }

    /// Value stored at the head
    pub fn head(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Value stored at the tail
    pub fn tail(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Value stored in node `id`
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Mutable access to the value stored in node `id`
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Insert `value` as the new head and return its handle
    pub fn add_to_head(&mut self, value: T) -> NodeId {
        let id = self.alloc(value);
        self.attach_head(id);
        self.len += 1;
        id
    }

    /// Insert `value` as the new tail and return its handle
    pub fn add_to_tail(&mut self, value: T) -> NodeId {
        let id = self.alloc(value);
        self.attach_tail(id);
        self.len += 1;
        id
    }

    /// Remove the head node and return its value.
    ///
    /// Returns `None` when the list is empty. Callers that keep their own
    /// count (such as the cache) never hit that case.
    pub fn remove_from_head(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Remove the tail node and return its value, `None` when empty
    pub fn remove_from_tail(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Relocate node `id` to the head without reallocating it.
    ///
    /// Returns `false` if `id` is not a live node.
    pub fn move_to_head(&mut self, id: NodeId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.attach_head(id);
        true
    }

    /// Relocate node `id` to the tail without reallocating it.
    ///
    /// Returns `false` if `id` is not a live node.
    pub fn move_to_tail(&mut self, id: NodeId) -> bool {
        if self.tail == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.attach_tail(id);
        true
    }

    /// Detach node `id` from wherever it sits and return its value
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.unlink(id)?;
        self.len -= 1;
        self.release(id)
    }

    /// Insert `value` directly after node `id`.
    ///
    /// Returns the new node's handle, or `None` if `id` is not a live node.
    pub fn insert_after(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        let next = self.node(id)?.next;
        let new_id = self.alloc(value);
        if let Some(node) = self.node_mut(new_id) {
            node.prev = Some(id);
            node.next = next;
        }
        self.set_next(id, Some(new_id));
        match next {
            Some(next) => self.set_prev(next, Some(new_id)),
            None => self.tail = Some(new_id),
        }
        self.len += 1;
        Some(new_id)
    }

    /// Insert `value` directly before node `id`.
    ///
    /// Returns the new node's handle, or `None` if `id` is not a live node.
    pub fn insert_before(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        let prev = self.node(id)?.prev;
        let new_id = self.alloc(value);
        if let Some(node) = self.node_mut(new_id) {
            node.prev = prev;
            node.next = Some(id);
        }
        self.set_prev(id, Some(new_id));
        match prev {
            Some(prev) => self.set_next(prev, Some(new_id)),
            None => self.head = Some(new_id),
        }
        self.len += 1;
        Some(new_id)
    }

    /// Remove every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate values from head (LRU) to tail (MRU)
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Largest value in the list, scanning every node
    pub fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().max()
    }

    #[cfg(any(test, debug_assertions))]
    /// Walk the list in both directions and assert the link invariants
    pub fn debug_validate_invariants(&self) {
        if self.len == 0 {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            return;
        }
        if self.len == 1 {
            assert_eq!(self.head, self.tail);
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.node(id).expect("forward link to dead node");
            assert_eq!(node.prev, prev);
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "cycle in forward links");
        }
        assert_eq!(count, self.len);
        assert_eq!(prev, self.tail);

        let mut count = 0usize;
        let mut next = None;
        let mut current = self.tail;
        while let Some(id) = current {
            let node = self.node(id).expect("backward link to dead node");
            assert_eq!(node.next, next);
            next = Some(id);
            current = node.prev;
            count += 1;
            assert!(count <= self.len, "cycle in backward links");
        }
        assert_eq!(count, self.len);
        assert_eq!(next, self.head);

        let live = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        assert_eq!(live, self.len);
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.next = next;
        }
    }

    /// Store a detached node and hand out its handle
    fn alloc(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        Some(node.value)
    }

    fn attach_head(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.set_prev(old_head, Some(id)),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_tail(&mut self, id: NodeId) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(id) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(old_tail) => self.set_next(old_tail, Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Splice node `id` out of the chain, leaving it allocated but detached
    fn unlink(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        match (prev, next) {
            // Sole element
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
            (None, Some(next)) => {
                self.set_prev(next, None);
                self.head = Some(next);
            }
            (Some(prev), None) => {
                self.set_next(prev, None);
                self.tail = Some(prev);
            }
            (Some(prev), Some(next)) => {
                self.set_next(prev, Some(next));
                self.set_prev(next, Some(prev));
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values, head to tail (or tail to head with `rev`)
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a RecencyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
