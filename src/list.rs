extern crate alloc;

use alloc::fmt;
use alloc::vec::Vec;

/// A handle to a node in a [`List`].
///
/// Handles are opaque and cheap to copy. They stay valid until the node is
/// removed or the list is cleared; after that they no longer resolve.
/// Each occupied slot is stamped with a generation drawn from a counter that
/// never resets, so a handle retained across a removal cannot alias a
/// recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeRef {
    index: usize,
    generation: u64,
}

/// A node in the list. Links are arena indices, not pointers.
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// One arena slot. `node` is `None` while the slot sits on the free list.
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// A doubly linked list backed by an arena of index-linked nodes.
///
/// Provides O(1) insertion at either end, O(1) removal of an arbitrary node
/// through its [`NodeRef`], and O(1) move-to-front. The front of the list is
/// the most recently used end; the back is the least recently used end.
///
/// The list knows nothing about keys or eviction. It is an ordering
/// primitive used from inside the cache's critical section and carries no
/// concurrency control of its own.
pub(crate) struct List<T> {
    slots: Vec<Slot<T>>,
    /// Indices of vacated slots available for reuse.
    free: Vec<usize>,
    /// Front of the list (most recently used end).
    head: Option<usize>,
    /// Back of the list (least recently used end).
    tail: Option<usize>,
    len: usize,
    /// Monotonic; never reset, not even by `clear`.
    next_generation: u64,
}

impl<T> List<T> {
    /// Creates an empty list with room for `capacity` nodes before the
    /// arena reallocates.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            next_generation: 0,
        }
    }

    /// Returns the current number of nodes in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a handle to the front (most recently used) node.
    pub(crate) fn front(&self) -> Option<NodeRef> {
        self.head.map(|index| NodeRef {
            index,
            generation: self.slots[index].generation,
        })
    }

    /// Returns a handle to the back (least recently used) node.
    pub(crate) fn back(&self) -> Option<NodeRef> {
        self.tail.map(|index| NodeRef {
            index,
            generation: self.slots[index].generation,
        })
    }

    /// Resolves a handle to its arena index, or `None` if the handle is
    /// stale (node removed, or list cleared since it was issued).
    fn resolve(&self, node: NodeRef) -> Option<usize> {
        let slot = self.slots.get(node.index)?;
        if slot.generation == node.generation && slot.node.is_some() {
            Some(node.index)
        } else {
            None
        }
    }

    /// Takes a slot off the free list (or grows the arena) and stamps it
    /// with a fresh generation.
    fn alloc(&mut self, value: T) -> usize {
        let generation = self.next_generation;
        self.next_generation += 1;

        let node = Node {
            value,
            prev: None,
            next: None,
        };

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = generation;
                slot.node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    fn node(&self, index: usize) -> &Node<T> {
        self.slots[index].node.as_ref().unwrap()
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        self.slots[index].node.as_mut().unwrap()
    }

    /// Unlinks the node at `index` from its neighbors, patching `head` and
    /// `tail` when the node is an endpoint. Does not touch the length or
    /// the slot itself; shared by `remove` and `move_to_front`.
    fn detach(&mut self, index: usize) {
        let (prev, next) = {
            let node = self.node(index);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links the node at `index` in at the front. The node must currently
    /// be detached.
    fn attach_front(&mut self, index: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(index);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    /// Links the node at `index` in at the back. The node must currently
    /// be detached.
    fn attach_back(&mut self, index: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(index);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    /// Inserts `value` at the front of the list and returns a handle to
    /// the new node. Always succeeds.
    pub(crate) fn push_front(&mut self, value: T) -> NodeRef {
        let index = self.alloc(value);
        self.attach_front(index);
        self.len += 1;
        NodeRef {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Inserts `value` at the back of the list and returns a handle to
    /// the new node. Always succeeds.
    pub(crate) fn push_back(&mut self, value: T) -> NodeRef {
        let index = self.alloc(value);
        self.attach_back(index);
        self.len += 1;
        NodeRef {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Removes the referenced node, reconnecting its neighbors, and returns
    /// its value.
    ///
    /// Returns `None` if the handle is stale. Callers inside this crate
    /// only hold handles that mirror live nodes, so a stale handle here is
    /// a bookkeeping defect, not a recoverable condition.
    pub(crate) fn remove(&mut self, node: NodeRef) -> Option<T> {
        let index = self.resolve(node)?;
        self.detach(index);
        self.len -= 1;
        let value = self.slots[index].node.take().map(|n| n.value);
        self.free.push(index);
        value
    }

    /// Moves the referenced node to the front of the list. No-op if the
    /// node is already at the front or the handle is stale.
    pub(crate) fn move_to_front(&mut self, node: NodeRef) {
        let index = match self.resolve(node) {
            Some(index) => index,
            None => return,
        };
        if self.head == Some(index) {
            return;
        }
        self.detach(index);
        self.attach_front(index);
    }

    /// Returns a reference to the value of the referenced node, or `None`
    /// if the handle is stale.
    pub(crate) fn get(&self, node: NodeRef) -> Option<&T> {
        let index = self.resolve(node)?;
        Some(&self.node(index).value)
    }

    /// Returns a mutable reference to the value of the referenced node, or
    /// `None` if the handle is stale.
    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        let index = self.resolve(node)?;
        Some(&mut self.slots[index].node.as_mut().unwrap().value)
    }

    /// Drops every node and empties the arena. All previously issued
    /// handles become stale; the generation counter keeps running so they
    /// can never resolve against recycled slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}
