//! Chunked slab allocator that hands out stable handles to tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};

/// Number of slots allocated per chunk when no chunk size is specified.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// A stable, copyable reference to an object stored in a `TypedArena<T>`.
///
/// A handle never owns the object it refers to. It stays valid until the object is freed, after
/// which the slot may be reused by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk: usize,
    slot: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Storage is a list of fixed-capacity chunks, so growing the arena never moves objects that are
/// already allocated. Freed slots are threaded onto a free list and reused before a new chunk is
/// requested. Dropping the arena drops every object still allocated in it.
///
/// # Examples
///
/// ```
/// use balanced_trees::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: arena chunk size must be positive.");
        TypedArena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
        }
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.chunks.get(handle.chunk).and_then(|chunk| chunk.get(handle.slot))
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        self.chunks
            .get_mut(handle.chunk)
            .and_then(|chunk| chunk.get_mut(handle.slot))
    }

    /// Moves `value` into the arena and returns the handle that addresses it.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.free_head.take() {
            let chunk_slot = &mut self.chunks[handle.chunk][handle.slot];
            match mem::replace(chunk_slot, Slot::Occupied(value)) {
                Slot::Vacant(next) => self.free_head = next,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            }
            return handle;
        }

        let needs_chunk = match self.chunks.last() {
            Some(chunk) => chunk.len() == self.chunk_size,
            None => true,
        };
        if needs_chunk {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
        }

        let chunk = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk];
        last_chunk.push(Slot::Occupied(value));
        Handle {
            chunk,
            slot: last_chunk.len() - 1,
        }
    }

    /// Removes the object addressed by `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range or addresses a vacant slot.
    pub fn free(&mut self, handle: Handle) -> T {
        let next = self.free_head;
        let chunk_slot = self
            .slot_mut(handle)
            .expect("Error: attempting to free invalid slot.");
        match mem::replace(chunk_slot, Slot::Vacant(next)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free_head = Some(handle);
                value
            },
            Slot::Vacant(old_next) => {
                *chunk_slot = Slot::Vacant(old_next);
                panic!("Error: attempting to free vacant slot.");
            },
        }
    }

    /// Returns an immutable reference to the object addressed by `handle`, or `None` if the
    /// handle does not address a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slot(handle) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object addressed by `handle`, or `None` if the handle
    /// does not address a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slot_mut(handle) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases all chunks. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not address a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not address a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: TypedArena<u32> = TypedArena::new(4);
        arena.free(Handle { chunk: 0, slot: 0 });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _arena: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    fn test_allocate_fills_chunks_in_order() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate('a'), Handle { chunk: 0, slot: 0 });
        assert_eq!(arena.allocate('b'), Handle { chunk: 0, slot: 1 });
        assert_eq!(arena.allocate('c'), Handle { chunk: 1, slot: 0 });
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = TypedArena::new(4);
        let first = arena.allocate(10);
        let second = arena.allocate(20);
        assert_eq!(arena.free(first), 10);
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.allocate(30), first);
        assert_eq!(arena[first], 30);
        assert_eq!(arena[second], 20);
    }

    #[test]
    fn test_free_list_is_last_in_first_out() {
        let mut arena = TypedArena::new(4);
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        arena.free(a);
        arena.free(b);
        assert_eq!(arena.allocate(3), b);
        assert_eq!(arena.allocate(4), a);
        assert_eq!(arena.allocate(5), Handle { chunk: 0, slot: 2 });
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        assert_eq!(arena.get(handle), Some(&1));
    }

    #[test]
    fn test_get_out_of_range() {
        let arena: TypedArena<u32> = TypedArena::new(4);
        assert_eq!(arena.get(Handle { chunk: 3, slot: 1 }), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(7);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.allocate(8), Handle { chunk: 0, slot: 0 });
    }
}
