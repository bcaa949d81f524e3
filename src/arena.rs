//! Bump arenas for trace points and error-bar segments.
//!
//! Items are never freed one by one. A rebuild calls [`Arena::reset`], which
//! drops everything at once and invalidates every outstanding reference.
//! References carry the generation they were allocated in, so a stale
//! reference is rejected by [`Arena::get`] even after its slot is reused.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::error::{Result, TraceError};
use crate::trace::{PointFlags, SegmentFlags, TracePoint, TraceSegment};

/// Largest number of items an arena can address.
pub const MAX_ARENA_ITEMS: usize = u32::MAX as usize;

/// Typed index into an [`Arena`].
pub struct ArenaRef<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaRef<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Position of the item in allocation order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for ArenaRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaRef<T> {}

impl<T> PartialEq for ArenaRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for ArenaRef<T> {}

impl<T> fmt::Debug for ArenaRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArenaRef({}@{})", self.index, self.generation)
    }
}

/// Reference to a [`TracePoint`] in a [`PointArena`].
pub type PointRef = ArenaRef<TracePoint>;
/// Reference to a [`TraceSegment`] in a [`SegmentArena`].
pub type SegmentRef = ArenaRef<TraceSegment>;

/// Append-only storage reset wholesale between rebuilds.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    name: &'static str,
    items: Vec<T>,
    capacity: usize,
    generation: u32,
}

/// Arena holding trace points.
pub type PointArena = Arena<TracePoint>;
/// Arena holding error-bar segments.
pub type SegmentArena = Arena<TraceSegment>;

impl<T> Arena<T> {
    /// Create an empty arena with the given item capacity.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            items: Vec::new(),
            capacity: capacity.min(MAX_ARENA_ITEMS),
            generation: 0,
        }
    }

    /// Allocate an item.
    ///
    /// Fails once the arena reaches its capacity.
    pub fn alloc(&mut self, item: T) -> Result<ArenaRef<T>> {
        if self.items.len() >= self.capacity {
            return Err(TraceError::ArenaExhausted {
                arena: self.name,
                capacity: self.capacity,
            });
        }
        let index = self.items.len() as u32;
        self.items.push(item);
        Ok(ArenaRef::new(index, self.generation))
    }

    /// Drop every item, invalidating all references.
    pub fn reset(&mut self) {
        self.items.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Change the item capacity for future allocations.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.min(MAX_ARENA_ITEMS);
    }

    /// Item capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the arena holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Access an item, or `None` for a reference from an earlier generation.
    pub fn get(&self, r: ArenaRef<T>) -> Option<&T> {
        if r.generation != self.generation {
            return None;
        }
        self.items.get(r.index())
    }
}

impl<T> Index<ArenaRef<T>> for Arena<T> {
    type Output = T;

    fn index(&self, r: ArenaRef<T>) -> &T {
        debug_assert_eq!(r.generation, self.generation, "stale arena reference");
        &self.items[r.index()]
    }
}

impl<T> IndexMut<ArenaRef<T>> for Arena<T> {
    fn index_mut(&mut self, r: ArenaRef<T>) -> &mut T {
        debug_assert_eq!(r.generation, self.generation, "stale arena reference");
        &mut self.items[r.index()]
    }
}

impl PointArena {
    /// Create an empty point arena.
    pub fn points(capacity: usize) -> Self {
        Self::new("point", capacity)
    }

    /// Allocate an unlinked point.
    pub fn alloc_point(
        &mut self,
        x: f32,
        y: f32,
        index: usize,
        flags: PointFlags,
    ) -> Result<PointRef> {
        self.alloc(TracePoint {
            x,
            y,
            index,
            flags,
            next: None,
        })
    }

    /// Allocate an unlinked copy of an existing point with new flags.
    pub fn alloc_copy(&mut self, source: PointRef, flags: PointFlags) -> Result<PointRef> {
        let point = &self[source];
        let (x, y, index) = (point.x, point.y, point.index);
        self.alloc_point(x, y, index, flags)
    }
}

impl SegmentArena {
    /// Create an empty segment arena.
    pub fn segments(capacity: usize) -> Self {
        Self::new("segment", capacity)
    }

    /// Allocate an unlinked segment.
    pub fn alloc_segment(
        &mut self,
        start: (f32, f32),
        end: (f32, f32),
        index: usize,
        flags: SegmentFlags,
    ) -> Result<SegmentRef> {
        self.alloc(TraceSegment {
            x1: start.0,
            y1: start.1,
            x2: end.0,
            y2: end.1,
            index,
            flags,
            next: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_reset() {
        let mut arena = PointArena::points(16);
        let a = arena
            .alloc_point(1.0, 2.0, 7, PointFlags::KNOT)
            .expect("capacity available");
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[a].index, 7);
        assert!(arena[a].flags.contains(PointFlags::KNOT));
        arena.reset();
        assert!(arena.is_empty());
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut arena = SegmentArena::segments(1);
        arena
            .alloc_segment((0.0, 0.0), (1.0, 1.0), 0, SegmentFlags::empty())
            .expect("first fits");
        let err = arena
            .alloc_segment((0.0, 0.0), (1.0, 1.0), 1, SegmentFlags::empty())
            .unwrap_err();
        assert_eq!(
            err,
            TraceError::ArenaExhausted {
                arena: "segment",
                capacity: 1
            }
        );
    }

    #[test]
    fn copy_keeps_position_and_index() {
        let mut arena = PointArena::points(8);
        let a = arena
            .alloc_point(3.0, 4.0, 2, PointFlags::KNOT | PointFlags::VISIBLE)
            .expect("capacity available");
        let b = arena
            .alloc_copy(a, PointFlags::VISIBLE)
            .expect("capacity available");
        assert_ne!(a, b);
        assert_eq!((arena[b].x, arena[b].y, arena[b].index), (3.0, 4.0, 2));
        assert!(!arena[b].flags.contains(PointFlags::KNOT));
    }

    #[test]
    fn stale_reference_is_rejected_after_reuse() {
        let mut arena = PointArena::points(8);
        let stale = arena
            .alloc_point(1.0, 1.0, 0, PointFlags::KNOT)
            .expect("capacity available");
        arena.reset();
        let fresh = arena
            .alloc_point(9.0, 9.0, 5, PointFlags::KNOT)
            .expect("capacity available");
        assert_eq!(stale.index(), fresh.index());
        assert_ne!(stale, fresh);
        assert!(arena.get(stale).is_none());
        assert_eq!(arena.get(fresh).map(|p| p.index), Some(5));
    }
}
