/// Fixed-capacity, append-only buffer.
///
/// Storage is reserved once at construction and never grows. Appends past
/// capacity are dropped and counted.
///
/// `clear()` keeps the allocation; the next frame overwrites it in place.
#[derive(Debug)]
pub struct FixedBuffer<T> {
    items: Vec<T>,
    capacity: usize,
    dropped: usize,
}

impl<T> FixedBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends `item` if there is room. Returns `false` when it was dropped.
    #[inline]
    pub fn push(&mut self, item: T) -> bool {
        if self.items.len() < self.capacity {
            self.items.push(item);
            true
        } else {
            self.dropped = self.dropped.saturating_add(1);
            false
        }
    }

    /// Resets the live count and drop counter. Keeps allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.dropped = 0;
    }

    /// Live prefix in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Appends rejected since the last `clear()`.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Counts `n` appends that were skipped without being attempted.
    #[inline]
    pub(crate) fn add_dropped(&mut self, n: usize) {
        self.dropped = self.dropped.saturating_add(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── push ──────────────────────────────────────────────────────────────

    #[test]
    fn push_within_capacity_keeps_order() {
        let mut b = FixedBuffer::with_capacity(4);
        for i in 0..3 {
            assert!(b.push(i));
        }
        assert_eq!(b.as_slice(), &[0, 1, 2]);
        assert_eq!(b.dropped(), 0);
        assert!(!b.is_full());
    }

    #[test]
    fn push_past_capacity_keeps_first_items() {
        let mut b = FixedBuffer::with_capacity(2);
        assert!(b.push('a'));
        assert!(b.push('b'));
        assert!(!b.push('c'));
        assert!(!b.push('d'));
        assert_eq!(b.as_slice(), &['a', 'b']);
        assert_eq!(b.dropped(), 2);
        assert!(b.is_full());
    }

    #[test]
    fn push_never_reallocates() {
        let mut b = FixedBuffer::with_capacity(8);
        let ptr = b.as_slice().as_ptr();
        for i in 0..100 {
            b.push(i);
        }
        assert_eq!(b.as_slice().as_ptr(), ptr);
        assert_eq!(b.len(), 8);
    }

    #[test]
    fn bulk_drops_accumulate_and_clear() {
        let mut b = FixedBuffer::<u8>::with_capacity(1);
        b.add_dropped(5);
        b.add_dropped(usize::MAX);
        assert_eq!(b.dropped(), usize::MAX);
        b.clear();
        assert_eq!(b.dropped(), 0);
    }

    #[test]
    fn zero_capacity_drops_everything() {
        let mut b = FixedBuffer::with_capacity(0);
        assert!(!b.push(1u8));
        assert!(b.is_empty());
        assert_eq!(b.dropped(), 1);
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_resets_counts_and_keeps_capacity() {
        let mut b = FixedBuffer::with_capacity(1);
        b.push(1);
        b.push(2);
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.dropped(), 0);
        assert_eq!(b.capacity(), 1);
        assert!(b.push(3));
        assert_eq!(b.as_slice(), &[3]);
    }
}
