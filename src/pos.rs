/// Location of the live range inside a ring of some capacity.
///
/// The capacity itself is owned by the storage, so every method that needs it
/// takes it as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Pos {
    // Invariant: `begin` < capacity
    begin: usize,
    // Invariant: `len` <= capacity
    len: usize,
}

impl Pos {
    /// Creates a new `Pos` with the given starting index and length.
    pub fn new(begin: usize, len: usize, cap: usize) -> Self {
        debug_assert!(begin < cap);
        debug_assert!(len <= cap);
        Self { begin, len }
    }

    pub const fn zero() -> Self {
        Self { begin: 0, len: 0 }
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// Index one past the newest item, where the next item would be written.
    #[inline(always)]
    pub const fn end(&self, cap: usize) -> usize {
        self.logical_index(self.len, cap)
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_contiguous(&self, cap: usize) -> bool {
        self.begin + self.len <= cap
    }

    /// Number of items in `[begin, cap)`.
    #[inline(always)]
    pub const fn front_len(&self, cap: usize) -> usize {
        if self.is_contiguous(cap) {
            self.len
        } else {
            cap - self.begin
        }
    }

    /// Number of items that wrapped around into `[0, end)`.
    #[inline(always)]
    pub const fn back_len(&self, cap: usize) -> usize {
        self.len - self.front_len(cap)
    }

    /// Returns the index in the underlying storage corresponding to the given logical index.
    /// The returned index is guaranteed to be in bounds (i.e. < `cap`), but the slot is not necessarily live.
    ///
    /// # Panics
    /// Panics if `cap == 0`.
    #[inline(always)]
    #[track_caller]
    pub const fn logical_index(&self, index: usize, cap: usize) -> usize {
        (self.begin + index) % cap
    }

    /// Drops the oldest item from the range.
    pub fn advance(&mut self, cap: usize) {
        debug_assert!(self.len > 0);
        self.begin = self.logical_index(1, cap);
        self.len -= 1;
    }

    /// Extends the range by one item at the end.
    pub fn extend(&mut self, cap: usize) {
        debug_assert!(self.len < cap);
        self.len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_lengths() {
        let pos = Pos::new(3, 4, 5);
        assert!(!pos.is_contiguous(5));
        assert_eq!(pos.front_len(5), 2);
        assert_eq!(pos.back_len(5), 2);
        assert_eq!(pos.end(5), 2);
        assert_eq!(pos.logical_index(2, 5), 0);
    }

    #[test]
    fn test_full_ring_end_meets_begin() {
        let pos = Pos::new(2, 5, 5);
        assert_eq!(pos.end(5), 2);
        assert_eq!(pos.front_len(5), 3);
        assert_eq!(pos.back_len(5), 2);
    }

    #[test]
    fn test_advance_wraps() {
        let mut pos = Pos::new(4, 2, 5);
        pos.advance(5);
        assert_eq!(pos.begin(), 0);
        assert_eq!(pos.len(), 1);
        assert!(pos.is_contiguous(5));
    }
}
