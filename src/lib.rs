pub mod error;
pub mod iter;
mod pos;
pub mod shared;

use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    mem,
};

pub use self::{
    error::QueueError,
    iter::{IntoIter, Iter, IterMut},
    shared::SharedQueue,
};

use self::pos::Pos;

/// Capacity of a queue created with [`ArrayQueue::new`].
pub const DEFAULT_CAPACITY: usize = 5;

/// FIFO queue backed by a growable ring buffer.
///
/// Items live in the wrapped range `[begin, end)` of the storage. When an enqueue would
/// overflow the storage, it is reallocated at twice the required size and the items are
/// moved to the start of the new storage.
pub struct ArrayQueue<A> {
    // Invariant: `len` slots starting from `begin` (circling back to 0 when overflowing
    // `storage.len()`) are `Some`, every other slot is `None`
    storage: Vec<Option<A>>,
    pos: Pos,
    initial_capacity: usize,
}

impl<A> Default for ArrayQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ArrayQueue<A> {
    /// Creates a new empty queue with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new empty queue that can hold `capacity` items before growing.
    ///
    /// `capacity` is also what [`clear`](Self::clear) resets to. A capacity of `0` is raised to `1`.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::with_capacity(2);
    /// queue.extend([0, 1]);
    /// assert_eq!(queue.capacity(), 2);
    /// queue.enqueue(2);
    /// assert_eq!(queue.capacity(), 6);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self::with_reserved(capacity, capacity)
    }

    /// Creates a new empty queue with room for `reserved` items that still
    /// [clears](Self::clear) back to `initial_capacity`.
    fn with_reserved(initial_capacity: usize, reserved: usize) -> Self {
        debug_assert!(initial_capacity > 0);
        Self {
            storage: empty_slots(reserved.max(initial_capacity)),
            pos: Pos::zero(),
            initial_capacity,
        }
    }

    /// Returns the number of items in the queue.
    pub const fn len(&self) -> usize {
        self.pos.len()
    }

    /// Alias of [`len`](Self::len).
    pub const fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the queue holds no items.
    pub const fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Returns the number of items the queue can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the capacity [`clear`](Self::clear) resets to.
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Index of the oldest item in the underlying storage.
    pub const fn begin(&self) -> usize {
        self.pos.begin()
    }

    /// Index in the underlying storage where the next item will be written.
    pub fn end(&self) -> usize {
        self.pos.end(self.capacity())
    }

    /// Returns `true` if the items do not wrap around the end of the underlying storage.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::from([0, 1, 2, 3, 4]);
    /// assert!(queue.is_contiguous());
    /// queue.dequeue().unwrap();
    /// queue.enqueue(5);
    /// assert!(!queue.is_contiguous());
    /// ```
    pub fn is_contiguous(&self) -> bool {
        self.pos.is_contiguous(self.capacity())
    }

    /// Adds an item to the end of the queue, growing the storage if it is full.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::new();
    /// queue.enqueue('a');
    /// queue.enqueue('b');
    /// assert_eq!(queue, ['a', 'b']);
    /// ```
    pub fn enqueue(&mut self, item: A) {
        self.ensure_capacity(self.len() + 1);
        let end = self.end();
        debug_assert!(self.storage[end].is_none());
        self.storage[end] = Some(item);
        self.pos.extend(self.capacity());
    }

    /// Adds a present item to the end of the queue.
    ///
    /// Returns [`QueueError::NullElement`] without touching the queue if `item` is `None`.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::{ArrayQueue, QueueError};
    /// let mut queue = ArrayQueue::new();
    /// assert_eq!(queue.enqueue_some(Some(1)), Ok(()));
    /// assert_eq!(queue.enqueue_some(None), Err(QueueError::NullElement));
    /// assert_eq!(queue, [1]);
    /// ```
    pub fn enqueue_some(&mut self, item: Option<A>) -> Result<(), QueueError> {
        let item = item.ok_or(QueueError::NullElement)?;
        self.enqueue(item);
        Ok(())
    }

    /// Returns a reference to the oldest item, or [`QueueError::Empty`] if the queue [is empty](Self::is_empty).
    ///
    /// # Examples
    /// ```
    /// # use array_queue::{ArrayQueue, QueueError};
    /// let mut queue = ArrayQueue::new();
    /// assert_eq!(queue.front(), Err(QueueError::Empty));
    /// queue.extend([0, 1]);
    /// assert_eq!(queue.front(), Ok(&0));
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn front(&self) -> Result<&A, QueueError> {
        self.get(0).ok_or(QueueError::Empty)
    }

    /// Returns a mutable reference to the oldest item, or [`QueueError::Empty`] if the queue [is empty](Self::is_empty).
    pub fn front_mut(&mut self) -> Result<&mut A, QueueError> {
        self.get_mut(0).ok_or(QueueError::Empty)
    }

    /// Removes the oldest item from the queue and returns it, or [`QueueError::Empty`] if the queue [is empty](Self::is_empty).
    ///
    /// # Examples
    /// ```
    /// # use array_queue::{ArrayQueue, QueueError};
    /// let mut queue = ArrayQueue::new();
    /// queue.extend([0, 1]);
    /// assert_eq!(queue.dequeue(), Ok(0));
    /// assert_eq!(queue.dequeue(), Ok(1));
    /// assert_eq!(queue.dequeue(), Err(QueueError::Empty));
    /// ```
    pub fn dequeue(&mut self) -> Result<A, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let slot = &mut self.storage[self.pos.begin()];
        debug_assert!(slot.is_some(), "live slot is empty");
        // `None` here means a broken invariant; nothing is removed in that case
        let item = slot.take().ok_or(QueueError::Empty)?;
        self.pos.advance(self.capacity());
        Ok(item)
    }

    /// Returns a reference to the item at the given FIFO position, or `None` if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let queue = ArrayQueue::from([0, 1]);
    /// assert_eq!(queue.get(0), Some(&0));
    /// assert_eq!(queue.get(1), Some(&1));
    /// assert_eq!(queue.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&A> {
        if index >= self.len() {
            return None;
        }
        let index = self.pos.logical_index(index, self.capacity());
        self.storage[index].as_ref()
    }

    /// Returns a mutable reference to the item at the given FIFO position, or `None` if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::from([1, 2]);
    /// *queue.get_mut(0).unwrap() *= 2;
    /// *queue.get_mut(1).unwrap() *= 3;
    /// assert_eq!(queue.get_mut(2), None);
    /// assert_eq!(queue, [2, 6]);
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut A> {
        if index >= self.len() {
            return None;
        }
        let index = self.pos.logical_index(index, self.capacity());
        self.storage[index].as_mut()
    }

    /// Returns an iterator over the items in FIFO order.
    pub fn iter(&self) -> Iter<'_, A> {
        let (front, back) = self.split_slots();
        Iter::new(front, back)
    }

    /// Returns an iterator over mutable references to the items in FIFO order.
    pub fn iter_mut(&mut self) -> IterMut<'_, A> {
        let (front, back) = self.split_slots_mut();
        IterMut::new(front, back)
    }

    /// Removes all items and resets the storage to the [initial capacity](Self::initial_capacity).
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::new();
    /// queue.extend(0..20);
    /// queue.clear();
    /// assert!(queue.is_empty());
    /// assert_eq!(queue.capacity(), 5);
    /// ```
    pub fn clear(&mut self) {
        tracing::trace!(
            "cleared array queue, len={}, capacity={}",
            self.len(),
            self.initial_capacity
        );
        let old = mem::replace(&mut self.storage, empty_slots(self.initial_capacity));
        self.pos = Pos::zero();
        // the queue is already consistent if an item panics while being dropped
        drop(old);
    }

    /// Consumes the queue, returning its items in FIFO order.
    pub fn into_vec(mut self) -> Vec<A> {
        let cap = self.capacity();
        self.take_slots(cap).into_iter().flatten().collect()
    }

    /// Makes sure at least `capacity` items fit, growing the storage to `2 * capacity` otherwise.
    fn ensure_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }
        let new_capacity = 2 * capacity;
        tracing::trace!(
            "growing array queue, from={}, to={new_capacity}, len={}",
            self.capacity(),
            self.len()
        );

        let len = self.len();
        self.storage = self.take_slots(new_capacity);
        self.pos = Pos::new(0, len, new_capacity);
    }

    /// Moves the items out of the storage into a new, linearized storage of `capacity` slots.
    ///
    /// Leaves every slot of the old storage empty; the caller must reset `self.pos`.
    fn take_slots(&mut self, capacity: usize) -> Vec<Option<A>> {
        debug_assert!(capacity >= self.len());
        let (front, back) = self.split_slots_mut();

        let mut slots = Vec::with_capacity(capacity);
        slots.extend(front.iter_mut().map(Option::take));
        slots.extend(back.iter_mut().map(Option::take));
        slots.resize_with(capacity, || None);
        slots
    }

    /// Returns the live slots as `[begin, cap)` and the wrapped `[0, end)` part.
    fn split_slots(&self) -> (&[Option<A>], &[Option<A>]) {
        let cap = self.capacity();
        let (back, front) = self.storage.split_at(self.pos.begin());
        (
            &front[..self.pos.front_len(cap)],
            &back[..self.pos.back_len(cap)],
        )
    }

    fn split_slots_mut(&mut self) -> (&mut [Option<A>], &mut [Option<A>]) {
        let cap = self.capacity();
        let front_len = self.pos.front_len(cap);
        let back_len = self.pos.back_len(cap);
        let (back, front) = self.storage.split_at_mut(self.pos.begin());
        (&mut front[..front_len], &mut back[..back_len])
    }
}

impl<A: Clone> ArrayQueue<A> {
    /// Copies the items into a `Vec` in FIFO order, leaving the queue untouched.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::ArrayQueue;
    /// let mut queue = ArrayQueue::from([0, 1, 2, 3, 4]);
    /// queue.dequeue().unwrap();
    /// queue.enqueue(5);
    /// assert_eq!(queue.to_vec(), [1, 2, 3, 4, 5]);
    /// assert_eq!(queue.len(), 5);
    /// ```
    pub fn to_vec(&self) -> Vec<A> {
        self.iter().cloned().collect()
    }
}

fn empty_slots<A>(capacity: usize) -> Vec<Option<A>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

impl<A: Clone> Clone for ArrayQueue<A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            pos: self.pos,
            initial_capacity: self.initial_capacity,
        }
    }
}

/// # Examples
///
/// ```rust
/// # use array_queue::ArrayQueue;
/// assert!(ArrayQueue::from([0, 1, 2]).iter().eq(&[0, 1, 2]));
/// let mut queue = ArrayQueue::from([0; 8]);
/// assert_eq!(queue.capacity(), 8);
/// queue.clear();
/// assert_eq!(queue.capacity(), 5);
/// ```
impl<A, const N: usize> From<[A; N]> for ArrayQueue<A> {
    fn from(arr: [A; N]) -> Self {
        let mut queue = Self::with_reserved(DEFAULT_CAPACITY, N);
        queue.extend(arr);
        queue
    }
}

impl<A> From<Vec<A>> for ArrayQueue<A> {
    fn from(vec: Vec<A>) -> Self {
        let mut queue = Self::with_reserved(DEFAULT_CAPACITY, vec.len());
        queue.extend(vec);
        queue
    }
}

/// Enqueues every item of the iterator, growing the queue as needed.
///
/// # Examples
/// ```
/// # use array_queue::ArrayQueue;
/// let mut queue = ArrayQueue::new();
/// queue.extend([0, 1]);
/// assert_eq!(queue, [0, 1]);
/// queue.extend(2..8);
/// assert_eq!(queue, [0, 1, 2, 3, 4, 5, 6, 7]);
/// ```
impl<A> Extend<A> for ArrayQueue<A> {
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

/// Creates a new queue holding the items of the iterator in order.
///
/// # Examples
/// ```
/// # use array_queue::ArrayQueue;
/// assert_eq!(ArrayQueue::from_iter([0, 1]), &[0, 1]);
/// assert_eq!((0..3).collect::<ArrayQueue<_>>(), &[0, 1, 2]);
/// ```
impl<A> FromIterator<A> for ArrayQueue<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::with_reserved(DEFAULT_CAPACITY, iter.size_hint().0);
        queue.extend(iter);
        queue
    }
}

impl<A: PartialEq> PartialEq for ArrayQueue<A> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<A: Eq> Eq for ArrayQueue<A> {}

impl<A: Hash> Hash for ArrayQueue<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|item| item.hash(state))
    }
}

impl<A: PartialEq, B: AsRef<[A]> + ?Sized> PartialEq<B> for ArrayQueue<A> {
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<A: Debug> Debug for ArrayQueue<A> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<A> IntoIterator for ArrayQueue<A> {
    type Item = A;
    type IntoIter = IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'q, A> IntoIterator for &'q ArrayQueue<A> {
    type Item = &'q A;
    type IntoIter = Iter<'q, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'q, A> IntoIterator for &'q mut ArrayQueue<A> {
    type Item = &'q mut A;
    type IntoIter = IterMut<'q, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
