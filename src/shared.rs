use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ArrayQueue, QueueError};

/// Cloneable handle to an [`ArrayQueue`] guarded by a single mutex.
///
/// Every method takes the lock once, so an enqueue that grows the storage is atomic with
/// respect to every other operation. Clones share the same queue.
pub struct SharedQueue<A> {
    inner: Arc<Mutex<ArrayQueue<A>>>,
}

impl<A> Clone for SharedQueue<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> Default for SharedQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> From<ArrayQueue<A>> for SharedQueue<A> {
    fn from(queue: ArrayQueue<A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }
}

impl<A> SharedQueue<A> {
    pub fn new() -> Self {
        ArrayQueue::new().into()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArrayQueue::with_capacity(capacity).into()
    }

    // Queue operations update their state before dropping any item, so a panicking `Drop`
    // leaves a poisoned queue consistent.
    fn lock(&self) -> MutexGuard<'_, ArrayQueue<A>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `f` with exclusive access to the queue.
    ///
    /// # Examples
    /// ```
    /// # use array_queue::SharedQueue;
    /// let queue = SharedQueue::new();
    /// queue.enqueue(1);
    /// let doubled = queue.with(|queue| {
    ///     let item = queue.dequeue()?;
    ///     queue.enqueue(item * 2);
    ///     Ok::<_, array_queue::QueueError>(item)
    /// });
    /// assert_eq!(doubled, Ok(1));
    /// assert_eq!(queue.dequeue(), Ok(2));
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&mut ArrayQueue<A>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn enqueue(&self, item: A) {
        self.lock().enqueue(item)
    }

    pub fn enqueue_some(&self, item: Option<A>) -> Result<(), QueueError> {
        self.lock().enqueue_some(item)
    }

    pub fn dequeue(&self) -> Result<A, QueueError> {
        self.lock().dequeue()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear()
    }
}

impl<A: Clone> SharedQueue<A> {
    /// Returns a copy of the oldest item.
    pub fn front(&self) -> Result<A, QueueError> {
        self.lock().front().cloned()
    }

    pub fn to_vec(&self) -> Vec<A> {
        self.lock().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        panic::{self, AssertUnwindSafe},
        thread,
    };

    use super::*;
    use crate::tests::{queue_with_failing_item, FailingDrop};

    #[test]
    fn test_clones_share_queue() {
        let queue = SharedQueue::new();
        let other = queue.clone();

        queue.enqueue("a");
        other.enqueue("b");
        assert_eq!(queue.len(), 2);
        assert_eq!(other.front(), Ok("a"));
        assert_eq!(queue.dequeue(), Ok("a"));
        assert_eq!(other.to_vec(), ["b"]);

        other.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));
        assert_eq!(queue.enqueue_some(None), Err(QueueError::NullElement));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_concurrent_producers_keep_per_thread_order() {
        const PRODUCERS: usize = 4;
        const ITEMS: usize = 1000;

        let queue = SharedQueue::with_capacity(1);
        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for item in 0..ITEMS {
                        queue.enqueue((producer, item));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), PRODUCERS * ITEMS);

        let mut next = [0; PRODUCERS];
        while let Ok((producer, item)) = queue.dequeue() {
            assert_eq!(item, next[producer]);
            next[producer] += 1;
        }
        assert_eq!(next, [ITEMS; PRODUCERS]);
    }

    #[test]
    fn test_concurrent_consumers_see_every_item_once() {
        let queue = SharedQueue::from((0..10_000).collect::<ArrayQueue<u32>>());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Ok(item) = queue.dequeue() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        let mut seen: Vec<u32> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        seen.sort_unstable();
        assert!(seen.into_iter().eq(0..10_000));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_poisoned_clear_leaves_queue_usable() {
        let queue = SharedQueue::from(queue_with_failing_item());
        assert_eq!(queue.len(), 7);

        let result = panic::catch_unwind(AssertUnwindSafe(|| queue.clear()));
        assert!(result.is_err());
        assert!(queue.inner.is_poisoned());

        assert_eq!(queue.len(), 0);
        assert!(queue.dequeue().is_err());
        queue.enqueue(FailingDrop { id: 9, fail: false });
        assert_eq!(queue.dequeue().map(|item| item.id), Ok(9));
        assert!(queue.is_empty());
    }
}
