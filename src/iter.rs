use std::{iter::FusedIterator, slice};

use crate::ArrayQueue;

macro_rules! iter {
    ($name:ident($slice_iter:ident, {$( $mut_:tt )?}, $as_ref:ident)) => {
        /// FIFO iterator over the items of an [`ArrayQueue`].
        ///
        /// The live range is walked as two slices: `[begin, cap)` first, then the part that
        /// wrapped around to `[0, end)`.
        pub struct $name<'q, A> {
            front: slice::$slice_iter<'q, Option<A>>,
            back: slice::$slice_iter<'q, Option<A>>,
        }

        impl<'q, A> $name<'q, A> {
            pub(crate) fn new(front: &'q $($mut_)? [Option<A>], back: &'q $($mut_)? [Option<A>]) -> Self {
                Self {
                    front: front.into_iter(),
                    back: back.into_iter(),
                }
            }
        }

        impl<'q, A> Iterator for $name<'q, A> {
            type Item = &'q $($mut_)? A;

            fn next(&mut self) -> Option<Self::Item> {
                let slot = match self.front.next() {
                    Some(slot) => slot,
                    None => self.back.next()?,
                };
                debug_assert!(slot.is_some(), "live slot is empty");
                slot.$as_ref()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                let len = self.front.len() + self.back.len();
                (len, Some(len))
            }

            fn count(self) -> usize {
                self.len()
            }

            fn nth(&mut self, n: usize) -> Option<Self::Item> {
                let front_len = self.front.len();
                if n < front_len {
                    self.front.nth(n)?.$as_ref()
                } else {
                    // drain the front so that `next` moves on to the back slice
                    self.front.nth(front_len);
                    self.back.nth(n - front_len)?.$as_ref()
                }
            }
        }

        impl<A> DoubleEndedIterator for $name<'_, A> {
            fn next_back(&mut self) -> Option<Self::Item> {
                let slot = match self.back.next_back() {
                    Some(slot) => slot,
                    None => self.front.next_back()?,
                };
                debug_assert!(slot.is_some(), "live slot is empty");
                slot.$as_ref()
            }
        }

        impl<A> FusedIterator for $name<'_, A> {}

        impl<A> ExactSizeIterator for $name<'_, A> {
            fn len(&self) -> usize {
                self.front.len() + self.back.len()
            }
        }
    };
}

iter!(Iter(Iter, {/* no mut */}, as_ref));
iter!(IterMut(IterMut, {mut}, as_mut));

impl<A> Clone for Iter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

/// Owning FIFO iterator, dequeuing one item per step.
pub struct IntoIter<A> {
    queue: ArrayQueue<A>,
}

impl<A> IntoIter<A> {
    pub(crate) fn new(queue: ArrayQueue<A>) -> Self {
        Self { queue }
    }
}

impl<A> Iterator for IntoIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<A> FusedIterator for IntoIter<A> {}

impl<A> ExactSizeIterator for IntoIter<A> {
    fn len(&self) -> usize {
        self.queue.len()
    }
}
