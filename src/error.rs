use std::fmt::{self, Debug, Formatter};

/// Error returned when an operation's contract is not met.
///
/// The queue is left untouched whenever one of these is returned.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueError {
    /// `front` or `dequeue` was called on an empty queue.
    Empty,
    /// An absent value was offered to [`enqueue_some`](crate::ArrayQueue::enqueue_some).
    NullElement,
}

impl Debug for QueueError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "queue is empty"),
            Self::NullElement => write!(f, "cannot enqueue an absent element"),
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "QueueError::Empty"),
            Self::NullElement => write!(f, "QueueError::NullElement"),
        }
    }
}

impl std::error::Error for QueueError {}
