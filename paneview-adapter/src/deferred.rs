use alloc::collections::VecDeque;

/// Per-instance FIFO of mutations deferred to the next paint opportunity.
///
/// Mutations are applied in the order they were scheduled. Nothing is ordered across
/// instances. Dropping the queue (or `cancel_all`) discards everything not yet applied, which
/// is how teardown cancels deferred work.
#[derive(Clone, Debug)]
pub struct MutationQueue<T> {
    queue: VecDeque<T>,
}

impl<T> Default for MutationQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MutationQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, mutation: T) {
        self.queue.push_back(mutation);
    }

    /// Next mutation in scheduling order.
    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.queue.drain(..)
    }

    /// Discards every scheduled mutation. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.queue.len();
        self.queue.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
