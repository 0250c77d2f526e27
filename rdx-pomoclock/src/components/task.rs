//! The FIFO of tasks that travels with a session.

use crate::common::TaskId;
use crate::error::{Result, SchedulerError};
use std::collections::VecDeque;

/// An unbounded first-in, first-out queue of task identifiers.
///
/// The queue is independent of the timer lifecycle: it survives
/// start, stop and reset, and is only emptied by finishing tasks.
#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
    tasks: VecDeque<TaskId>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the tail.
    pub fn enqueue(&mut self, id: TaskId) {
        self.tasks.push_back(id);
    }

    /// Removes and returns the oldest task.
    pub fn dequeue(&mut self) -> Result<TaskId> {
        self.tasks.pop_front().ok_or(SchedulerError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_insertion_order_with_duplicates() {
        let mut queue = TaskQueue::new();
        for id in [3, 1, 3] {
            queue.enqueue(TaskId(id));
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().unwrap(), TaskId(3));
        assert_eq!(queue.dequeue().unwrap(), TaskId(1));
        assert_eq!(queue.dequeue().unwrap(), TaskId(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_queue_fails_without_changing_state() {
        let mut queue = TaskQueue::new();
        assert!(matches!(queue.dequeue(), Err(SchedulerError::EmptyQueue)));
        queue.enqueue(TaskId(9));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![TaskId(9)]);
    }
}
