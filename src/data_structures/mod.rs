/// Sorted, cost-keyed sequence used as the search frontier.
pub mod indexed_priority_queue;

#[cfg(test)]
mod indexed_priority_queue_tests;

pub use indexed_priority_queue::IndexedPriorityQueue;
