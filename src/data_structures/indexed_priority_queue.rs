use crate::common::error::{PathError, Result};

/// A sorted sequence of items keyed by a floating-point cost.
///
/// Unlike [BinaryHeap](std::collections::BinaryHeap), items can be looked up,
/// re-costed, and removed from the middle of the sequence.
///
/// Costs are stored in ascending order. The direction chosen at construction
/// decides which end [pop](IndexedPriorityQueue::pop) takes from:
/// an ascending queue pops its minimum, a descending queue its maximum.
///
/// Insertion is a binary search plus a shift, so `push` and `pop` are
/// O(log n) to locate and O(n) to move.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPriorityQueue<T> {
    ascending: bool,
    items: Vec<T>,
    costs: Vec<f64>,
}

impl<T> IndexedPriorityQueue<T> {
    /// Creates an empty queue.
    pub fn new(ascending: bool) -> Self {
        Self {
            ascending,
            items: Vec::new(),
            costs: Vec::new(),
        }
    }

    /// Creates a queue holding `items`, where `costs[i]` is the cost of `items[i]`.
    ///
    /// The inputs don't need to be sorted; each pair is pushed in turn.
    ///
    /// Returns an error if the two sequences have different lengths.
    ///
    /// # Examples
    /// ```rust
    /// use pathtree::data_structures::IndexedPriorityQueue;
    ///
    /// let mut queue = IndexedPriorityQueue::with_items(true, vec!['a', 'b', 'c'], vec![5.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(queue.pop(), Some(('b', 1.0)));
    ///
    /// assert!(IndexedPriorityQueue::with_items(true, vec!['a'], vec![1.0, 2.0]).is_err());
    /// ```
    pub fn with_items(ascending: bool, items: Vec<T>, costs: Vec<f64>) -> Result<Self> {
        if items.len() != costs.len() {
            return Err(PathError::InvalidArgument(format!(
                "{} items given with {} costs",
                items.len(),
                costs.len()
            )));
        }

        let mut queue = Self::new(ascending);
        for (item, cost) in items.into_iter().zip(costs) {
            queue.push(item, cost);
        }

        Ok(queue)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.costs.clear();
    }

    /// Inserts `item` at the position keeping the costs sorted.
    ///
    /// An item whose cost equals existing costs is placed before all of them.
    pub fn push(&mut self, item: T, cost: f64) {
        let index = self.insertion_index(cost);
        self.items.insert(index, item);
        self.costs.insert(index, cost);
    }

    /// Removes and returns the next item in priority order along with its cost.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        if self.is_empty() {
            return None;
        }

        let index = self.front_index();
        Some((self.items.remove(index), self.costs.remove(index)))
    }

    /// Removes the item at `index` of the underlying ascending sequence.
    pub fn remove_at(&mut self, index: usize) -> Result<(T, f64)> {
        if index >= self.items.len() {
            return Err(PathError::InvalidArgument(format!(
                "index {} out of range for queue of length {}",
                index,
                self.items.len()
            )));
        }

        Ok((self.items.remove(index), self.costs.remove(index)))
    }

    /// Iterates over the items and costs in the order they would be popped.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&T, f64)> + '_> {
        let pairs = self.items.iter().zip(self.costs.iter().copied());
        if self.ascending {
            Box::new(pairs)
        } else {
            Box::new(pairs.rev())
        }
    }

    fn front_index(&self) -> usize {
        if self.ascending {
            0
        } else {
            self.items.len() - 1
        }
    }

    /// Finds the smallest index whose cost is not less than `cost`.
    fn insertion_index(&self, cost: f64) -> usize {
        let (Some(first), Some(last)) = (self.costs.first(), self.costs.last()) else {
            return 0;
        };

        if cost <= *first {
            0
        } else if cost > *last {
            self.costs.len()
        } else {
            // Everything before the split is strictly cheaper, so ties land
            // in front of the existing equal-cost group.
            self.costs.partition_point(|existing| *existing < cost)
        }
    }
}

impl<T: PartialEq> IndexedPriorityQueue<T> {
    /// Position of the first occurrence of `item` in the underlying ascending sequence.
    pub fn index_of(&self, item: &T) -> Result<usize> {
        self.items
            .iter()
            .position(|existing| existing == item)
            .ok_or(PathError::ItemNotFound)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Removes the first occurrence of `item`, returning it with its cost.
    pub fn remove(&mut self, item: &T) -> Result<(T, f64)> {
        let index = self.index_of(item)?;
        self.remove_at(index)
    }

    /// The cost of the first occurrence of `item`.
    pub fn cost_of(&self, item: &T) -> Result<f64> {
        let index = self.index_of(item)?;
        Ok(self.costs[index])
    }

    /// Moves the first occurrence of `item` to the position for `new_cost`.
    pub fn update_cost(&mut self, item: &T, new_cost: f64) -> Result<()> {
        let (existing, _) = self.remove(item)?;
        self.push(existing, new_cost);
        Ok(())
    }
}
