use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::error::PathError;
use super::indexed_priority_queue::*;

fn is_sorted_in_pop_order<T>(queue: &IndexedPriorityQueue<T>, ascending: bool) -> bool {
    let costs: Vec<f64> = queue.iter().map(|(_, cost)| cost).collect();
    costs.windows(2).all(|pair| {
        if ascending {
            pair[0] <= pair[1]
        } else {
            pair[0] >= pair[1]
        }
    })
}

// Seeded so every run pushes the same unordered costs
fn scrambled_costs(count: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count).map(|_| rng.random_range(0.0..100.0)).collect()
}

// Costs stay monotonic after every push, in both directions
#[test]
pub fn push_keeps_costs_sorted() {
    for ascending in [true, false] {
        let mut queue = IndexedPriorityQueue::new(ascending);
        for (i, cost) in scrambled_costs(200).into_iter().enumerate() {
            queue.push(i as u32, cost);
            assert!(is_sorted_in_pop_order(&queue, ascending), "ascending: {ascending}, push #{i}");
        }
        assert_eq!(queue.len(), 200);
    }
}

// Pops come out cheapest first from an ascending queue
#[test]
pub fn ascending_pop_returns_minimum() {
    let mut queue = IndexedPriorityQueue::new(true);
    queue.push('A', 5.0);
    queue.push('B', 1.0);
    queue.push('C', 3.0);

    assert_eq!(queue.pop(), Some(('B', 1.0)));
    assert_eq!(queue.pop(), Some(('C', 3.0)));
    assert_eq!(queue.pop(), Some(('A', 5.0)));
    assert_eq!(queue.pop(), None);
    assert!(queue.is_empty());
}

// Pops come out most expensive first from a descending queue
#[test]
pub fn descending_pop_returns_maximum() {
    let mut queue = IndexedPriorityQueue::new(false);
    queue.push('A', 5.0);
    queue.push('B', 1.0);
    queue.push('C', 3.0);

    assert_eq!(queue.pop(), Some(('A', 5.0)));
    assert_eq!(queue.pop(), Some(('C', 3.0)));
    assert_eq!(queue.pop(), Some(('B', 1.0)));
    assert_eq!(queue.pop(), None);
}

// Every pop from a scrambled queue returns the extreme of what remains
#[test]
pub fn pop_order_matches_sorted_costs() {
    let costs = scrambled_costs(100);
    let items: Vec<u32> = (0..100).collect();

    let mut queue = IndexedPriorityQueue::with_items(true, items.clone(), costs.clone()).unwrap();
    let mut expected = costs.clone();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let popped: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|(_, cost)| cost).collect();
    assert_eq!(popped, expected);

    let mut queue = IndexedPriorityQueue::with_items(false, items, costs).unwrap();
    expected.reverse();
    let popped: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|(_, cost)| cost).collect();
    assert_eq!(popped, expected);
}

// An item pushed with a cost already present goes in front of the existing ones
#[test]
pub fn equal_costs_insert_before_existing_group() {
    let mut queue = IndexedPriorityQueue::new(true);
    queue.push("low", 1.0);
    queue.push("first", 2.0);
    queue.push("second", 2.0);
    queue.push("high", 3.0);
    queue.push("third", 2.0);

    let order: Vec<&str> = queue.iter().map(|(item, _)| *item).collect();
    assert_eq!(order, vec!["low", "third", "second", "first", "high"]);
}

// Construction with mismatched lengths is rejected
#[test]
pub fn with_items_rejects_mismatched_lengths() {
    let res = IndexedPriorityQueue::with_items(true, vec![1, 2, 3], vec![1.0, 2.0]);
    assert!(matches!(res, Err(PathError::InvalidArgument(_))));

    let res = IndexedPriorityQueue::<u8>::with_items(true, vec![], vec![]);
    assert!(res.unwrap().is_empty());
}

// update_cost followed by cost_of returns the new cost
#[test]
pub fn update_cost_then_cost_of_returns_new_cost() {
    let mut queue = IndexedPriorityQueue::with_items(true, vec!['a', 'b', 'c'], vec![1.0, 2.0, 3.0]).unwrap();

    queue.update_cost(&'a', 10.0).unwrap();
    assert_eq!(queue.cost_of(&'a'), Ok(10.0));
    assert_eq!(queue.pop(), Some(('b', 2.0)));

    queue.update_cost(&'a', 0.5).unwrap();
    assert_eq!(queue.cost_of(&'a'), Ok(0.5));
    assert_eq!(queue.pop(), Some(('a', 0.5)));
    assert_eq!(queue.len(), 1);
}

// Operating on an item that isn't queued is an error
#[test]
pub fn missing_items_are_reported() {
    let mut queue = IndexedPriorityQueue::with_items(true, vec!['a'], vec![1.0]).unwrap();

    assert_eq!(queue.cost_of(&'z'), Err(PathError::ItemNotFound));
    assert_eq!(queue.update_cost(&'z', 4.0), Err(PathError::ItemNotFound));
    assert_eq!(queue.remove(&'z'), Err(PathError::ItemNotFound));
    assert!(queue.remove_at(1).is_err());
    assert_eq!(queue.len(), 1);
}

// Removing from the middle keeps the remaining order intact
#[test]
pub fn remove_from_middle_keeps_order() {
    let mut queue = IndexedPriorityQueue::with_items(true, vec![1, 2, 3, 4], vec![4.0, 3.0, 2.0, 1.0]).unwrap();

    assert_eq!(queue.remove(&2), Ok((2, 3.0)));
    assert!(!queue.contains(&2));
    assert_eq!(queue.remove_at(0), Ok((4, 1.0)));

    let order: Vec<i32> = queue.iter().map(|(item, _)| *item).collect();
    assert_eq!(order, vec![3, 1]);

    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.pop(), None);
}
