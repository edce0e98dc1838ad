use crate::cell::Position;
use fxhash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An entry of the [Frontier]. Entries are popped by ascending `f_score`, and among equal scores
/// by ascending `sequence`, i.e. first in, first out.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry<K> {
    pub f_score: K,
    pub sequence: u64,
    pub cell: Position,
}

impl<K: PartialEq> Eq for FrontierEntry<K> {}

impl<K: PartialEq> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.eq(&other.f_score) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the smallest score first, and
        // the earliest pushed entry among equal scores
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// The open set of a search: a binary heap ordered by `(f_score, sequence)` paired with the set of
/// cells it holds. A cell is in the heap at most once, and a member keeps the entry it was pushed
/// with until it is popped.
#[derive(Clone, Debug)]
pub struct Frontier<K> {
    heap: BinaryHeap<FrontierEntry<K>>,
    members: FxHashSet<Position>,
    next_sequence: u64,
}

impl<K: Ord + Copy> Default for Frontier<K> {
    fn default() -> Self {
        Frontier::new()
    }
}

impl<K: Ord + Copy> Frontier<K> {
    pub fn new() -> Frontier<K> {
        Frontier {
            heap: BinaryHeap::new(),
            members: FxHashSet::default(),
            next_sequence: 0,
        }
    }

    /// Adds `cell` with priority `f_score` under a fresh sequence number, which is returned. A cell
    /// that is already a member is left untouched and no sequence number is used.
    pub fn push(&mut self, f_score: K, cell: Position) -> Option<u64> {
        if !self.members.insert(cell) {
            return None;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            f_score,
            sequence,
            cell,
        });
        Some(sequence)
    }

    /// Removes and returns the member with the lowest `(f_score, sequence)`.
    pub fn pop_min(&mut self) -> Option<FrontierEntry<K>> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.cell);
        Some(entry)
    }

    pub fn contains(&self, cell: &Position) -> bool {
        self.members.contains(cell)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of sequence numbers handed out so far.
    pub fn pushed(&self) -> u64 {
        self.next_sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn pops_lowest_score_first() {
        let mut frontier = Frontier::new();
        frontier.push(5, p(0, 0));
        frontier.push(2, p(0, 1));
        frontier.push(7, p(0, 2));
        let order = std::iter::from_fn(|| frontier.pop_min())
            .map(|e| e.f_score)
            .collect::<Vec<u32>>();
        assert_eq!(order, vec![2, 5, 7]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut frontier = Frontier::new();
        for col in 0..5 {
            frontier.push(3u32, p(0, col));
        }
        frontier.push(1, p(1, 0));
        let cells = std::iter::from_fn(|| frontier.pop_min())
            .map(|e| e.cell)
            .collect::<Vec<_>>();
        assert_eq!(
            cells,
            vec![p(1, 0), p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4)]
        );
    }

    #[test]
    fn membership_follows_push_and_pop() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert!(frontier.pop_min().is_none());
        frontier.push(1u32, p(2, 2));
        assert!(frontier.contains(&p(2, 2)));
        assert!(!frontier.contains(&p(2, 3)));
        assert_eq!(frontier.len(), 1);
        let entry = frontier.pop_min().unwrap();
        assert_eq!(entry.cell, p(2, 2));
        assert_eq!(entry.sequence, 0);
        assert!(!frontier.contains(&p(2, 2)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn sequence_numbers_are_never_reused() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.push(4u32, p(0, 0)), Some(0));
        frontier.pop_min();
        assert_eq!(frontier.push(4, p(0, 0)), Some(1));
        assert_eq!(frontier.push(4, p(0, 1)), Some(2));
        assert_eq!(frontier.pushed(), 3);
    }

    #[test]
    fn members_keep_their_entry() {
        let mut frontier = Frontier::new();
        frontier.push(9u32, p(0, 0));
        frontier.push(5, p(0, 1));
        assert_eq!(frontier.push(3, p(0, 0)), None);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pushed(), 2);

        let first = frontier.pop_min().unwrap();
        assert_eq!((first.f_score, first.cell), (5, p(0, 1)));
        let second = frontier.pop_min().unwrap();
        assert_eq!((second.f_score, second.cell, second.sequence), (9, p(0, 0), 0));
        assert!(frontier.pop_min().is_none());
        assert!(frontier.is_empty());
    }
}
