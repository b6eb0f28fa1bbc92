//! Index Permutations
//!
//! Orderings of `0..n`, enumerated lazily in lexicographic order.

use std::fmt;

use serde::{Serialize, Serializer};

/// An ordering of `0..n` with no repeats
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Validate that `indices` is an ordering of `0..indices.len()`
    pub fn new(indices: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; indices.len()];
        for &i in &indices {
            if i >= seen.len() || seen[i] {
                return None;
            }
            seen[i] = true;
        }
        Some(Self(indices))
    }

    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &i)| pos == i)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Position `i` of the result takes `items[self[i]]`
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().map(|&i| items[i].clone()).collect()
    }

    /// Every permutation of `0..n`, lexicographically
    pub fn all(n: usize) -> Permutations {
        Permutations {
            next: Some((0..n).collect()),
        }
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        if parts.len() == 1 {
            write!(f, "({},)", parts[0])
        } else {
            write!(f, "({})", parts.join(", "))
        }
    }
}

impl Serialize for Permutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Lazy lexicographic enumeration, one step of next-permutation per item
#[derive(Debug, Clone)]
pub struct Permutations {
    next: Option<Vec<usize>>,
}

impl Iterator for Permutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let current = self.next.take()?;
        self.next = successor(&current);
        Some(Permutation(current))
    }
}

fn successor(current: &[usize]) -> Option<Vec<usize>> {
    let mut next = current.to_vec();
    let pivot = (1..next.len()).rev().find(|&i| next[i - 1] < next[i])? - 1;
    let swap = (pivot + 1..next.len()).rev().find(|&j| next[j] > next[pivot])?;
    next.swap(pivot, swap);
    next[pivot + 1..].reverse();
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order_of_three() {
        let all: Vec<Vec<usize>> = Permutation::all(3).map(|p| p.indices().to_vec()).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_counts() {
        assert_eq!(Permutation::all(0).count(), 1);
        assert_eq!(Permutation::all(1).count(), 1);
        assert_eq!(Permutation::all(4).count(), 24);
        assert_eq!(Permutation::all(5).count(), 120);
    }

    #[test]
    fn test_first_is_identity() {
        let first = Permutation::all(4).next().unwrap();
        assert!(first.is_identity());
        assert_eq!(first, Permutation::identity(4));
    }

    #[test]
    fn test_apply() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        assert_eq!(p.apply(&["a", "b", "c"]), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(Permutation::new(vec![0, 0]).is_none());
        assert!(Permutation::new(vec![0, 2]).is_none());
        assert!(Permutation::new(vec![1, 0]).is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(Permutation::new(vec![1, 0]).unwrap().to_string(), "(1, 0)");
        assert_eq!(Permutation::identity(1).to_string(), "(0,)");
        assert_eq!(Permutation::identity(0).to_string(), "()");
    }
}
