//! Ordered, duplicate-free collection of collected clues.
//!
//! The ledger is a plain binary search tree keyed by byte-wise string order.
//! It is never rebalanced: sorted input degrades it to a list, which is fine
//! for the handful of clues a map carries.

use std::cmp::Ordering;

use tracing::{instrument, trace};

#[derive(Debug)]
struct ClueNode {
    clue: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn leaf(clue: &str) -> Box<Self> {
        Box::new(Self {
            clue: clue.to_string(),
            left: None,
            right: None,
        })
    }
}

#[derive(Debug, Default)]
pub struct ClueLedger {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clue, returning `false` if it was already collected.
    ///
    /// Equality is exact: `"Key"` and `"key"` are distinct clues. Empty clues
    /// are ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, clue: &str) -> bool {
        if clue.is_empty() {
            return false;
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.as_bytes().cmp(node.clue.as_bytes()) {
                Ordering::Equal => {
                    trace!("clue already collected: {}", clue);
                    return false;
                }
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(ClueNode::leaf(clue));
        self.len += 1;
        true
    }

    pub fn contains(&self, clue: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match clue.as_bytes().cmp(node.clue.as_bytes()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clues in ascending order, recomputed by a fresh traversal on each call.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    pub fn enumerate_in_order(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

impl Drop for ClueLedger {
    // Default drop recurses once per level; a degenerate ledger could be deep.
    fn drop(&mut self) {
        let mut stack: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ClueLedger {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order traversal with an explicit stack.
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a ClueNode>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.clue.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_insert_is_idempotent() {
        let mut ledger = ClueLedger::new();
        assert!(ledger.insert("Lost key"));
        assert!(!ledger.insert("Lost key"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.enumerate_in_order(), vec!["Lost key"]);
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let mut ledger = ClueLedger::new();
        ledger.insert("lost key");
        ledger.insert("Lost key");
        assert_eq!(ledger.enumerate_in_order(), vec!["Lost key", "lost key"]);
    }

    #[test]
    fn test_empty_clue_is_ignored() {
        let mut ledger = ClueLedger::new();
        assert!(!ledger.insert(""));
        assert!(ledger.is_empty());
    }

    #[rstest]
    #[case(&["Stained sheet", "Muddy footprints", "Lost key", "Book missing a page"])]
    #[case(&["a", "b", "c", "d", "e"])]
    #[case(&["e", "d", "c", "b", "a", "c", "e"])]
    #[case(&["Zebra", "apple", "Apple", "zebra"])]
    fn test_enumeration_is_sorted_and_unique(#[case] input: &[&str]) {
        let mut ledger = ClueLedger::new();
        for clue in input {
            ledger.insert(clue);
        }
        let mut expected: Vec<&str> = input.to_vec();
        expected.sort();
        expected.dedup();
        assert_eq!(ledger.enumerate_in_order(), expected);
        assert_eq!(ledger.len(), expected.len());
    }

    #[test]
    fn test_contains() {
        let mut ledger = ClueLedger::new();
        ledger.insert("Muddy footprints");
        ledger.insert("Lost drawer");
        assert!(ledger.contains("Lost drawer"));
        assert!(!ledger.contains("lost drawer"));
    }

    #[test]
    fn test_enumeration_is_recomputed() {
        let mut ledger = ClueLedger::new();
        ledger.insert("b");
        let first: Vec<_> = ledger.iter().map(str::to_string).collect();
        ledger.insert("a");
        assert_eq!(first, vec!["b"]);
        assert_eq!(ledger.enumerate_in_order(), vec!["a", "b"]);
    }

    #[test]
    fn test_deep_degenerate_ledger_drops() {
        let mut ledger = ClueLedger::new();
        for i in 0..10_000 {
            ledger.insert(&format!("{:08}", i));
        }
        assert_eq!(ledger.len(), 10_000);
        assert_eq!(ledger.iter().next(), Some("00000000"));
        drop(ledger);
    }
}
