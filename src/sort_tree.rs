use std::cmp::Ordering;

use crate::cancellation::Cancellation;
use crate::error::SortError;
use crate::row::Row;
use crate::sort_engine::{validate_field, SortKey, SortStrategy};

struct Node {
    row: Row,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(row: Row) -> Box<Node> {
        Box::new(
            Node {
                row,
                left: None,
                right: None,
            }
        )
    }
}

/// Unbalanced binary search tree keyed on one field of a row.
///
/// Rows comparing less than or equal to a node go to its left subtree, greater rows go right.
/// There is no rebalancing, so already sorted input degenerates into a list. Insertion and
/// traversal are iterative for that reason.
pub(crate) struct SortTree {
    root: Option<Box<Node>>,
    key: SortKey,
    len: usize,
}

impl SortTree {
    pub(crate) fn new(key: SortKey) -> SortTree {
        SortTree {
            root: None,
            key,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, row: Row) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match self.key.compare(&row, &node.row) {
                Ordering::Less | Ordering::Equal => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Node::new(row));
        self.len += 1;
    }

    /// Consume the tree in order: left subtree, node, right subtree
    pub(crate) fn into_sorted(mut self) -> Vec<Row> {
        let mut sorted = Vec::with_capacity(self.len);
        let mut pending: Vec<Box<Node>> = Vec::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            match pending.pop() {
                Some(mut node) => {
                    current = node.right.take();
                    sorted.push(node.row);
                }
                None => break,
            }
        }
        sorted
    }
}

impl Drop for SortTree {
    fn drop(&mut self) {
        // unlink nodes one by one, a degenerate tree would overflow the stack on recursive drop
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Sorts by inserting every row after the header offset into a [SortTree] in buffer order and
/// traversing it in order.
///
/// The header row, when excluded, is dropped from the output, and the result is always
/// ascending: [SortKey::order] is not consulted.
///
/// Each insertion walks the tree, so cancellation is checked before every insert.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeSort;

impl SortStrategy for TreeSort {
    fn sort(&self, rows: Vec<Row>, key: &SortKey, cancellation: &Cancellation) -> Result<Vec<Row>, SortError> {
        validate_field(&rows, key)?;
        let mut tree = SortTree::new(key.clone());
        for row in rows.into_iter().skip(key.header_offset()) {
            if cancellation.is_cancelled() {
                log::debug!("Sort tree abandoned after {} rows", tree.len());
                return Err(SortError::Cancelled);
            }
            tree.insert(row);
        }
        log::debug!("Sort tree built with {} rows", tree.len());
        Ok(tree.into_sorted())
    }
}
