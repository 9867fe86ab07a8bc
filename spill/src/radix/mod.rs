//! Compressed prefix tree (radix tree) keyed by text.
//!
//! Edges are labelled with non-empty strings and no two edges leaving the same node share a
//! first character, so lookups never backtrack.
use std::fmt::{Debug, Formatter};

struct Edge<V> {
    label: String,
    node: Node<V>,
}

struct Node<V> {
    value: Option<V>,
    edges: Vec<Edge<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            value: None,
            edges: Vec::new(),
        }
    }
}

/// Length in bytes of the longest common prefix of `a` and `b`, respecting `char` boundaries.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}

impl<V> Node<V> {
    fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = self;
        let mut rest = key;

        while !rest.is_empty() {
            let matched = node
                .edges
                .iter()
                .enumerate()
                .map(|(idx, edge)| (idx, common_prefix_len(&edge.label, rest)))
                .find(|&(_, len)| len > 0);

            let Some((edge_idx, len)) = matched else {
                node.edges.push(Edge {
                    label: rest.to_string(),
                    node: Node {
                        value: Some(value),
                        edges: Vec::new(),
                    },
                });
                return None;
            };

            let edge = &mut node.edges[edge_idx];
            if len < edge.label.len() {
                // Split the edge, the common prefix becomes an intermediate node.
                let suffix = edge.label.split_off(len);
                let child = std::mem::take(&mut edge.node);
                edge.node.edges.push(Edge {
                    label: suffix,
                    node: child,
                });
            }
            rest = &rest[len..];
            node = &mut edge.node;
        }

        node.value.replace(value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        let mut node = self;
        let mut rest = key;

        while !rest.is_empty() {
            let edge = node
                .edges
                .iter()
                .find(|edge| rest.starts_with(edge.label.as_str()))?;
            rest = &rest[edge.label.len()..];
            node = &edge.node;
        }

        node.value.as_ref()
    }
}

/// Radix tree mapping strings to values.
///
/// # Examples
///
/// ```rust
/// use spill::radix::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("romane", 1);
/// tree.insert("romanus", 2);
/// tree.insert("rubens", 3);
///
/// assert_eq!(tree.get("romanus"), Some(&2));
/// assert_eq!(tree.get("roman"), None);
/// ```
pub struct RadixTree<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Insert `value` under `key`, returning the previous value if the key has been present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let previous = self.root.insert(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Get the value associated with the given `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.root.get(key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<V: Debug> Debug for RadixTree<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadixTree").field("len", &self.len).finish()
    }
}
