//! Hierarchy data model and tree queries

use indexmap::map::{Iter, IndexMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, span, Level};

use crate::core::{HierarchyError, Result};

/// An ordered mapping from label to child hierarchy
///
/// Insertion order is drawing order. An empty mapping is a leaf. The
/// top-level mapping of a diagram normally holds a single root entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    children: IndexMap<String, Hierarchy>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a hierarchy from nested JSON objects, keeping key order
    pub fn from_json(input: &str) -> Result<Self> {
        let span = span!(Level::DEBUG, "parse_hierarchy", input_len = input.len());
        let _enter = span.enter();

        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(HierarchyError::parse_error(
                "expected a JSON object of labels".to_string(),
                1,
                1,
            ));
        }
        let tree: Hierarchy = serde_json::from_str(input)?;
        debug!(nodes = tree.node_count(), depth = tree.depth(), "Parsed hierarchy");
        Ok(tree)
    }

    /// Builder-style insert, consuming and returning the mapping
    pub fn with_child(mut self, label: impl Into<String>, child: Hierarchy) -> Self {
        self.insert(label, child);
        self
    }

    /// Builder-style insert of a leaf
    pub fn with_leaf(self, label: impl Into<String>) -> Self {
        self.with_child(label, Hierarchy::new())
    }

    /// Insert or replace a child; a replaced label keeps its position
    pub fn insert(&mut self, label: impl Into<String>, child: Hierarchy) -> Option<Hierarchy> {
        self.children.insert(label.into(), child)
    }

    pub fn get(&self, label: &str) -> Option<&Hierarchy> {
        self.children.get(label)
    }

    pub fn iter(&self) -> Iter<'_, String, Hierarchy> {
        self.children.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// A node without children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.len()
    }

    /// Longest path to a leaf; 0 for a leaf or the empty mapping
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Labelled nodes below this mapping
    pub fn node_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.node_count())
            .sum()
    }

    /// Nodes with no children
    pub fn terminal_count(&self) -> usize {
        self.children
            .values()
            .map(|child| {
                if child.is_leaf() {
                    1
                } else {
                    child.terminal_count()
                }
            })
            .sum()
    }

    /// Entries other than `label`; 0 when `label` is not a child
    pub fn sibling_count(&self, label: &str) -> usize {
        if self.children.contains_key(label) {
            self.len() - 1
        } else {
            0
        }
    }

    /// The mapping that holds `label`, searched pre-order
    ///
    /// With duplicate labels the first mapping found wins.
    pub fn parent_of(&self, label: &str) -> Option<&Hierarchy> {
        if self.children.contains_key(label) {
            return Some(self);
        }
        self.children
            .values()
            .find_map(|child| child.parent_of(label))
    }

    /// Leaf columns the entries of this mapping need when laid out at `depth`
    ///
    /// Outside compact mode this is the number of true leaves. In compact
    /// mode an entry at `depth >= ct` that has children is not descended: it
    /// counts 2 when it has exactly two children and 1 otherwise.
    pub fn leaf_count(&self, depth: usize, ct: usize, compact: bool) -> usize {
        self.children
            .values()
            .map(|child| entry_leaf_count(child, depth, ct, compact))
            .sum()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Hierarchy)> {
        self.children.iter().map(|(label, child)| (label.as_str(), child))
    }
}

/// Leaf columns of a single entry at `depth`
pub fn entry_leaf_count(node: &Hierarchy, depth: usize, ct: usize, compact: bool) -> usize {
    if node.is_leaf() {
        1
    } else if compact && depth >= ct {
        if node.len() == 2 {
            2
        } else {
            1
        }
    } else {
        node.leaf_count(depth + 1, ct, compact)
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = (&'a String, &'a Hierarchy);
    type IntoIter = Iter<'a, String, Hierarchy>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Hierarchy)> for Hierarchy {
    fn from_iter<T: IntoIterator<Item = (K, Hierarchy)>>(iter: T) -> Self {
        Self {
            children: iter
                .into_iter()
                .map(|(label, child)| (label.into(), child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Hierarchy {
        Hierarchy::new().with_child(
            "root",
            Hierarchy::new()
                .with_leaf("child1")
                .with_child(
                    "child2",
                    Hierarchy::new().with_leaf("child2a").with_leaf("child2b"),
                )
                .with_leaf("child3")
                .with_leaf("child4"),
        )
    }

    #[test]
    fn test_from_json_keeps_order() {
        let tree = Hierarchy::from_json(r#"{"root": {"b": {}, "a": {}, "c": {}}}"#).unwrap();
        let root = tree.get("root").unwrap();
        assert_eq!(root.labels().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(matches!(
            Hierarchy::from_json("[1, 2]"),
            Err(HierarchyError::ParseError { .. })
        ));
        assert!(matches!(
            Hierarchy::from_json(r#"{"root": 3}"#),
            Err(HierarchyError::ParseError { .. })
        ));
        assert!(Hierarchy::from_json("{\"root\": ").is_err());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Hierarchy::new().depth(), 0);
        let tree = fixture();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.get("root").unwrap().depth(), 2);
        let child1 = tree.get("root").and_then(|r| r.get("child1")).unwrap();
        assert_eq!(child1.depth(), 0);
    }

    #[test]
    fn test_counts() {
        let tree = fixture();
        let root = tree.get("root").unwrap();
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.terminal_count(), 5);
        assert_eq!(root.child_count(), 4);
        assert_eq!(root.sibling_count("child2"), 3);
        assert_eq!(root.sibling_count("missing"), 0);
        assert_eq!(tree.sibling_count("root"), 0);
    }

    #[test]
    fn test_leaf_count_modes() {
        let tree = fixture();
        assert_eq!(tree.leaf_count(1, 3, false), 5);
        assert_eq!(tree.leaf_count(1, 3, true), 5);
        // root sits at the threshold and is not descended
        assert_eq!(tree.leaf_count(1, 1, true), 1);
        // child2 has exactly two children
        assert_eq!(tree.leaf_count(1, 2, true), 5);
        assert_eq!(Hierarchy::new().leaf_count(1, 3, false), 0);
    }

    #[test]
    fn test_parent_of() {
        let tree = fixture();
        let parent = tree.parent_of("child2b").unwrap();
        assert_eq!(parent.labels().collect::<Vec<_>>(), vec!["child2a", "child2b"]);
        assert_eq!(tree.parent_of("root"), Some(&tree));
        assert!(tree.parent_of("nobody").is_none());
    }

    #[test]
    fn test_parent_of_first_match_wins() {
        let tree: Hierarchy = [
            ("a", Hierarchy::new().with_leaf("dup")),
            ("b", Hierarchy::new().with_leaf("dup").with_leaf("x")),
        ]
        .into_iter()
        .collect();
        assert_eq!(tree.parent_of("dup").map(Hierarchy::len), Some(1));
    }
}
