//! Forest input model.
//!
//! A [`Node`] carries a unique value, an optional ordered list of children
//! and an author-set disabled flag. Whether the `children` key is present at
//! all is significant: `Some(..)` marks a branch (even with an empty list),
//! `None` marks a leaf. A branch whose children have not been fetched yet is
//! represented as `Some(vec![])` — it aggregates like a leaf but still
//! counts as a branch for expansion.

use serde::{Deserialize, Serialize};

/// Tree node in a caller-supplied forest snapshot.
///
/// The display payload (labels, icons) is the rendering layer's concern and
/// is not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<V> {
    /// Unique value across the whole forest
    pub value: V,
    /// Child nodes; `Some(vec![])` is a branch without loaded children,
    /// `None` is a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node<V>>>,
    /// Author-set disabled flag
    #[serde(default)]
    pub disabled: bool,
}

impl<V> Node<V> {
    /// A leaf node (no `children` key).
    pub fn leaf(value: V) -> Self {
        Self {
            value,
            children: None,
            disabled: false,
        }
    }

    /// A branch node with the given children. Pass an empty vector for a
    /// branch whose children are not loaded yet.
    pub fn branch(value: V, children: Vec<Node<V>>) -> Self {
        Self {
            value,
            children: Some(children),
            disabled: false,
        }
    }

    /// Same node with the disabled flag set.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the `children` key is present, empty list included.
    pub fn is_branch(&self) -> bool {
        self.children.is_some()
    }

    /// Direct children as a slice, empty for leaves.
    pub fn child_nodes(&self) -> &[Node<V>] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_branch_is_branch_but_has_no_children() {
        let node: Node<&str> = Node::branch("pending", vec![]);
        assert!(node.is_branch());
        assert!(node.child_nodes().is_empty());
    }

    #[test]
    fn leaf_has_no_children_key() {
        let node: Node<&str> = Node::leaf("a");
        assert!(!node.is_branch());
        assert!(node.child_nodes().is_empty());
    }

    #[test]
    fn deserializes_with_optional_keys() {
        let node: Node<String> =
            serde_json::from_str(r#"{"value":"1","children":[{"value":"1-1"}]}"#).unwrap();
        assert!(node.is_branch());
        assert_eq!(node.child_nodes().len(), 1);
        assert!(!node.child_nodes()[0].is_branch());
        assert!(!node.disabled);
    }
}
