//! Pre-order traversal over a forest and the value collections built on it.

use tracing::instrument;

use crate::node::Node;

/// Pre-order depth-first walk over the forest.
///
/// Visits every node exactly once, parents before children, in document
/// order, handing the immediate parent to the callback (`None` for roots).
pub fn traverse<V, F>(forest: &[Node<V>], visit: &mut F)
where
    F: FnMut(&Node<V>, Option<&Node<V>>),
{
    for root in forest {
        visit_subtree(root, None, visit);
    }
}

fn visit_subtree<'a, V, F>(node: &'a Node<V>, parent: Option<&'a Node<V>>, visit: &mut F)
where
    F: FnMut(&Node<V>, Option<&Node<V>>),
{
    visit(node, parent);
    for child in node.child_nodes() {
        visit_subtree(child, Some(node), visit);
    }
}

/// Collects every branch value in the forest, in pre-order.
///
/// A branch is any node whose `children` key is present, empty list
/// included. Used to seed "expand all initially" and the bulk expansion
/// operations.
#[instrument(level = "trace", skip_all)]
pub fn branch_values<V: Clone>(forest: &[Node<V>]) -> Vec<V> {
    let mut values = Vec::new();
    traverse(forest, &mut |node, _| {
        if node.is_branch() {
            values.push(node.value.clone());
        }
    });
    values
}

/// Whether `value` names a branch node anywhere in the forest.
pub fn is_branch_value<V: PartialEq>(forest: &[Node<V>], value: &V) -> bool {
    forest
        .iter()
        .any(|root| subtree_matches(root, value, &|node| node.is_branch()))
}

/// Whether `value` names any node in the forest.
pub fn contains_value<V: PartialEq>(forest: &[Node<V>], value: &V) -> bool {
    forest
        .iter()
        .any(|root| subtree_matches(root, value, &|_| true))
}

fn subtree_matches<V: PartialEq>(
    node: &Node<V>,
    value: &V,
    pred: &dyn Fn(&Node<V>) -> bool,
) -> bool {
    if node.value == *value {
        return pred(node);
    }
    node.child_nodes()
        .iter()
        .any(|child| subtree_matches(child, value, pred))
}

/// The branch group of `value`: every node sitting at the same nesting
/// depth as `value` anywhere in the forest (the value's own node included),
/// restricted to branches, in document order.
///
/// Only branch values are meaningful members of the expanded set, so leaf
/// nodes at that depth are skipped. Returns an empty vector when `value`
/// does not name a forest node.
#[instrument(level = "trace", skip(forest))]
pub fn branch_group_values<V>(forest: &[Node<V>], value: &V) -> Vec<V>
where
    V: Clone + PartialEq + std::fmt::Debug,
{
    let Some(target_depth) = depth_of(forest, value) else {
        return Vec::new();
    };

    let mut values = Vec::new();
    collect_branches_at_depth(forest, 0, target_depth, &mut values);
    values
}

/// Nesting depth of the node named by `value`, roots at depth 0.
fn depth_of<V: PartialEq>(forest: &[Node<V>], value: &V) -> Option<usize> {
    fn walk<V: PartialEq>(node: &Node<V>, value: &V, depth: usize) -> Option<usize> {
        if node.value == *value {
            return Some(depth);
        }
        node.child_nodes()
            .iter()
            .find_map(|child| walk(child, value, depth + 1))
    }
    forest.iter().find_map(|root| walk(root, value, 0))
}

fn collect_branches_at_depth<V: Clone>(
    nodes: &[Node<V>],
    depth: usize,
    target: usize,
    out: &mut Vec<V>,
) {
    for node in nodes {
        if depth == target {
            if node.is_branch() {
                out.push(node.value.clone());
            }
        } else if depth < target {
            collect_branches_at_depth(node.child_nodes(), depth + 1, target, out);
        }
    }
}
