//! Derived per-node state, computed in one recursive post-order pass.
//!
//! [`build_entities`] is a pure total function of its inputs: the same
//! forest and options always produce a structurally identical map, so
//! callers are free to memoize on input identity. Entities are ephemeral —
//! rebuilt wholesale on every relevant input change, never patched — and
//! must not be retained beyond the computation that produced them.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::node::Node;

/// Inputs of one build pass. This is the full tuple the entity map is a
/// function of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions<V> {
    /// Currently selected values (the selection pool), in caller order
    #[serde(default)]
    pub selected_values: Vec<V>,
    /// Branch values currently shown expanded
    #[serde(default)]
    pub expanded_values: Vec<V>,
    /// Explicitly disabled values, in addition to per-node flags
    #[serde(default)]
    pub disabled_values: Vec<V>,
    /// Whether a node's own value joins its descendant leaf values
    #[serde(default)]
    pub include_node_value: bool,
    /// Multiple-select mode (carried for the controller; aggregation itself
    /// is mode-independent)
    #[serde(default)]
    pub multiple: bool,
}

// Derived Default would require `V: Default`.
impl<V> Default for BuildOptions<V> {
    fn default() -> Self {
        Self {
            selected_values: Vec::new(),
            expanded_values: Vec::new(),
            disabled_values: Vec::new(),
            include_node_value: false,
            multiple: false,
        }
    }
}

/// Resolved state of one node, derived from the whole forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity<V> {
    pub value: V,
    /// Resolved selection: pool membership for leaves, all-children-selected
    /// for branches
    pub selected: bool,
    /// Some but not all descendants selected; dominates `selected`
    pub indeterminate: bool,
    /// Resolved disabled: explicit flag, disabled-set membership, inherited
    /// from an ancestor, or every direct child disabled
    pub disabled: bool,
    /// Membership in the expanded set
    pub expanded: bool,
    /// Flattened descendant leaf values; the node's own value is appended
    /// under the `include_node_value` policy
    pub leaf_values: Vec<V>,
    /// Direct child values in document order; their entities are reachable
    /// through the output map
    pub child_values: Vec<V>,
}

impl<V> Entity<V> {
    /// Leaf for aggregation purposes: no resolved children. A branch with an
    /// empty children list counts as a leaf here.
    pub fn is_leaf(&self) -> bool {
        self.child_values.is_empty()
    }
}

/// Builds the complete derived-state map for the forest.
///
/// One recursive post-order pass: children are resolved before their parent,
/// which consumes their resolved states for its own tri-state and disabled
/// aggregation. Values in any of the option pools that do not name a forest
/// node are silently ignored. Never fails.
///
/// Duplicate node values are last-write-wins in the returned map (post-order
/// insertion order); [`crate::ensure_unique_values`] is the opt-in eager
/// check for callers that prefer failing fast.
#[instrument(level = "debug", skip_all, fields(roots = forest.len()))]
pub fn build_entities<V>(forest: &[Node<V>], options: &BuildOptions<V>) -> HashMap<V, Entity<V>>
where
    V: Clone + Eq + Hash,
{
    let lookups = Lookups {
        selected: options.selected_values.iter().collect(),
        expanded: options.expanded_values.iter().collect(),
        disabled: options.disabled_values.iter().collect(),
        include_node_value: options.include_node_value,
    };

    let mut entities = HashMap::new();
    for root in forest {
        let resolved = resolve_node(root, false, &lookups);
        for entity in resolved.descendants {
            entities.insert(entity.value.clone(), entity);
        }
        entities.insert(resolved.entity.value.clone(), resolved.entity);
    }
    entities
}

struct Lookups<'a, V> {
    selected: HashSet<&'a V>,
    expanded: HashSet<&'a V>,
    disabled: HashSet<&'a V>,
    include_node_value: bool,
}

/// One node's resolved entity plus every descendant entity, returned up the
/// call stack. The output map is assembled by the top-level caller from
/// these values; no mutable map is threaded through the recursion.
struct Resolved<V> {
    entity: Entity<V>,
    descendants: Vec<Entity<V>>,
}

fn resolve_node<V>(node: &Node<V>, parent_disabled: bool, lookups: &Lookups<'_, V>) -> Resolved<V>
where
    V: Clone + Eq + Hash,
{
    let self_disabled = node.disabled || lookups.disabled.contains(&node.value);
    // Children inherit explicit/inherited disabled state only; the upward
    // all-children cascade never flows back down.
    let inherited = parent_disabled || self_disabled;

    let child_nodes = node.child_nodes();
    let mut descendants = Vec::new();
    let mut child_values = Vec::with_capacity(child_nodes.len());
    let mut leaf_values = Vec::new();
    let mut selected_children = 0usize;
    let mut any_indeterminate = false;
    let mut all_children_disabled = true;

    for child in child_nodes {
        let resolved = resolve_node(child, inherited, lookups);
        child_values.push(resolved.entity.value.clone());
        leaf_values.extend(resolved.entity.leaf_values.iter().cloned());
        if resolved.entity.selected {
            selected_children += 1;
        }
        any_indeterminate |= resolved.entity.indeterminate;
        all_children_disabled &= resolved.entity.disabled;
        descendants.extend(resolved.descendants);
        descendants.push(resolved.entity);
    }

    // A node with an explicit empty children list aggregates like a leaf;
    // the upward disabled cascade needs at least one actual child.
    let is_leaf = child_nodes.is_empty();
    let disabled = self_disabled || parent_disabled || (!is_leaf && all_children_disabled);

    let (selected, indeterminate) = if is_leaf {
        (lookups.selected.contains(&node.value), false)
    } else if any_indeterminate {
        (false, true)
    } else if selected_children == child_nodes.len() {
        (true, false)
    } else if selected_children > 0 {
        (false, true)
    } else {
        (false, false)
    };

    if is_leaf {
        leaf_values.push(node.value.clone());
    } else if lookups.include_node_value {
        leaf_values.push(node.value.clone());
    }

    Resolved {
        entity: Entity {
            value: node.value.clone(),
            selected,
            indeterminate,
            disabled,
            expanded: lookups.expanded.contains(&node.value),
            leaf_values,
            child_values,
        },
        descendants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_forest_builds_empty_map() {
        let entities = build_entities::<&str>(&[], &BuildOptions::default());
        assert!(entities.is_empty());
    }

    #[test]
    fn leaf_selection_is_pool_membership() {
        let forest = vec![Node::leaf("a"), Node::leaf("b")];
        let entities = build_entities(
            &forest,
            &BuildOptions {
                selected_values: vec!["b"],
                ..Default::default()
            },
        );
        assert!(!entities["a"].selected);
        assert!(entities["b"].selected);
        assert!(!entities["b"].indeterminate);
    }

    #[test]
    fn include_node_value_appends_own_value_after_children() {
        let forest = vec![Node::branch(
            "1",
            vec![Node::leaf("1-1"), Node::leaf("1-2")],
        )];
        let entities = build_entities(
            &forest,
            &BuildOptions {
                include_node_value: true,
                ..Default::default()
            },
        );
        assert_eq!(entities["1"].leaf_values, vec!["1-1", "1-2", "1"]);
    }

    #[test]
    fn empty_children_list_aggregates_like_a_leaf() {
        let forest = vec![Node::branch("pending", vec![])];
        let entities = build_entities(
            &forest,
            &BuildOptions {
                selected_values: vec!["pending"],
                ..Default::default()
            },
        );
        let entity = &entities["pending"];
        assert!(entity.selected);
        assert!(entity.is_leaf());
        assert_eq!(entity.leaf_values, vec!["pending"]);
    }

    #[test]
    fn duplicate_values_are_last_write_wins() {
        let forest = vec![
            Node::branch("1", vec![Node::leaf("dup")]),
            Node::leaf("dup").disabled(),
        ];
        let entities = build_entities(&forest, &BuildOptions::default());
        // The second root's entity is inserted later and overwrites.
        assert!(entities["dup"].disabled);
    }
}
