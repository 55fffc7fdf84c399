//! Hierarchical selection/expansion state engine for tree-shaped data.
//!
//! Given a forest of [`Node`]s, a pool of selected values, a set of
//! explicitly disabled values and a set of expanded branch values, the crate
//! derives a per-node view of `{selected, indeterminate, disabled,
//! expanded}` plus the flattened leaf-value set each node represents, and
//! dispatches user activation and expand/collapse events into new immutable
//! pools.
//!
//! Everything is single-threaded, synchronous and pure: the entity map is
//! rebuilt wholesale from its inputs on every relevant change, and identical
//! inputs always produce structurally identical output, so callers may
//! memoize on input identity ([`SelectionController`] does exactly that).
//!
//! ```
//! use treeselect::{build_entities, BuildOptions, Node};
//!
//! let forest = vec![Node::branch(
//!     "1",
//!     vec![
//!         Node::branch("1-1", vec![Node::leaf("1-1-1"), Node::leaf("1-1-2")]),
//!         Node::leaf("1-2"),
//!     ],
//! )];
//! let entities = build_entities(
//!     &forest,
//!     &BuildOptions {
//!         selected_values: vec!["1-1-1"],
//!         ..Default::default()
//!     },
//! );
//! assert!(entities["1-1"].indeterminate);
//! assert!(entities["1"].indeterminate);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

pub mod controller;
pub mod entity;
pub mod errors;
pub mod expansion;
pub mod node;
pub mod toggle;
pub mod traverse;
pub mod tree_traits;
pub mod util;

pub use controller::{ControllerOptions, ExpansionHandle, SelectMethod, SelectionController};
pub use entity::{build_entities, BuildOptions, Entity};
pub use errors::{TreeSelectError, TreeSelectResult};
pub use expansion::{ExpansionState, ToggleCallback};
pub use node::Node;
pub use toggle::{toggle, toggle_with_status_control};
pub use traverse::{branch_group_values, branch_values, traverse};
pub use tree_traits::{render_forest, TreeNodeConvert};

/// Eager duplicate-value check for callers that prefer failing fast over
/// the builder's silent last-write-wins overwrite.
pub fn ensure_unique_values<V>(forest: &[Node<V>]) -> TreeSelectResult<()>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
{
    let mut seen = HashSet::new();
    let mut duplicate = None;
    traverse(forest, &mut |node, _| {
        if duplicate.is_none() && !seen.insert(node.value.clone()) {
            duplicate = Some(format!("{:?}", node.value));
        }
    });
    match duplicate {
        Some(value) => Err(TreeSelectError::DuplicateValue { value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_forest_passes_validation() {
        let forest = vec![Node::branch("1", vec![Node::leaf("1-1")]), Node::leaf("2")];
        assert!(ensure_unique_values(&forest).is_ok());
    }

    #[test]
    fn duplicate_value_is_reported() {
        let forest = vec![Node::branch("1", vec![Node::leaf("x")]), Node::leaf("x")];
        let err = ensure_unique_values(&forest).unwrap_err();
        assert!(err.to_string().contains("\"x\""));
    }
}
