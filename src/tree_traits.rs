//! termtree rendering of forests, plain and annotated with derived state.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use termtree::Tree;
use tracing::instrument;

use crate::entity::Entity;
use crate::node::Node;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<V: Display> TreeNodeConvert for Node<V> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let root = self.value.to_string();

        // Recursively construct the children
        let leaves: Vec<_> = self
            .child_nodes()
            .iter()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(root).with_leaves(leaves)
    }
}

/// Renders the forest with its derived state inline: `[x]` selected, `[~]`
/// indeterminate, `[ ]` neither, `*` expanded, `(disabled)`.
///
/// Debug/snapshot aid; nodes absent from the entity map are rendered bare.
pub fn render_forest<V>(forest: &[Node<V>], entities: &HashMap<V, Entity<V>>) -> Tree<String>
where
    V: Display + Eq + Hash,
{
    let mut tree = Tree::new(".".to_string());
    for root in forest {
        tree.push(render_node(root, entities));
    }
    tree
}

fn render_node<V>(node: &Node<V>, entities: &HashMap<V, Entity<V>>) -> Tree<String>
where
    V: Display + Eq + Hash,
{
    let label = match entities.get(&node.value) {
        Some(entity) => {
            let mark = if entity.indeterminate {
                "[~]"
            } else if entity.selected {
                "[x]"
            } else {
                "[ ]"
            };
            format!(
                "{} {}{}{}",
                mark,
                node.value,
                if entity.expanded { " *" } else { "" },
                if entity.disabled { " (disabled)" } else { "" },
            )
        }
        None => node.value.to_string(),
    };

    let leaves: Vec<_> = node
        .child_nodes()
        .iter()
        .map(|c| render_node(c, entities))
        .collect();
    Tree::new(label).with_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{build_entities, BuildOptions};

    #[test]
    fn renders_state_markers() {
        let forest = vec![Node::branch(
            "1",
            vec![Node::leaf("1-1"), Node::leaf("1-2")],
        )];
        let entities = build_entities(
            &forest,
            &BuildOptions {
                selected_values: vec!["1-1"],
                expanded_values: vec!["1"],
                ..Default::default()
            },
        );
        let rendered = render_forest(&forest, &entities).to_string();
        assert!(rendered.contains("[~] 1 *"));
        assert!(rendered.contains("[x] 1-1"));
        assert!(rendered.contains("[ ] 1-2"));
    }

    #[test]
    fn renders_plain_structure_without_entities() {
        let node = Node::branch("1", vec![Node::leaf("1-1")]);
        let rendered = node.to_tree_string().to_string();
        assert!(rendered.contains("1-1"));
    }
}
