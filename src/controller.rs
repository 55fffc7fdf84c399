//! Orchestration: entity map memoization, activation dispatch and the
//! imperative expansion surface.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::entity::{build_entities, BuildOptions, Entity};
use crate::expansion::ExpansionState;
use crate::node::Node;
use crate::toggle::toggle_with_status_control;
use crate::traverse::{branch_group_values, branch_values, is_branch_value};

/// Single-select toggle policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMethod {
    /// Activation re-emits `[value]` unconditionally, never deselecting.
    #[default]
    Target,
    /// Activation toggles: an already-selected value empties the pool.
    Toggle,
}

/// Policy flags of one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerOptions {
    /// A node's own value joins its descendant leaf values
    #[serde(default)]
    pub include_node_value: bool,
    /// Multiple-select mode
    #[serde(default)]
    pub multiple: bool,
    /// Single-select toggle policy; ignored when `multiple` is set
    #[serde(default)]
    pub select_method: SelectMethod,
}

/// Answers "activate node" events and owns the expansion lifecycle on top
/// of the pure builder.
///
/// The entity map is memoized on the full input tuple: every setter compares
/// against the current value and only invalidates on a real change, so
/// feeding back an identical pool never costs a rebuild. Emissions returned
/// by [`activate`](Self::activate) and
/// [`toggle_expanded`](Self::toggle_expanded) are not self-applied — the
/// host feeds them back through the setters to keep the loop controlled.
pub struct SelectionController<V> {
    forest: Vec<Node<V>>,
    selected: Vec<V>,
    disabled: Vec<V>,
    options: ControllerOptions,
    expansion: ExpansionState<V>,
    entities: HashMap<V, Entity<V>>,
    stale: bool,
}

impl<V> SelectionController<V>
where
    V: Clone + Eq + Hash,
{
    pub fn new(
        forest: Vec<Node<V>>,
        selected: Vec<V>,
        disabled: Vec<V>,
        options: ControllerOptions,
        expansion: ExpansionState<V>,
    ) -> Self {
        Self {
            forest,
            selected,
            disabled,
            options,
            expansion,
            entities: HashMap::new(),
            stale: true,
        }
    }

    /// The derived entity map, rebuilt if an input changed since last read.
    pub fn entities(&mut self) -> &HashMap<V, Entity<V>> {
        self.ensure_entities();
        &self.entities
    }

    /// One node's derived entity, `None` for values absent from the forest.
    pub fn entity(&mut self, value: &V) -> Option<&Entity<V>> {
        self.ensure_entities();
        self.entities.get(value)
    }

    pub fn selected_values(&self) -> &[V] {
        &self.selected
    }

    pub fn expanded_values(&self) -> &[V] {
        self.expansion.expanded_values()
    }

    pub fn is_controlled_expansion(&self) -> bool {
        self.expansion.is_controlled()
    }

    pub fn set_forest(&mut self, forest: Vec<Node<V>>) {
        if self.forest != forest {
            self.forest = forest;
            self.stale = true;
        }
    }

    /// Feeds an emitted selection pool back in.
    pub fn set_selected_values(&mut self, values: Vec<V>) {
        if self.selected != values {
            self.selected = values;
            self.stale = true;
        }
    }

    pub fn set_disabled_values(&mut self, values: Vec<V>) {
        if self.disabled != values {
            self.disabled = values;
            self.stale = true;
        }
    }

    /// Feeds the caller-owned expanded set back in. Controlled expansion
    /// mode only; in uncontrolled mode the controller is the single owner
    /// and this is ignored.
    pub fn set_expanded_values(&mut self, values: Vec<V>) {
        if !self.expansion.is_controlled() {
            return;
        }
        if self.expansion.expanded_values() != values.as_slice() {
            self.expansion.sync(values);
            self.stale = true;
        }
    }

    /// Dispatches a user "activate node" event and emits the new selection
    /// pool, or `None` when the event changes nothing (unknown value, or a
    /// branch activation in single-select mode).
    ///
    /// Multiple mode toggles the node's descendant leaf values against the
    /// current pool as one atomic batch. Single mode activates leaves only
    /// (aggregation classification, so an empty branch counts): `Target`
    /// re-emits the value even when it is already the sole selection,
    /// `Toggle` collapses the pool to at most one value.
    #[instrument(level = "debug", skip_all)]
    pub fn activate(&mut self, value: &V) -> Option<Vec<V>> {
        self.ensure_entities();
        let entity = self.entities.get(value)?;

        if self.options.multiple {
            let pool = toggle_with_status_control(entity.selected, &entity.leaf_values, &self.selected);
            debug!(len = pool.len(), "multiple-select activation");
            return Some(pool);
        }

        if !entity.is_leaf() {
            return None;
        }
        match self.options.select_method {
            SelectMethod::Target => Some(vec![entity.value.clone()]),
            SelectMethod::Toggle => Some(toggle_with_status_control(
                entity.selected,
                std::slice::from_ref(value),
                &[],
            )),
        }
    }

    /// Toggles one branch value's expansion. Uncontrolled mode applies the
    /// toggle and emits the new expanded set; controlled mode forwards the
    /// intent to the caller's callback and emits nothing. Values that do not
    /// name a branch are no-ops.
    #[instrument(level = "debug", skip_all)]
    pub fn toggle_expanded(&mut self, value: &V) -> Option<Vec<V>> {
        if !is_branch_value(&self.forest, value) {
            return None;
        }
        let emitted = self.expansion.toggle(value).map(|set| set.to_vec());
        if emitted.is_some() {
            self.stale = true;
        }
        emitted
    }

    /// The imperative expand/collapse surface. `None` in controlled
    /// expansion mode: the caller owns the set there, and a second authority
    /// over it is never constructed.
    pub fn expansion_handle(&mut self) -> Option<ExpansionHandle<'_, V>> {
        if self.expansion.is_controlled() {
            return None;
        }
        Some(ExpansionHandle { controller: self })
    }

    fn ensure_entities(&mut self) {
        if !self.stale {
            return;
        }
        let options = BuildOptions {
            selected_values: self.selected.clone(),
            expanded_values: self.expansion.expanded_values().to_vec(),
            disabled_values: self.disabled.clone(),
            include_node_value: self.options.include_node_value,
            multiple: self.options.multiple,
        };
        self.entities = build_entities(&self.forest, &options);
        self.stale = false;
    }

    fn replace_expanded(&mut self, values: Vec<V>) {
        self.expansion.replace(values);
        self.stale = true;
    }
}

impl<V: fmt::Debug> fmt::Debug for SelectionController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("roots", &self.forest.len())
            .field("selected", &self.selected)
            .field("disabled", &self.disabled)
            .field("options", &self.options)
            .field("expansion", &self.expansion)
            .finish()
    }
}

/// Imperative command object over the uncontrolled expanded set.
///
/// Only ever constructed in uncontrolled expansion mode; every operation
/// touches branch values exclusively, so no leaf value can enter the set.
#[derive(Debug)]
pub struct ExpansionHandle<'a, V> {
    controller: &'a mut SelectionController<V>,
}

impl<V> ExpansionHandle<'_, V>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    /// Marks one branch value expanded. Leaf and unknown values are no-ops.
    pub fn expand(&mut self, value: &V) {
        if !is_branch_value(&self.controller.forest, value) {
            return;
        }
        let mut expanded = self.controller.expansion.expanded_values().to_vec();
        if !expanded.contains(value) {
            expanded.push(value.clone());
            self.controller.replace_expanded(expanded);
        }
    }

    /// Removes one value from the expanded set.
    pub fn collapse(&mut self, value: &V) {
        let mut expanded = self.controller.expansion.expanded_values().to_vec();
        if let Some(pos) = expanded.iter().position(|v| v == value) {
            expanded.remove(pos);
            self.controller.replace_expanded(expanded);
        }
    }

    /// Expands every branch value in the forest.
    #[instrument(level = "debug", skip_all)]
    pub fn expand_all(&mut self) {
        let expanded = branch_values(&self.controller.forest);
        self.controller.replace_expanded(expanded);
    }

    /// Empties the expanded set.
    pub fn collapse_all(&mut self) {
        self.controller.replace_expanded(Vec::new());
    }

    /// Expands the branch group of `value`: every branch sitting at the
    /// same nesting level anywhere in the forest, `value`'s own node
    /// included.
    #[instrument(level = "debug", skip(self))]
    pub fn expand_all_from(&mut self, value: &V) {
        let group = branch_group_values(&self.controller.forest, value);
        if group.is_empty() {
            return;
        }
        let expanded = self
            .controller
            .expansion
            .expanded_values()
            .iter()
            .cloned()
            .chain(group)
            .unique()
            .collect_vec();
        self.controller.replace_expanded(expanded);
    }

    /// Collapses the branch group of `value`.
    #[instrument(level = "debug", skip(self))]
    pub fn collapse_all_from(&mut self, value: &V) {
        let group = branch_group_values(&self.controller.forest, value);
        if group.is_empty() {
            return;
        }
        let expanded = self
            .controller
            .expansion
            .expanded_values()
            .iter()
            .filter(|v| !group.contains(v))
            .cloned()
            .collect_vec();
        self.controller.replace_expanded(expanded);
    }
}
