//! Lifecycle of the expanded-value set.
//!
//! Two mutually exclusive modes, fixed at construction: uncontrolled (the
//! state owns its set) and controlled (the caller owns the set and receives
//! toggle intents through a callback). There is no API to switch modes
//! afterwards, so the undefined "switched after construction" case cannot
//! be reached.

use std::fmt;

use tracing::{instrument, trace};

use crate::node::Node;
use crate::traverse::branch_values;

/// Receives the toggle intent in controlled mode.
pub type ToggleCallback<V> = Box<dyn FnMut(&V)>;

/// Owner of the expanded-value set.
pub enum ExpansionState<V> {
    /// The state holds its own set and mutates it on toggle.
    Uncontrolled { expanded: Vec<V> },
    /// The caller owns the set; `expanded` is the latest caller-fed
    /// snapshot and is never mutated locally.
    Controlled {
        expanded: Vec<V>,
        on_toggle: ToggleCallback<V>,
    },
}

impl<V> ExpansionState<V> {
    /// Uncontrolled, starting empty.
    pub fn uncontrolled() -> Self {
        Self::Uncontrolled {
            expanded: Vec::new(),
        }
    }

    /// Uncontrolled, seeded with the given branch values.
    pub fn with_expanded(expanded: Vec<V>) -> Self {
        Self::Uncontrolled { expanded }
    }

    /// Uncontrolled, seeded with every branch value of the initial forest
    /// ("expand all initially"). A branch is any node whose `children` key
    /// is present, even if empty — an empty-children node is a leaf for
    /// selection aggregation but still eligible here; the two
    /// classifications are independent.
    pub fn expand_all(forest: &[Node<V>]) -> Self
    where
        V: Clone,
    {
        Self::Uncontrolled {
            expanded: branch_values(forest),
        }
    }

    /// Controlled: the caller owns the set and is handed every toggle
    /// intent.
    pub fn controlled(expanded: Vec<V>, on_toggle: ToggleCallback<V>) -> Self {
        Self::Controlled { expanded, on_toggle }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// The current expanded set: the internal one in uncontrolled mode, the
    /// latest caller-fed snapshot in controlled mode.
    pub fn expanded_values(&self) -> &[V] {
        match self {
            Self::Uncontrolled { expanded } | Self::Controlled { expanded, .. } => expanded,
        }
    }

    /// Feeds the caller-owned set back in (controlled mode). Ignored in
    /// uncontrolled mode, where this state is the single owner.
    pub fn sync(&mut self, values: Vec<V>) {
        if let Self::Controlled { expanded, .. } = self {
            *expanded = values;
        }
    }

    /// Toggles `value`: XOR on the internal set in uncontrolled mode,
    /// returning the new set; in controlled mode the intent is forwarded to
    /// the callback, no local state is touched, and `None` is returned.
    #[instrument(level = "debug", skip(self, value))]
    pub fn toggle(&mut self, value: &V) -> Option<&[V]>
    where
        V: Clone + PartialEq,
    {
        match self {
            Self::Uncontrolled { expanded } => {
                if let Some(pos) = expanded.iter().position(|v| v == value) {
                    expanded.remove(pos);
                } else {
                    expanded.push(value.clone());
                }
                trace!(len = expanded.len(), "uncontrolled toggle applied");
                Some(expanded.as_slice())
            }
            Self::Controlled { on_toggle, .. } => {
                on_toggle(value);
                None
            }
        }
    }

    /// Replaces the whole set. Uncontrolled mode only; the imperative bulk
    /// operations go through here.
    pub(crate) fn replace(&mut self, values: Vec<V>) {
        if let Self::Uncontrolled { expanded } = self {
            *expanded = values;
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ExpansionState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncontrolled { expanded } => f
                .debug_struct("Uncontrolled")
                .field("expanded", expanded)
                .finish(),
            Self::Controlled { expanded, .. } => f
                .debug_struct("Controlled")
                .field("expanded", expanded)
                .field("on_toggle", &"<callback>")
                .finish(),
        }
    }
}
