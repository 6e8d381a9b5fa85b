//! Expansion and selection state
//!
//! Both sets hold node ids only, so they stay valid when the forest is rebuilt
//! from fresh resolutions.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::node::{NodeId, StructureNode};

/// Which nodes are open and which single node is selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<NodeId>,
    selected: Option<NodeId>,
}

/// Serializable copy of an [`ExpansionState`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSnapshot {
    pub expanded: Vec<NodeId>,
    pub selected: Option<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expansion of `node`
    ///
    /// Returns whether the state changed. Nodes without children and without
    /// a `has_children` hint have no toggle affordance and are left alone.
    pub fn toggle(&mut self, node: &StructureNode) -> bool {
        if !node.is_expandable() {
            trace!("ignoring toggle on non-expandable node {}", node.id);
            return false;
        }

        if !self.expanded.remove(&node.id) {
            self.expanded.insert(node.id.clone());
        }
        true
    }

    pub fn expand(&mut self, id: NodeId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: &NodeId) {
        self.expanded.remove(id);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Select a node; its expansion is not affected
    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn snapshot(&self) -> ExpansionSnapshot {
        let mut expanded: Vec<NodeId> = self.expanded.iter().cloned().collect();
        expanded.sort();
        ExpansionSnapshot {
            expanded,
            selected: self.selected.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: ExpansionSnapshot) {
        self.expanded = snapshot.expanded.into_iter().collect();
        self.selected = snapshot.selected;
    }
}
