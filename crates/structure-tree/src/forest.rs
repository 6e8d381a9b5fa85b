//! Render-ready forest produced by the tree assembler

use std::collections::VecDeque;

use crate::node::{NodeId, StructureNode};

/// Whether a node's children are part of the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildrenState {
    /// Collapsed, or never expanded
    NotLoaded,
    /// Expanded and resolved; may be empty
    Loaded(Vec<RenderNode>),
}

/// A node as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub node: StructureNode,
    pub expanded: bool,
    pub selected: bool,
    pub children: ChildrenState,
}

impl RenderNode {
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// Children currently attached (empty when not loaded)
    pub fn loaded_children(&self) -> &[RenderNode] {
        match &self.children {
            ChildrenState::Loaded(children) => children,
            ChildrenState::NotLoaded => &[],
        }
    }

    /// Expanded, resolved, and nothing came back
    pub fn shows_empty_placeholder(&self) -> bool {
        self.expanded && matches!(&self.children, ChildrenState::Loaded(c) if c.is_empty())
    }
}

/// Traversal order for walking the visible forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down), the display order
    PreOrder,
    /// Visit level by level
    BreadthFirst,
}

/// The assembled tree: top-level nodes with their attached descendants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<RenderNode>,
}

impl Forest {
    pub fn new(roots: Vec<RenderNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[RenderNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Walk every attached node with its depth (top level = 0)
    pub fn walk(&self, order: TraversalOrder) -> ForestWalker<'_> {
        ForestWalker::new(self, order)
    }

    /// Find an attached node by id
    pub fn find(&self, id: &NodeId) -> Option<&RenderNode> {
        self.walk(TraversalOrder::PreOrder)
            .map(|(_, node)| node)
            .find(|node| node.id() == id)
    }

    /// Rows in display order
    pub fn visible_rows(&self) -> Vec<(usize, &RenderNode)> {
        self.walk(TraversalOrder::PreOrder).collect()
    }

    /// Number of attached nodes
    pub fn node_count(&self) -> usize {
        self.walk(TraversalOrder::PreOrder).count()
    }

    /// Plain-text outline of the forest
    ///
    /// `▸`/`▾` mark collapsed/expanded nodes, `•` marks nodes without an
    /// expand affordance. Expanded nodes that resolved to nothing get a
    /// `(no children)` row.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        for (depth, row) in self.visible_rows() {
            let indent = "  ".repeat(depth);
            let marker = if !row.node.is_expandable() {
                "•"
            } else if row.expanded {
                "▾"
            } else {
                "▸"
            };

            let mut line = format!("{}{} {}", indent, marker, row.node.label);
            if !row.node.details.is_empty() {
                let badges: Vec<String> = row
                    .node
                    .details
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect();
                line.push_str(&format!(" [{}]", badges.join(", ")));
            }
            if row.selected {
                line.push_str(" *");
            }
            lines.push(line);

            if row.shows_empty_placeholder() {
                lines.push(format!("{}  (no children)", indent));
            }
        }

        lines.join("\n")
    }
}

/// Iterator over the attached nodes of a forest
pub struct ForestWalker<'a> {
    order: TraversalOrder,
    pending: VecDeque<(usize, &'a RenderNode)>,
}

impl<'a> ForestWalker<'a> {
    fn new(forest: &'a Forest, order: TraversalOrder) -> Self {
        let pending = forest.roots.iter().map(|root| (0, root)).collect();
        Self { order, pending }
    }
}

impl<'a> Iterator for ForestWalker<'a> {
    type Item = (usize, &'a RenderNode);

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => {
                let (depth, current) = self.pending.pop_front()?;
                // Push children in reverse order so they're visited in order
                for child in current.loaded_children().iter().rev() {
                    self.pending.push_front((depth + 1, child));
                }
                Some((depth, current))
            }
            TraversalOrder::BreadthFirst => {
                let (depth, current) = self.pending.pop_front()?;
                for child in current.loaded_children() {
                    self.pending.push_back((depth + 1, child));
                }
                Some((depth, current))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;
    use campus_api::AcademicYear;

    fn year(id: i64, children: ChildrenState) -> RenderNode {
        RenderNode {
            node: StructureNode::new(
                NodeId::child(&NodeId::root(), "year", id),
                id.to_string(),
                NodeData::Year {
                    year: AcademicYear {
                        id,
                        name: id.to_string(),
                        is_current: false,
                    },
                },
            ),
            expanded: matches!(children, ChildrenState::Loaded(_)),
            selected: false,
            children,
        }
    }

    fn sample() -> Forest {
        // Years are not nested in practice; only the traversal shape matters here
        let inner = year(3, ChildrenState::NotLoaded);
        let middle = year(2, ChildrenState::Loaded(vec![inner]));
        let first = year(1, ChildrenState::Loaded(vec![middle]));
        let second = year(4, ChildrenState::Loaded(vec![]));
        Forest::new(vec![first, second])
    }

    fn ids(forest: &Forest, order: TraversalOrder) -> Vec<(usize, String)> {
        forest
            .walk(order)
            .map(|(depth, node)| (depth, node.node.label.clone()))
            .collect()
    }

    #[test]
    fn test_preorder_walk() {
        let forest = sample();
        assert_eq!(
            ids(&forest, TraversalOrder::PreOrder),
            vec![
                (0, "1".to_string()),
                (1, "2".to_string()),
                (2, "3".to_string()),
                (0, "4".to_string())
            ]
        );
    }

    #[test]
    fn test_breadth_first_walk() {
        let forest = sample();
        assert_eq!(
            ids(&forest, TraversalOrder::BreadthFirst),
            vec![
                (0, "1".to_string()),
                (0, "4".to_string()),
                (1, "2".to_string()),
                (2, "3".to_string())
            ]
        );
    }

    #[test]
    fn test_find_and_placeholder() {
        let forest = sample();
        assert_eq!(forest.node_count(), 4);

        let empty = forest.find(&NodeId::from("year_4")).unwrap();
        assert!(empty.shows_empty_placeholder());
        assert!(forest.find(&NodeId::from("year_9")).is_none());
    }

    #[test]
    fn test_render_text() {
        let forest = sample();
        assert_eq!(
            forest.render_text(),
            "▾ 1\n  ▾ 2\n    ▸ 3\n▾ 4\n  (no children)"
        );
    }
}
