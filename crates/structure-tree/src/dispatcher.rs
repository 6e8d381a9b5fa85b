//! Routes a selected node to its detail view
//!
//! Semesters and sections get one extra scoped fetch (their subjects). That
//! fetch does not go through the resolver or the resolution cache and its
//! failure only affects the detail pane. Group nodes are structural and get a
//! placeholder instead.

use campus_api::{Backend, Subject, SubjectType};
use log::{debug, warn};

use crate::node::{NodeData, NodeType, StructureNode};

/// Shown when a structural group node is selected
pub const GROUP_PLACEHOLDER: &str = "Select a specific item to view details";

/// Loading state of a detail-pane fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> DetailState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            DetailState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Which detail renderer a node goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailKind {
    Year,
    Program,
    Regulation,
    Batch,
    Semester,
    Section,
    Lab,
    Placeholder(&'static str),
}

/// Everything a detail renderer needs for one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub node: StructureNode,
    pub kind: DetailKind,
    /// Present only for kinds that fetch subjects
    pub subjects: Option<DetailState<Vec<Subject>>>,
}

/// Scope of the subjects fetch for a node, if it has one
fn subject_scope(node: &StructureNode) -> Option<(i64, Option<SubjectType>)> {
    match &node.data {
        NodeData::Semester { semester } => Some((semester.id, None)),
        NodeData::Section { section } => Some((section.batch_semester_id, Some(SubjectType::Theory))),
        _ => None,
    }
}

/// Maps selected nodes to detail views
pub struct DetailDispatcher<B> {
    backend: B,
}

impl<B: Backend> DetailDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Pick the renderer for `node` without fetching anything
    ///
    /// Views that need a fetch come back in the `Loading` state.
    pub fn route(&self, node: &StructureNode) -> DetailView {
        let kind = match node.node_type {
            NodeType::Year => DetailKind::Year,
            NodeType::Program => DetailKind::Program,
            NodeType::Regulation => DetailKind::Regulation,
            NodeType::Batch => DetailKind::Batch,
            NodeType::Semester => DetailKind::Semester,
            NodeType::Section => DetailKind::Section,
            NodeType::Lab => DetailKind::Lab,
            NodeType::Root | NodeType::SectionGroup | NodeType::LabGroup => {
                DetailKind::Placeholder(GROUP_PLACEHOLDER)
            }
        };

        DetailView {
            node: node.clone(),
            kind,
            subjects: subject_scope(node).map(|_| DetailState::Loading),
        }
    }

    /// Route `node` and run its scoped fetch, if any
    pub async fn dispatch(&self, node: &StructureNode) -> DetailView {
        let mut view = self.route(node);

        if let Some((batch_semester_id, subject_type)) = subject_scope(node) {
            debug!(
                "fetching subjects for {} (batch semester {})",
                node.id, batch_semester_id
            );
            let state = match self
                .backend
                .list_subjects(batch_semester_id, subject_type)
                .await
            {
                Ok(subjects) => DetailState::Ready(subjects),
                Err(err) => {
                    warn!("failed to fetch subjects for {}: {:#}", node.id, err);
                    DetailState::Failed(format!("{:#}", err))
                }
            };
            view.subjects = Some(state);
        }

        view
    }
}
