//! Core node types for the academic structure tree

use campus_api::{AcademicYear, Batch, PracticalBatch, Program, Regulation, Section, Semester};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Composite key of a node, built from its ancestry and entity id
///
/// Example: `year_2024_prog_7_reg_3_batch_12`. The id is the only identity a
/// node has; the cache and the expansion/selection state key on it.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    const ROOT: &'static str = "root";
    const DELIMITER: char = '_';

    /// Id of the synthetic root node
    pub fn root() -> Self {
        NodeId(Self::ROOT.to_string())
    }

    /// Build the id of a child entity under `parent`
    ///
    /// Children of the root are not prefixed with the root id, so a year with
    /// entity id 2024 is `year_2024`.
    pub fn child(parent: &NodeId, tag: &str, entity_id: impl fmt::Display) -> Self {
        if parent.is_root() {
            NodeId(format!("{}{}{}", tag, Self::DELIMITER, entity_id))
        } else {
            NodeId(format!(
                "{}{}{}{}{}",
                parent.0,
                Self::DELIMITER,
                tag,
                Self::DELIMITER,
                entity_id
            ))
        }
    }

    /// Build the id of a synthetic grouping node under `parent`
    pub fn group(parent: &NodeId, tag: &str) -> Self {
        NodeId(format!("{}{}{}", parent.0, Self::DELIMITER, tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Check whether this id lies strictly below `ancestor` in the tree
    pub fn is_descendant_of(&self, ancestor: &NodeId) -> bool {
        if ancestor.is_root() {
            return !self.is_root();
        }
        self.0.len() > ancestor.0.len() + 1
            && self.0.starts_with(&ancestor.0)
            && self.0[ancestor.0.len()..].starts_with(Self::DELIMITER)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// The level a node occupies in the academic hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    #[display(fmt = "Root")]
    Root,
    #[display(fmt = "Year")]
    Year,
    #[display(fmt = "Program")]
    Program,
    #[display(fmt = "Regulation")]
    Regulation,
    #[display(fmt = "Batch")]
    Batch,
    #[display(fmt = "Semester")]
    Semester,
    #[display(fmt = "Section Group")]
    SectionGroup,
    #[display(fmt = "Lab Group")]
    LabGroup,
    #[display(fmt = "Section")]
    Section,
    #[display(fmt = "Lab")]
    Lab,
}

impl NodeType {
    /// Type tag inserted into composite ids
    pub const fn tag(self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Year => "year",
            NodeType::Program => "prog",
            NodeType::Regulation => "reg",
            NodeType::Batch => "batch",
            NodeType::Semester => "sem",
            NodeType::SectionGroup => "sections",
            NodeType::LabGroup => "labs",
            NodeType::Section => "section",
            NodeType::Lab => "lab",
        }
    }

    /// The node types that may appear directly below this one
    pub const fn child_types(self) -> &'static [NodeType] {
        match self {
            NodeType::Root => &[NodeType::Year],
            NodeType::Year => &[NodeType::Program],
            NodeType::Program => &[NodeType::Regulation],
            NodeType::Regulation => &[NodeType::Batch],
            NodeType::Batch => &[NodeType::Semester],
            NodeType::Semester => &[NodeType::SectionGroup, NodeType::LabGroup],
            NodeType::SectionGroup => &[NodeType::Section],
            NodeType::LabGroup => &[NodeType::Lab],
            NodeType::Section | NodeType::Lab => &[],
        }
    }

    /// Synthetic grouping level, not present in the backend
    pub const fn is_group(self) -> bool {
        matches!(self, NodeType::SectionGroup | NodeType::LabGroup)
    }

    pub const fn is_leaf(self) -> bool {
        self.child_types().is_empty()
    }
}

/// Backend entity carried by a node, plus the ancestor context its
/// descendants need to resolve without walking back up the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Root,
    Year {
        year: AcademicYear,
    },
    Program {
        program: Program,
        year_id: i64,
    },
    Regulation {
        regulation: Regulation,
        year_id: i64,
        program_id: i64,
    },
    Batch {
        batch: Batch,
        year_id: i64,
    },
    Semester {
        semester: Semester,
    },
    SectionGroup {
        batch_semester_id: i64,
    },
    LabGroup {
        batch_semester_id: i64,
    },
    Section {
        section: Section,
    },
    Lab {
        lab: PracticalBatch,
    },
}

impl NodeData {
    pub const fn node_type(&self) -> NodeType {
        match self {
            NodeData::Root => NodeType::Root,
            NodeData::Year { .. } => NodeType::Year,
            NodeData::Program { .. } => NodeType::Program,
            NodeData::Regulation { .. } => NodeType::Regulation,
            NodeData::Batch { .. } => NodeType::Batch,
            NodeData::Semester { .. } => NodeType::Semester,
            NodeData::SectionGroup { .. } => NodeType::SectionGroup,
            NodeData::LabGroup { .. } => NodeType::LabGroup,
            NodeData::Section { .. } => NodeType::Section,
            NodeData::Lab { .. } => NodeType::Lab,
        }
    }
}

/// Display-only badges (occupancy, counts); never used for logic
pub type NodeDetails = BTreeMap<String, String>;

/// A single node in the academic structure tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureNode {
    /// Composite key, the node's identity
    pub id: NodeId,
    /// Level in the hierarchy, always consistent with `data`
    pub node_type: NodeType,
    /// Display string derived from the entity
    pub label: String,
    /// Entity and ancestor context
    pub data: NodeData,
    /// Children synthesized eagerly by the resolver (group nodes)
    pub children: Option<Vec<StructureNode>>,
    /// Whether to offer an expand affordance before resolution has run
    pub has_children: bool,
    pub details: NodeDetails,
}

impl StructureNode {
    /// Create a new node; the type and the expand hint follow from `data`
    pub fn new(id: NodeId, label: impl Into<String>, data: NodeData) -> Self {
        let node_type = data.node_type();
        Self {
            id,
            node_type,
            label: label.into(),
            data,
            children: None,
            has_children: !node_type.is_leaf(),
            details: NodeDetails::new(),
        }
    }

    /// The synthetic root whose children are the academic years
    pub fn root() -> Self {
        Self::new(NodeId::root(), "Academic Structure", NodeData::Root)
    }

    /// Attach pre-resolved children
    pub fn with_children(mut self, children: Vec<StructureNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }

    /// Whether the node gets an expand/collapse affordance
    pub fn is_expandable(&self) -> bool {
        self.has_children || self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

impl fmt::Display for StructureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.label, self.node_type, self.id)
    }
}
