//! Child resolution rules, one per node type
//!
//! | Parent      | Fetch                          | Filter / join                                      |
//! |-------------|--------------------------------|----------------------------------------------------|
//! | Root        | academic years                 | none                                               |
//! | Year        | all programs                   | none (every program is offered every year)         |
//! | Program     | all regulations                | `program_id == program.id`                         |
//! | Regulation  | batches of the program         | `regulation_id == regulation.id`, `admission_year_id == year_id` |
//! | Batch       | semesters of the batch         | ascending `semester_number`                        |
//! | Semester    | sections + practical batches   | fetched concurrently, bucketed into group nodes    |
//! | Group       | none                           | the group's pre-populated children                 |
//!
//! A failed fetch never escapes: it is logged and the affected branch yields
//! no children, with [`Resolution::complete`] cleared.

use anyhow::Error;
use async_trait::async_trait;
use campus_api::{AcademicYear, Backend, Batch, PracticalBatch, Program, Regulation, Section, Semester};
use log::{debug, warn};

use crate::node::{NodeData, NodeId, NodeType, StructureNode};

/// Label of the synthetic bucket holding a semester's theory sections
pub const SECTION_GROUP_LABEL: &str = "Sections (Theory)";
/// Label of the synthetic bucket holding a semester's practical batches
pub const LAB_GROUP_LABEL: &str = "Lab Batches (Practical)";

/// Outcome of resolving one node's children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub children: Vec<StructureNode>,
    /// False when any fetch behind this result failed
    pub complete: bool,
}

impl Resolution {
    pub fn complete(children: Vec<StructureNode>) -> Self {
        Self {
            children,
            complete: true,
        }
    }

    pub fn partial(children: Vec<StructureNode>) -> Self {
        Self {
            children,
            complete: false,
        }
    }

    /// An empty result standing in for a failed fetch
    pub fn failed() -> Self {
        Self::partial(Vec::new())
    }
}

/// Produces the children of a node
#[async_trait]
pub trait ChildResolver: Send + Sync {
    async fn resolve(&self, node: &StructureNode) -> Resolution;
}

/// Resolves the academic hierarchy against a [`Backend`]
pub struct AcademicResolver<B> {
    backend: B,
}

fn log_failure(node: &StructureNode, what: &str, err: &Error) {
    warn!("failed to fetch {} for {}: {:#}", what, node.id, err);
}

fn with_occupancy(node: StructureNode, count: Option<u32>, capacity: Option<u32>) -> StructureNode {
    match (count, capacity) {
        (Some(count), Some(capacity)) => {
            node.with_detail("occupancy", format!("{}/{}", count, capacity))
        }
        (Some(count), None) => node.with_detail("students", count),
        _ => node,
    }
}

impl<B: Backend> AcademicResolver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn years(&self, node: &StructureNode) -> Resolution {
        match self.backend.list_academic_years().await {
            Ok(years) => Resolution::complete(
                years
                    .into_iter()
                    .map(|year| year_node(&node.id, year))
                    .collect(),
            ),
            Err(err) => {
                log_failure(node, "academic years", &err);
                Resolution::failed()
            }
        }
    }

    async fn programs(&self, node: &StructureNode, year_id: i64) -> Resolution {
        match self.backend.list_programs().await {
            Ok(programs) => Resolution::complete(
                programs
                    .into_iter()
                    .map(|program| program_node(&node.id, program, year_id))
                    .collect(),
            ),
            Err(err) => {
                log_failure(node, "programs", &err);
                Resolution::failed()
            }
        }
    }

    async fn regulations(&self, node: &StructureNode, program_id: i64, year_id: i64) -> Resolution {
        match self.backend.list_regulations().await {
            Ok(regulations) => Resolution::complete(
                regulations
                    .into_iter()
                    .filter(|r| r.program_id == program_id)
                    .map(|regulation| regulation_node(&node.id, regulation, year_id, program_id))
                    .collect(),
            ),
            Err(err) => {
                log_failure(node, "regulations", &err);
                Resolution::failed()
            }
        }
    }

    async fn batches(
        &self,
        node: &StructureNode,
        regulation_id: i64,
        program_id: i64,
        year_id: i64,
    ) -> Resolution {
        match self.backend.list_batches(Some(program_id)).await {
            Ok(batches) => Resolution::complete(
                batches
                    .into_iter()
                    .filter(|b| b.regulation_id == regulation_id && b.admission_year_id == year_id)
                    .map(|batch| batch_node(&node.id, batch, year_id))
                    .collect(),
            ),
            Err(err) => {
                log_failure(node, "batches", &err);
                Resolution::failed()
            }
        }
    }

    async fn semesters(&self, node: &StructureNode, batch_id: i64) -> Resolution {
        match self.backend.list_semesters(batch_id).await {
            Ok(mut semesters) => {
                semesters.sort_by_key(|s| s.semester_number);
                Resolution::complete(
                    semesters
                        .into_iter()
                        .map(|semester| semester_node(&node.id, semester))
                        .collect(),
                )
            }
            Err(err) => {
                log_failure(node, "semesters", &err);
                Resolution::failed()
            }
        }
    }

    /// Fetch sections and practical batches together and bucket them
    ///
    /// Both fetches are awaited before any group is built. A group is left
    /// out when its fetch failed or returned nothing.
    async fn groups(&self, node: &StructureNode, batch_semester_id: i64) -> Resolution {
        let (sections, labs) = futures::join!(
            self.backend.list_sections(batch_semester_id),
            self.backend.list_practical_batches(batch_semester_id)
        );

        let mut complete = true;
        let mut groups = Vec::with_capacity(2);

        match sections {
            Ok(sections) if !sections.is_empty() => {
                groups.push(section_group_node(&node.id, batch_semester_id, sections));
            }
            Ok(_) => {}
            Err(err) => {
                log_failure(node, "sections", &err);
                complete = false;
            }
        }

        match labs {
            Ok(labs) if !labs.is_empty() => {
                groups.push(lab_group_node(&node.id, batch_semester_id, labs));
            }
            Ok(_) => {}
            Err(err) => {
                log_failure(node, "practical batches", &err);
                complete = false;
            }
        }

        Resolution {
            children: groups,
            complete,
        }
    }
}

#[async_trait]
impl<B: Backend> ChildResolver for AcademicResolver<B> {
    async fn resolve(&self, node: &StructureNode) -> Resolution {
        debug!("resolving children of {} ({})", node.id, node.node_type);

        match &node.data {
            NodeData::Root => self.years(node).await,
            NodeData::Year { year } => self.programs(node, year.id).await,
            NodeData::Program { program, year_id } => {
                self.regulations(node, program.id, *year_id).await
            }
            NodeData::Regulation {
                regulation,
                year_id,
                program_id,
            } => {
                self.batches(node, regulation.id, *program_id, *year_id)
                    .await
            }
            NodeData::Batch { batch, .. } => self.semesters(node, batch.id).await,
            NodeData::Semester { semester } => self.groups(node, semester.id).await,
            NodeData::SectionGroup { .. } | NodeData::LabGroup { .. } => {
                Resolution::complete(node.children.clone().unwrap_or_default())
            }
            NodeData::Section { .. } | NodeData::Lab { .. } => Resolution::complete(Vec::new()),
        }
    }
}

fn year_node(parent: &NodeId, year: AcademicYear) -> StructureNode {
    let id = NodeId::child(parent, NodeType::Year.tag(), year.id);
    let label = year.name.clone();
    let node = StructureNode::new(id, label, NodeData::Year { year: year.clone() });
    if year.is_current {
        node.with_detail("current", "yes")
    } else {
        node
    }
}

fn program_node(parent: &NodeId, program: Program, year_id: i64) -> StructureNode {
    let id = NodeId::child(parent, NodeType::Program.tag(), program.id);
    let node = StructureNode::new(
        id,
        program.name.clone(),
        NodeData::Program {
            program: program.clone(),
            year_id,
        },
    );
    match program.code {
        Some(code) => node.with_detail("code", code),
        None => node,
    }
}

fn regulation_node(
    parent: &NodeId,
    regulation: Regulation,
    year_id: i64,
    program_id: i64,
) -> StructureNode {
    let id = NodeId::child(parent, NodeType::Regulation.tag(), regulation.id);
    let label = regulation.name.clone();
    StructureNode::new(
        id,
        label,
        NodeData::Regulation {
            regulation,
            year_id,
            program_id,
        },
    )
}

fn batch_node(parent: &NodeId, batch: Batch, year_id: i64) -> StructureNode {
    let id = NodeId::child(parent, NodeType::Batch.tag(), batch.id);
    let label = batch.name.clone();
    StructureNode::new(id, label, NodeData::Batch { batch, year_id })
}

fn semester_node(parent: &NodeId, semester: Semester) -> StructureNode {
    let id = NodeId::child(parent, NodeType::Semester.tag(), semester.id);
    let label = semester
        .name
        .clone()
        .unwrap_or_else(|| format!("Semester {}", semester.semester_number));
    StructureNode::new(id, label, NodeData::Semester { semester })
}

fn section_group_node(
    parent: &NodeId,
    batch_semester_id: i64,
    sections: Vec<Section>,
) -> StructureNode {
    let id = NodeId::group(parent, NodeType::SectionGroup.tag());
    let count = sections.len();
    let children = sections
        .into_iter()
        .map(|section| {
            let child_id = NodeId::child(&id, NodeType::Section.tag(), section.id);
            let (count, capacity) = (section.student_count, section.capacity);
            let node = StructureNode::new(child_id, section.name.clone(), NodeData::Section { section });
            with_occupancy(node, count, capacity)
        })
        .collect();

    StructureNode::new(
        id,
        SECTION_GROUP_LABEL,
        NodeData::SectionGroup { batch_semester_id },
    )
    .with_children(children)
    .with_detail("count", count)
}

fn lab_group_node(
    parent: &NodeId,
    batch_semester_id: i64,
    labs: Vec<PracticalBatch>,
) -> StructureNode {
    let id = NodeId::group(parent, NodeType::LabGroup.tag());
    let count = labs.len();
    let children = labs
        .into_iter()
        .map(|lab| {
            let child_id = NodeId::child(&id, NodeType::Lab.tag(), lab.id);
            let (count, capacity) = (lab.student_count, lab.capacity);
            let node = StructureNode::new(child_id, lab.name.clone(), NodeData::Lab { lab });
            with_occupancy(node, count, capacity)
        })
        .collect();

    StructureNode::new(id, LAB_GROUP_LABEL, NodeData::LabGroup { batch_semester_id })
        .with_children(children)
        .with_detail("count", count)
}
