//! Structure Tree Library
//!
//! A lazily materialized view of an institution's academic hierarchy:
//! Year → Program → Regulation → Batch → Semester → {Sections, Labs}.
//! Each level is fetched only when its parent is expanded, filtered on the
//! client, cached under a composite id, and handed to a renderer as a forest.
//!
//! # Core Concepts
//!
//! - **StructureNode**: a tree element addressed by an ancestry-derived `NodeId`
//! - **AcademicResolver**: per-level rules turning a node into its children
//! - **ResolutionCache**: resolved children per id, valid for a staleness window
//! - **ExpansionState**: expanded ids and the single selected id
//! - **TreeAssembler**: builds the render `Forest` for the current expansion
//! - **DetailDispatcher**: routes a selection to its detail view
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use campus_api::HttpBackend;
//! use structure_tree::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = Arc::new(HttpBackend::from_env()?);
//! let mut navigator = StructureNavigator::new(backend, &NavigatorConfig::from_env());
//!
//! navigator.load_roots().await;
//! let first = navigator.forest().roots()[0].id().clone();
//! navigator.toggle_and_render(&first).await;
//! println!("{}", navigator.forest().render_text());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod cache;
pub mod config;
pub mod dispatcher;
pub mod forest;
pub mod navigator;
pub mod node;
pub mod resolver;
pub mod state;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::assembler::TreeAssembler;
    pub use crate::cache::{CacheStats, Clock, ManualClock, ResolutionCache, SystemClock};
    pub use crate::config::NavigatorConfig;
    pub use crate::dispatcher::{DetailDispatcher, DetailKind, DetailState, DetailView};
    pub use crate::forest::{ChildrenState, Forest, RenderNode, TraversalOrder};
    pub use crate::navigator::StructureNavigator;
    pub use crate::node::{NodeData, NodeDetails, NodeId, NodeType, StructureNode};
    pub use crate::resolver::{AcademicResolver, ChildResolver, Resolution};
    pub use crate::state::{ExpansionSnapshot, ExpansionState};
}
