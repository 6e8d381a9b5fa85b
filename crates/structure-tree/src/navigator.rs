//! The navigator: expansion drives assembly, selection drives detail dispatch

use campus_api::Backend;
use log::{debug, info};
use std::sync::Arc;

use crate::assembler::TreeAssembler;
use crate::cache::ResolutionCache;
use crate::config::NavigatorConfig;
use crate::dispatcher::{DetailDispatcher, DetailView};
use crate::forest::Forest;
use crate::node::{NodeId, StructureNode};
use crate::resolver::AcademicResolver;
use crate::state::ExpansionState;

/// Lazily materialized academic structure with expansion and selection
///
/// Node lookups go through the last assembled forest, so a node can only be
/// toggled or selected once it is visible.
pub struct StructureNavigator<B> {
    assembler: TreeAssembler<AcademicResolver<Arc<B>>>,
    dispatcher: DetailDispatcher<Arc<B>>,
    state: ExpansionState,
    roots: Vec<StructureNode>,
    forest: Forest,
}

impl<B: Backend> StructureNavigator<B> {
    pub fn new(backend: Arc<B>, config: &NavigatorConfig) -> Self {
        Self::with_cache(backend, config.build_cache())
    }

    /// Create a navigator around an existing cache
    pub fn with_cache(backend: Arc<B>, cache: Arc<ResolutionCache>) -> Self {
        Self {
            assembler: TreeAssembler::new(AcademicResolver::new(backend.clone()), cache),
            dispatcher: DetailDispatcher::new(backend),
            state: ExpansionState::new(),
            roots: Vec::new(),
            forest: Forest::default(),
        }
    }

    /// Fetch the top-level years and assemble the forest
    pub async fn load_roots(&mut self) -> &Forest {
        self.roots = self.assembler.load_roots().await;
        info!("loaded {} top-level nodes", self.roots.len());
        self.render().await
    }

    /// Re-assemble the forest from the current expansion state
    pub async fn render(&mut self) -> &Forest {
        self.forest = self.assembler.assemble(&self.roots, &self.state).await;
        &self.forest
    }

    /// Flip expansion of a visible node; call [`render`](Self::render) to see the result
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        match self.forest.find(id) {
            Some(row) => self.state.toggle(&row.node),
            None => {
                debug!("toggle on unknown node {}", id);
                false
            }
        }
    }

    /// Toggle a node and re-assemble in one step
    pub async fn toggle_and_render(&mut self, id: &NodeId) -> &Forest {
        self.toggle(id);
        self.render().await
    }

    /// Select a visible node and build its detail view
    pub async fn select(&mut self, id: &NodeId) -> Option<DetailView> {
        let node = self.forest.find(id)?.node.clone();
        self.state.select(node.id.clone());
        Some(self.dispatcher.dispatch(&node).await)
    }

    /// Drop cached resolutions for a node and everything below it
    pub fn invalidate(&self, id: &NodeId) -> usize {
        self.assembler.cache().invalidate_subtree(id)
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ExpansionState {
        &mut self.state
    }

    pub fn cache(&self) -> &ResolutionCache {
        self.assembler.cache()
    }
}
