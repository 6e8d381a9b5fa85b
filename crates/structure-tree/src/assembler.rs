//! Tree assembly gated by expansion
//!
//! Starting from the top-level nodes, every expanded node gets its children
//! attached (pre-populated, cached, or freshly resolved) and the walk recurses
//! only into children that are themselves expanded. Siblings are assembled
//! concurrently, so their resolutions may finish in any order.

use futures::future::{join_all, BoxFuture, FutureExt};
use log::debug;
use std::sync::Arc;

use crate::cache::ResolutionCache;
use crate::forest::{ChildrenState, Forest, RenderNode};
use crate::node::StructureNode;
use crate::resolver::ChildResolver;
use crate::state::ExpansionState;

/// Builds render forests from a resolver and an injected cache
pub struct TreeAssembler<R> {
    resolver: R,
    cache: Arc<ResolutionCache>,
}

impl<R: ChildResolver> TreeAssembler<R> {
    pub fn new(resolver: R, cache: Arc<ResolutionCache>) -> Self {
        Self { resolver, cache }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolve the synthetic root into the top-level (year) nodes
    pub async fn load_roots(&self) -> Vec<StructureNode> {
        self.children_of(&StructureNode::root()).await
    }

    /// Children of `node`: pre-populated first, then the cache, then the resolver
    ///
    /// Only complete resolutions are cached, so a branch whose fetch failed
    /// is retried the next time it is expanded.
    pub async fn children_of(&self, node: &StructureNode) -> Vec<StructureNode> {
        if let Some(children) = &node.children {
            return children.clone();
        }

        if let Some(children) = self.cache.get(&node.id) {
            return children;
        }

        let resolution = self.resolver.resolve(node).await;
        if resolution.complete {
            self.cache
                .put(node.id.clone(), resolution.children.clone());
        } else {
            debug!("not caching incomplete resolution of {}", node.id);
        }
        resolution.children
    }

    /// Assemble the forest for `roots` under the given expansion state
    pub async fn assemble(&self, roots: &[StructureNode], state: &ExpansionState) -> Forest {
        let nodes = self.assemble_level(roots.to_vec(), state).await;
        Forest::new(nodes)
    }

    fn assemble_level<'a>(
        &'a self,
        nodes: Vec<StructureNode>,
        state: &'a ExpansionState,
    ) -> BoxFuture<'a, Vec<RenderNode>> {
        async move { join_all(nodes.into_iter().map(|node| self.assemble_node(node, state))).await }
            .boxed()
    }

    async fn assemble_node(&self, node: StructureNode, state: &ExpansionState) -> RenderNode {
        let selected = state.is_selected(&node.id);

        if !node.is_expandable() || !state.is_expanded(&node.id) {
            return RenderNode {
                node,
                expanded: false,
                selected,
                children: ChildrenState::NotLoaded,
            };
        }

        let children = self.children_of(&node).await;
        let children = self.assemble_level(children, state).await;

        RenderNode {
            node,
            expanded: true,
            selected,
            children: ChildrenState::Loaded(children),
        }
    }
}
