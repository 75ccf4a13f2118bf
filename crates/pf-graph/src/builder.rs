//! Graph configuration builder.

use std::sync::Arc;

use crate::graph::Graph;
use crate::hierarchy::Hierarchy;
use crate::names::NameAllocator;
use crate::options::{GraphOptions, StableNamePolicy};
use crate::transform::{DirectExecutor, Executor};

/// Builder for configuring a graph before any transform is applied.
///
/// Use `options`/`stable_unique_names` and `executor` to configure it,
/// then call `build()` to get an empty `Graph`.
#[derive(Default)]
pub struct GraphBuilder {
    options: GraphOptions,
    executor: Option<Arc<dyn Executor>>,
}

impl GraphBuilder {
    /// Create a builder with default options and the direct executor.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: GraphOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stable_unique_names(mut self, policy: StableNamePolicy) -> Self {
        self.options.stable_unique_names = policy;
        self
    }

    /// Execution backend whose apply hook runs for every application.
    pub fn executor(self, executor: impl Executor + 'static) -> Self {
        self.shared_executor(Arc::new(executor))
    }

    pub fn shared_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> Graph {
        tracing::debug!(options = ?self.options, "creating graph");
        Graph {
            options: self.options,
            executor: self.executor.unwrap_or_else(|| Arc::new(DirectExecutor)),
            hierarchy: Hierarchy::new(),
            names: NameAllocator::new(),
            artifacts: Vec::new(),
            traversed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::artifact::ArtifactSet;
    use crate::error::GraphResult;
    use crate::transform::{Transform, TransformKind};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Executor for Counting {
        fn apply(
            &self,
            graph: &mut Graph,
            transform: &Arc<dyn Transform>,
            input: &ArtifactSet,
        ) -> GraphResult<ArtifactSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            transform.expand(graph, input)
        }
    }

    #[derive(Debug)]
    struct Read;

    impl Transform for Read {
        fn kind(&self) -> TransformKind {
            TransformKind::Primitive
        }

        fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
            Ok(graph.create_artifact()?.into())
        }
    }

    #[test]
    fn builder_defaults() {
        let graph = GraphBuilder::new().build();
        assert_eq!(graph.stable_name_policy(), StableNamePolicy::Warn);
        assert_eq!(graph.nodes().count(), 0);
        assert!(!graph.is_frozen());
    }

    #[test]
    fn builder_sets_policy() {
        let graph = GraphBuilder::new()
            .stable_unique_names(StableNamePolicy::Fail)
            .build();
        assert_eq!(graph.options().stable_unique_names, StableNamePolicy::Fail);
    }

    #[test]
    fn custom_executor_sees_every_apply() {
        let executor = Arc::new(Counting::default());
        let mut graph = GraphBuilder::new()
            .shared_executor(executor.clone())
            .build();
        graph.apply_root(Arc::new(Read)).unwrap();
        graph.apply_root(Arc::new(Read)).unwrap();
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
    }
}
