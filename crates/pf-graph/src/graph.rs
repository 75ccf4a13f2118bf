//! The graph: apply orchestration over the hierarchy.

use std::fmt;
use std::sync::Arc;

use pf_core::{ArtifactId, NodeId};
use tracing::{debug, warn};

use crate::artifact::{Artifact, ArtifactSet};
use crate::builder::GraphBuilder;
use crate::error::{GraphError, GraphResult};
use crate::hierarchy::Hierarchy;
use crate::names::NameAllocator;
use crate::node::Node;
use crate::options::{GraphOptions, StableNamePolicy};
use crate::transform::{Executor, Transform, TransformKind, same_transform};
use crate::validate;

/// A graph of transform applications under construction.
///
/// Built by calling [`Graph::apply`], consumed once by [`Graph::traverse`]. Each instance
/// owns all of its nodes and artifacts; handles from one graph mean nothing in another.
pub struct Graph {
    pub(crate) options: GraphOptions,
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) hierarchy: Hierarchy,
    pub(crate) names: NameAllocator,
    pub(crate) artifacts: Vec<Artifact>,
    pub(crate) traversed: bool,
}

impl Default for Graph {
    fn default() -> Self {
        GraphBuilder::new().build()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("nodes", &self.hierarchy.nodes().len())
            .field("artifacts", &self.artifacts.len())
            .field("traversed", &self.traversed)
            .finish()
    }
}

impl Graph {
    /// Create an empty graph with the given options and the direct executor.
    pub fn new(options: GraphOptions) -> Self {
        GraphBuilder::new().options(options).build()
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn stable_name_policy(&self) -> StableNamePolicy {
        self.options.stable_unique_names
    }

    /// Input placeholder for root transforms.
    pub fn begin(&self) -> ArtifactSet {
        ArtifactSet::empty()
    }

    /// Apply a root transform under its default name.
    pub fn apply_root(&mut self, transform: Arc<dyn Transform>) -> GraphResult<ArtifactSet> {
        self.apply(None, &ArtifactSet::empty(), transform)
    }

    pub fn apply_named(
        &mut self,
        name: &str,
        input: &ArtifactSet,
        transform: Arc<dyn Transform>,
    ) -> GraphResult<ArtifactSet> {
        self.apply(Some(name), input, transform)
    }

    /// Apply `transform` to `input` inside the current scope and return its output.
    ///
    /// `name` defaults to the transform's own default name. The new node is open as the
    /// current scope while the transform is validated and expanded, and is closed again
    /// on every exit path.
    pub fn apply(
        &mut self,
        name: Option<&str>,
        input: &ArtifactSet,
        transform: Arc<dyn Transform>,
    ) -> GraphResult<ArtifactSet> {
        let local_name = match name {
            Some(name) => name.to_owned(),
            None => transform.default_name(),
        };
        self.ensure_open(|| format!("apply {local_name}"))?;
        self.check_artifacts(input)?;

        let parent = self.hierarchy.current_id();
        let prefix = self.hierarchy.current_scope().full_name().to_owned();
        let allocated = self.names.allocate(&prefix, &local_name);
        if allocated.disambiguated {
            self.enforce_stable_name(&allocated.full_name)?;
        }

        let node = self
            .hierarchy
            .add_node(parent, allocated.full_name, Arc::clone(&transform))?;
        self.hierarchy.record_inputs(node, input.clone())?;
        debug!(
            node = %self.hierarchy.describe(Some(node)),
            inputs = input.len(),
            "adding transform"
        );

        self.hierarchy.push_scope(node)?;
        let result = self.apply_in_scope(node, input, &transform);
        let closed = self.hierarchy.pop_scope();

        let output = result?;
        let closed = closed?;
        if closed != node {
            return Err(GraphError::ScopeMismatch {
                expected: self.hierarchy.describe(Some(node)),
                actual: self.hierarchy.describe(Some(closed)),
            });
        }
        Ok(output)
    }

    /// Validate, expand, attribute and verify. Runs with `node` as the current scope.
    fn apply_in_scope(
        &mut self,
        node: NodeId,
        input: &ArtifactSet,
        transform: &Arc<dyn Transform>,
    ) -> GraphResult<ArtifactSet> {
        transform.validate(input).map_err(GraphError::user)?;

        let executor = Arc::clone(&self.executor);
        let output = executor.apply(self, transform, input)?;
        self.check_artifacts(&output)?;

        for artifact in &output {
            self.hierarchy.record_output(node, artifact)?;
        }
        self.attribute_outputs(node, &output)?;
        validate::verify_output_attribution(self, node, &output)?;
        Ok(output)
    }

    fn enforce_stable_name(&self, full_name: &str) -> GraphResult<()> {
        match self.options.stable_unique_names {
            StableNamePolicy::Ignore => Ok(()),
            StableNamePolicy::Warn => {
                warn!(
                    "Transform {} does not have a stable unique name. \
                     This will prevent reloading of pipelines.",
                    full_name
                );
                Ok(())
            }
            StableNamePolicy::Fail => Err(GraphError::UnstableName {
                full_name: full_name.to_owned(),
            }),
        }
    }

    /// Attribute every not-yet-attributed output to `node`, naming unnamed ones after it.
    fn attribute_outputs(&mut self, node: NodeId, output: &ArtifactSet) -> GraphResult<()> {
        let many = output.len() > 1;
        for (i, id) in output.iter().enumerate() {
            if self.artifact(id)?.producer.is_some() {
                continue;
            }
            let full_name = self.hierarchy.node(node)?.full_name().to_owned();
            let hierarchy = &self.hierarchy;
            let artifact = &mut self.artifacts[id.slot()];
            artifact.set_producer(node, |n| hierarchy.describe(Some(n)))?;
            if artifact.name.is_none() {
                artifact.name = Some(if many {
                    format!("{full_name}.out{i}")
                } else {
                    format!("{full_name}.out")
                });
            }
        }
        Ok(())
    }

    fn ensure_open(&self, action: impl FnOnce() -> String) -> GraphResult<()> {
        if self.traversed {
            return Err(GraphError::Frozen { action: action() });
        }
        Ok(())
    }

    fn check_artifacts(&self, set: &ArtifactSet) -> GraphResult<()> {
        for id in set {
            self.artifact(id)?;
        }
        Ok(())
    }

    /// Register a new, unattributed artifact with this graph.
    pub fn create_artifact(&mut self) -> GraphResult<ArtifactId> {
        self.push_artifact(None)
    }

    pub fn create_named_artifact(&mut self, name: impl Into<String>) -> GraphResult<ArtifactId> {
        self.push_artifact(Some(name.into()))
    }

    fn push_artifact(&mut self, name: Option<String>) -> GraphResult<ArtifactId> {
        self.ensure_open(|| "create an artifact".to_owned())?;
        let id = ArtifactId::from_index(self.artifacts.len() as u32);
        debug!(artifact = %id, name = name.as_deref().unwrap_or(""), "adding artifact");
        self.artifacts.push(Artifact::new(id, name));
        Ok(id)
    }

    /// Attribute `artifact` to the primitive application `node`.
    ///
    /// Repeating the same attribution is a no-op; a different producer is an error.
    /// Composites and the root placeholder never produce artifacts.
    pub fn record_producer(&mut self, artifact: ArtifactId, node: NodeId) -> GraphResult<()> {
        self.ensure_open(|| format!("attribute {artifact}"))?;
        let target = self.hierarchy.node(node)?;
        self.artifact(artifact)?;
        if target.kind() != Some(TransformKind::Primitive) {
            return Err(GraphError::ProducerNotPrimitive {
                artifact: self.artifacts[artifact.slot()].display_name(),
                node: self.hierarchy.describe(Some(node)),
            });
        }
        let hierarchy = &self.hierarchy;
        self.artifacts[artifact.slot()].set_producer(node, |n| hierarchy.describe(Some(n)))
    }

    pub fn artifact(&self, id: ArtifactId) -> GraphResult<&Artifact> {
        self.artifacts
            .get(id.slot())
            .ok_or_else(|| GraphError::UnknownArtifact {
                artifact: id.to_string(),
            })
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// The node that produced `artifact`, if it has one.
    pub fn producer_of(&self, artifact: ArtifactId) -> GraphResult<Option<&Node>> {
        match self.artifact(artifact)?.producer {
            Some(node) => Ok(Some(self.hierarchy.node(node)?)),
            None => Ok(None),
        }
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.hierarchy.node(id)
    }

    /// All applications in creation order, excluding the root placeholder.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.hierarchy.nodes().iter().skip(1)
    }

    pub fn root(&self) -> &Node {
        self.hierarchy.root()
    }

    pub fn node_by_name(&self, full_name: &str) -> Option<&Node> {
        let id = self.hierarchy.by_name(full_name)?;
        self.hierarchy.node(id).ok()
    }

    /// The node currently open for construction.
    pub fn current_scope(&self) -> &Node {
        self.hierarchy.current_scope()
    }

    /// Full name of the single application of `transform`.
    ///
    /// Fails if the transform was never applied or was applied more than once.
    pub fn full_name_of(&self, transform: &Arc<dyn Transform>) -> GraphResult<&str> {
        let mut uses = self.nodes().filter(|node| {
            node.transform()
                .is_some_and(|applied| same_transform(applied, transform))
        });
        let first = uses.next().ok_or_else(|| GraphError::UnknownTransform {
            transform: transform.default_name(),
        })?;
        let extra = uses.count();
        if extra > 0 {
            return Err(GraphError::TransformReused {
                transform: transform.default_name(),
                count: extra + 1,
            });
        }
        Ok(first.full_name())
    }

    /// True once traversal has started; no further applications are accepted.
    pub fn is_frozen(&self) -> bool {
        self.traversed
    }
}
