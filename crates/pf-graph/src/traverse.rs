//! Forward-topological traversal of a finished graph.

use pf_core::NodeId;
use tracing::debug;

use crate::artifact::Artifact;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::node::Node;

/// Callbacks invoked by [`Graph::traverse`].
///
/// Composite nodes are bracketed by `enter_composite`/`leave_composite` around their
/// descendants. Artifacts are reported once each, inputs before the node that consumes
/// them, with their producing node (`None` for caller-supplied root inputs).
pub trait GraphVisitor {
    fn enter_composite(&mut self, _node: &Node) {}

    fn leave_composite(&mut self, _node: &Node) {}

    fn visit_primitive(&mut self, _node: &Node) {}

    fn visit_artifact(&mut self, _artifact: &Artifact, _producer: Option<&Node>) {}
}

impl Graph {
    /// Walk the graph once in forward topological order.
    ///
    /// Freezes the graph: later calls to `apply` or `traverse` fail. After the walk every
    /// artifact registered with the graph must have been visited exactly once.
    pub fn traverse<V: GraphVisitor + ?Sized>(&mut self, visitor: &mut V) -> GraphResult<()> {
        if self.traversed {
            return Err(GraphError::AlreadyTraversed);
        }
        self.traversed = true;
        debug!(
            nodes = self.hierarchy.nodes().len() - 1,
            artifacts = self.artifacts.len(),
            "traversing graph"
        );

        let graph: &Graph = self;
        let mut walk = Walk {
            graph,
            visited: vec![false; graph.artifacts.len()],
            finished: vec![false; graph.hierarchy.nodes().len()],
            count: 0,
        };
        for &child in graph.root().children() {
            walk.node(child, &mut *visitor)?;
        }

        if walk.count != graph.artifacts.len() {
            let first_missing = graph
                .artifacts
                .iter()
                .find(|a| !walk.visited[a.id.slot()])
                .map(Artifact::display_name)
                .unwrap_or_default();
            return Err(GraphError::IncompleteTraversal {
                visited: walk.count,
                total: graph.artifacts.len(),
                first_missing,
            });
        }
        Ok(())
    }
}

struct Walk<'g> {
    graph: &'g Graph,
    visited: Vec<bool>,
    /// Nodes whose subtree has been fully visited.
    finished: Vec<bool>,
    count: usize,
}

impl<'g> Walk<'g> {
    fn node<V: GraphVisitor + ?Sized>(&mut self, id: NodeId, visitor: &mut V) -> GraphResult<()> {
        let graph = self.graph;
        let node = graph.node(id)?;

        for input in node.inputs() {
            let artifact = graph.artifact(input)?;
            if let Some(producer) = artifact.producer() {
                if !self.finished[producer.slot()] {
                    return Err(GraphError::ConsumedBeforeProduced {
                        artifact: artifact.display_name(),
                        consumer: node.full_name().to_owned(),
                        producer: graph.hierarchy.describe(Some(producer)),
                    });
                }
            }
            self.artifact(artifact, &mut *visitor)?;
        }

        if node.is_composite() {
            visitor.enter_composite(node);
            for &child in node.children() {
                self.node(child, &mut *visitor)?;
            }
            visitor.leave_composite(node);
        } else {
            visitor.visit_primitive(node);
        }
        self.finished[id.slot()] = true;

        for output in node.outputs() {
            let artifact = graph.artifact(output)?;
            self.artifact(artifact, &mut *visitor)?;
        }
        Ok(())
    }

    fn artifact<V: GraphVisitor + ?Sized>(
        &mut self,
        artifact: &'g Artifact,
        visitor: &mut V,
    ) -> GraphResult<()> {
        let seen = &mut self.visited[artifact.id.slot()];
        if *seen {
            return Ok(());
        }
        *seen = true;
        self.count += 1;
        let producer = match artifact.producer() {
            Some(id) => Some(self.graph.node(id)?),
            None => None,
        };
        visitor.visit_artifact(artifact, producer);
        Ok(())
    }
}
