//! The in-progress tree of applications and its open-scope stack.

use std::collections::HashMap;
use std::sync::Arc;

use pf_core::{ArtifactId, NodeId};
use tracing::trace;

use crate::artifact::ArtifactSet;
use crate::error::{GraphError, GraphResult};
use crate::node::Node;
use crate::transform::Transform;

/// Arena of nodes plus the current scope.
///
/// Nodes are stored in creation order, so a node's index is always greater than its
/// parent's. Index 0 is the root placeholder.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
    current: NodeId,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    pub fn new() -> Self {
        let root = NodeId::from_index(0);
        Self {
            nodes: vec![Node::root(root)],
            by_name: HashMap::new(),
            current: root,
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// The node open for construction; the root placeholder when nothing is in flight.
    pub fn current_scope(&self) -> &Node {
        &self.nodes[self.current.slot()]
    }

    pub fn current_id(&self) -> NodeId {
        self.current
    }

    /// All nodes, root placeholder first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.slot()).ok_or_else(|| GraphError::UnknownNode {
            node: id.to_string(),
        })
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(id.slot())
            .ok_or_else(|| GraphError::UnknownNode {
                node: id.to_string(),
            })
    }

    pub fn by_name(&self, full_name: &str) -> Option<NodeId> {
        self.by_name.get(full_name).copied()
    }

    /// Create a node under `parent` and link it as the parent's last child.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        full_name: String,
        transform: Arc<dyn Transform>,
    ) -> GraphResult<NodeId> {
        self.node(parent)?;
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.by_name.insert(full_name.clone(), id);
        self.nodes.push(Node::child(id, parent, full_name, transform));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Open `node` as the current scope. Its parent must be the current scope.
    pub fn push_scope(&mut self, node: NodeId) -> GraphResult<()> {
        let parent = self.node(node)?.parent;
        if parent != Some(self.current) {
            return Err(GraphError::ScopeMismatch {
                expected: self.describe(parent),
                actual: self.current_scope().full_name.clone(),
            });
        }
        trace!(scope = %self.nodes[node.slot()].full_name, "push scope");
        self.current = node;
        Ok(())
    }

    /// Close the current scope, returning the node that was closed.
    pub fn pop_scope(&mut self) -> GraphResult<NodeId> {
        let closed = self.current;
        let parent = self.current_scope().parent.ok_or(GraphError::ScopeUnderflow)?;
        trace!(scope = %self.current_scope().full_name, "pop scope");
        self.current = parent;
        Ok(closed)
    }

    /// Record `inputs` as the declared inputs of `node`. Allowed once per node.
    pub fn record_inputs(&mut self, node: NodeId, inputs: ArtifactSet) -> GraphResult<()> {
        let node = self.node_mut(node)?;
        if node.inputs_recorded {
            return Err(GraphError::InputsAlreadyRecorded {
                node: node.full_name.clone(),
            });
        }
        node.inputs = inputs;
        node.inputs_recorded = true;
        Ok(())
    }

    /// Record `artifact` as an output of `node`.
    pub fn record_output(&mut self, node: NodeId, artifact: ArtifactId) -> GraphResult<()> {
        self.node_mut(node)?.outputs.insert(artifact);
        Ok(())
    }

    /// Human-readable label of a node handle for error messages.
    pub fn describe(&self, node: Option<NodeId>) -> String {
        match node.and_then(|id| self.nodes.get(id.slot())) {
            Some(n) if n.is_root() => "<root>".to_owned(),
            Some(n) => format!("{} ({})", n.full_name, n.transform_name()),
            None => match node {
                Some(id) => id.to_string(),
                None => "<none>".to_owned(),
            },
        }
    }
}
