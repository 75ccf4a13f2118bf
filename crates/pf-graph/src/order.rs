//! Flat execution order recorded from a traversal.
//!
//! Provides the sequence of primitive applications and artifacts in the order the
//! traversal reported them, plus O(1) lookup from a handle to its position.

use pf_core::{ArtifactId, NodeId};

use crate::artifact::Artifact;
use crate::node::Node;
use crate::traverse::GraphVisitor;

/// One event of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnterComposite(NodeId),
    LeaveComposite(NodeId),
    Primitive(NodeId),
    Artifact(ArtifactId),
}

/// Visitor that records a traversal for executors wanting a flat schedule.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOrder {
    steps: Vec<Step>,

    /// Primitive nodes in visit order (position -> NodeId).
    primitives: Vec<NodeId>,

    /// Artifacts in visit order (position -> ArtifactId).
    artifacts: Vec<ArtifactId>,

    /// Reverse lookup: NodeId -> position in `primitives`.
    /// Sized to max(NodeId.index) + 1; None if not a visited primitive.
    node_to_pos: Vec<Option<usize>>,

    /// Reverse lookup: ArtifactId -> position in `artifacts`.
    artifact_to_pos: Vec<Option<usize>>,
}

impl ExecutionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn primitives(&self) -> &[NodeId] {
        &self.primitives
    }

    pub fn artifacts(&self) -> &[ArtifactId] {
        &self.artifacts
    }

    /// Position of a primitive node among visited primitives.
    pub fn primitive_position(&self, id: NodeId) -> Option<usize> {
        self.node_to_pos.get(id.slot()).copied().flatten()
    }

    /// Position of an artifact among visited artifacts.
    pub fn artifact_position(&self, id: ArtifactId) -> Option<usize> {
        self.artifact_to_pos.get(id.slot()).copied().flatten()
    }

    /// Position of an event in [`ExecutionOrder::steps`].
    pub fn step_position(&self, step: Step) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }
}

fn record(slots: &mut Vec<Option<usize>>, slot: usize, pos: usize) {
    if slots.len() <= slot {
        slots.resize(slot + 1, None);
    }
    slots[slot] = Some(pos);
}

impl GraphVisitor for ExecutionOrder {
    fn enter_composite(&mut self, node: &Node) {
        self.steps.push(Step::EnterComposite(node.id));
    }

    fn leave_composite(&mut self, node: &Node) {
        self.steps.push(Step::LeaveComposite(node.id));
    }

    fn visit_primitive(&mut self, node: &Node) {
        self.steps.push(Step::Primitive(node.id));
        record(&mut self.node_to_pos, node.id.slot(), self.primitives.len());
        self.primitives.push(node.id);
    }

    fn visit_artifact(&mut self, artifact: &Artifact, _producer: Option<&Node>) {
        self.steps.push(Step::Artifact(artifact.id));
        record(
            &mut self.artifact_to_pos,
            artifact.id.slot(),
            self.artifacts.len(),
        );
        self.artifacts.push(artifact.id);
    }
}
