//! Transform applications: the nodes of the hierarchy.

use std::sync::Arc;

use pf_core::NodeId;

use crate::artifact::ArtifactSet;
use crate::transform::{Transform, TransformKind};

/// One application of a transform.
///
/// The root placeholder (no transform, empty name) stands for "nothing applied yet" and
/// is the parent of every top-level application.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub(crate) full_name: String,
    pub(crate) transform: Option<Arc<dyn Transform>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) inputs: ArtifactSet,
    pub(crate) inputs_recorded: bool,
    pub(crate) outputs: ArtifactSet,
}

impl Node {
    pub(crate) fn root(id: NodeId) -> Self {
        Self {
            id,
            full_name: String::new(),
            transform: None,
            parent: None,
            children: Vec::new(),
            inputs: ArtifactSet::empty(),
            inputs_recorded: true,
            outputs: ArtifactSet::empty(),
        }
    }

    pub(crate) fn child(
        id: NodeId,
        parent: NodeId,
        full_name: String,
        transform: Arc<dyn Transform>,
    ) -> Self {
        Self {
            id,
            full_name,
            transform: Some(transform),
            parent: Some(parent),
            children: Vec::new(),
            inputs: ArtifactSet::empty(),
            inputs_recorded: false,
            outputs: ArtifactSet::empty(),
        }
    }

    /// `/`-delimited path, unique within the graph. Empty for the root placeholder.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Last path segment of the full name.
    pub fn local_name(&self) -> &str {
        self.full_name.rsplit('/').next().unwrap_or_default()
    }

    pub fn transform(&self) -> Option<&Arc<dyn Transform>> {
        self.transform.as_ref()
    }

    /// Name of the wrapped transform, for diagnostics.
    pub fn transform_name(&self) -> String {
        match &self.transform {
            Some(transform) => transform.default_name(),
            None => "<root>".to_owned(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn inputs(&self) -> &ArtifactSet {
        &self.inputs
    }

    pub fn outputs(&self) -> &ArtifactSet {
        &self.outputs
    }

    pub fn is_root(&self) -> bool {
        self.transform.is_none()
    }

    /// The declared kind; `None` for the root placeholder.
    pub fn kind(&self) -> Option<TransformKind> {
        self.transform.as_ref().map(|t| t.kind())
    }

    /// Composite nodes are traversed through enter/leave hooks. The root counts as one.
    pub fn is_composite(&self) -> bool {
        !matches!(self.kind(), Some(TransformKind::Primitive))
    }
}
