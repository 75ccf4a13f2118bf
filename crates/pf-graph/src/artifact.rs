//! Data artifacts and ordered artifact sets.

use pf_core::{ArtifactId, NodeId};

use crate::error::{GraphError, GraphResult};

/// A data-producing value owned by one graph instance.
///
/// An artifact without a producer is a root input supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub(crate) name: Option<String>,
    pub(crate) producer: Option<NodeId>,
}

impl Artifact {
    pub(crate) fn new(id: ArtifactId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            producer: None,
        }
    }

    /// The node that produced this artifact, if any.
    pub fn producer(&self) -> Option<NodeId> {
        self.producer
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for messages; unnamed artifacts fall back to their handle.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id.index()),
        }
    }

    /// Attribute this artifact to `node`.
    ///
    /// Setting the same producer again is a no-op; setting a different one fails.
    /// `describe` renders node handles for the error message.
    pub(crate) fn set_producer(
        &mut self,
        node: NodeId,
        describe: impl Fn(NodeId) -> String,
    ) -> GraphResult<()> {
        match self.producer {
            None => {
                self.producer = Some(node);
                Ok(())
            }
            Some(existing) if existing == node => Ok(()),
            Some(existing) => Err(GraphError::ArtifactReattributed {
                artifact: self.display_name(),
                existing: describe(existing),
                attempted: describe(node),
            }),
        }
    }
}

/// An ordered, duplicate-free set of artifact handles.
///
/// Used both as the input of an apply-call and as its output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArtifactSet {
    ids: Vec<ArtifactId>,
}

impl ArtifactSet {
    /// The empty set: input of root transforms.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(id: ArtifactId) -> Self {
        Self { ids: vec![id] }
    }

    /// Append `id` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, id: ArtifactId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: ArtifactId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ArtifactId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ArtifactId] {
        &self.ids
    }

    /// The only element, if the set has exactly one.
    pub fn only(&self) -> Option<ArtifactId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}

impl FromIterator<ArtifactId> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = ArtifactId>>(iter: I) -> Self {
        let mut set = ArtifactSet::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl From<ArtifactId> for ArtifactSet {
    fn from(id: ArtifactId) -> Self {
        ArtifactSet::single(id)
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = ArtifactId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ArtifactId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
