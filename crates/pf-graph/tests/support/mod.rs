//! Transforms shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use pf_graph::{
    Artifact, ArtifactId, ArtifactSet, BoxError, Graph, GraphResult, GraphVisitor, Node,
    NodeId, Transform, TransformKind,
};

/// Root source producing one artifact.
#[derive(Debug)]
pub struct Read;

impl Transform for Read {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

/// Primitive mapping its input to one new artifact.
#[derive(Debug)]
pub struct Map;

impl Transform for Map {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn validate(&self, input: &ArtifactSet) -> Result<(), BoxError> {
        if input.is_empty() {
            return Err("Map needs an input".into());
        }
        Ok(())
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

#[derive(Debug)]
pub struct ExtractWords;

impl Transform for ExtractWords {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

#[derive(Debug)]
pub struct Sum;

impl Transform for Sum {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

/// ExtractWords followed by Sum.
#[derive(Debug)]
pub struct Count;

impl Transform for Count {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        let words = graph.apply(None, input, Arc::new(ExtractWords))?;
        graph.apply(None, &words, Arc::new(Sum))
    }
}

/// Outer composite wrapping Count.
#[derive(Debug)]
pub struct Pipeline;

impl Transform for Pipeline {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        graph.apply(None, input, Arc::new(Count))
    }
}

/// `steps` Maps applied one after another.
#[derive(Debug)]
pub struct Chain {
    pub steps: usize,
}

impl Transform for Chain {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        let mut current = input.clone();
        for _ in 0..self.steps {
            current = graph.apply(None, &current, Arc::new(Map))?;
        }
        Ok(current)
    }
}

/// Recursive composite: a Chain, then itself one level shallower.
#[derive(Debug)]
pub struct Nest {
    pub depth: usize,
}

impl Transform for Nest {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        let chained = graph.apply(None, input, Arc::new(Chain { steps: 1 }))?;
        if self.depth == 0 {
            return Ok(chained);
        }
        graph.apply(None, &chained, Arc::new(Nest { depth: self.depth - 1 }))
    }
}

/// Composite that hands back a fresh artifact of its own instead of a child's output.
#[derive(Debug, Default)]
pub struct SelfAuthoring;

impl Transform for SelfAuthoring {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        graph.apply(None, input, Arc::new(ExtractWords))?;
        Ok(graph.create_artifact()?.into())
    }
}

/// Childless composite that pins a fresh artifact on an earlier, unrelated node.
#[derive(Debug)]
pub struct Borrow(pub NodeId);

impl Transform for Borrow {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        let out = graph.create_artifact()?;
        graph.record_producer(out, self.0)?;
        Ok(out.into())
    }
}

/// Composite nesting another composite.
#[derive(Debug)]
pub struct Wrap<T: Transform + Default + 'static>(pub std::marker::PhantomData<T>);

impl<T: Transform + Default + 'static> Transform for Wrap<T> {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        graph.apply(None, input, Arc::new(T::default()))
    }
}

/// Visitor recording everything and checking the ordering guarantees as it goes.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<String>,
    pub artifact_visits: HashMap<ArtifactId, usize>,
    pub visited_nodes: Vec<NodeId>,
    pub depth: usize,
    pub max_depth: usize,
    pub producers: HashMap<ArtifactId, Option<NodeId>>,
}

impl GraphVisitor for Recorder {
    fn enter_composite(&mut self, node: &Node) {
        self.events.push(format!("enter {}", node.full_name()));
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn leave_composite(&mut self, node: &Node) {
        self.events.push(format!("leave {}", node.full_name()));
        self.depth -= 1;
        self.visited_nodes.push(node.id);
    }

    fn visit_primitive(&mut self, node: &Node) {
        for input in node.inputs() {
            assert!(
                self.artifact_visits.contains_key(&input),
                "input of {} visited after the node",
                node.full_name()
            );
        }
        self.events.push(format!("visit {}", node.full_name()));
        self.visited_nodes.push(node.id);
    }

    fn visit_artifact(&mut self, artifact: &Artifact, producer: Option<&Node>) {
        if let Some(p) = producer {
            assert!(
                self.visited_nodes.contains(&p.id),
                "producer {} not visited before its artifact",
                p.full_name()
            );
        }
        *self.artifact_visits.entry(artifact.id).or_default() += 1;
        self.producers.insert(artifact.id, producer.map(|p| p.id));
        self.events.push(format!("artifact {}", artifact.display_name()));
    }
}
