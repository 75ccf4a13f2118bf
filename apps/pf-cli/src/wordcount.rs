//! Word-count demo pipeline used by the CLI.

use std::sync::Arc;

use pf_core::BoxError;
use pf_graph::{ArtifactSet, Graph, GraphResult, Transform, TransformKind};

/// Root source: lines of one input file.
#[derive(Debug)]
pub struct ReadLines {
    pub path: String,
}

impl Transform for ReadLines {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn validate(&self, _input: &ArtifactSet) -> Result<(), BoxError> {
        if self.path.is_empty() {
            return Err("ReadLines needs a path".into());
        }
        Ok(())
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_named_artifact(format!("lines:{}", self.path))?.into())
    }
}

/// Merge several inputs into one.
#[derive(Debug)]
pub struct Flatten;

impl Transform for Flatten {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
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
pub struct SumPerWord;

impl Transform for SumPerWord {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

/// ExtractWords then SumPerWord.
#[derive(Debug)]
pub struct CountWords;

impl Transform for CountWords {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        let words = graph.apply(None, input, Arc::new(ExtractWords))?;
        graph.apply(None, &words, Arc::new(SumPerWord))
    }
}

#[derive(Debug)]
pub struct FormatCounts;

impl Transform for FormatCounts {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(graph.create_artifact()?.into())
    }
}

/// Sink: consumes its input and produces nothing.
#[derive(Debug)]
pub struct WriteCounts;

impl Transform for WriteCounts {
    fn kind(&self) -> TransformKind {
        TransformKind::Primitive
    }

    fn expand(&self, _graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
        Ok(ArtifactSet::empty())
    }
}

/// Apply the full demo pipeline: `reads` sources, merged, counted, formatted and written.
pub fn build(graph: &mut Graph, reads: usize) -> GraphResult<()> {
    let mut sources = ArtifactSet::empty();
    for i in 0..reads.max(1) {
        let lines = graph.apply_root(Arc::new(ReadLines {
            path: format!("input-{i}.txt"),
        }))?;
        for id in &lines {
            sources.insert(id);
        }
    }
    let merged = if sources.len() > 1 {
        graph.apply(None, &sources, Arc::new(Flatten))?
    } else {
        sources
    };
    let counts = graph.apply_named("Count", &merged, Arc::new(CountWords))?;
    let formatted = graph.apply(None, &counts, Arc::new(FormatCounts))?;
    graph.apply(None, &formatted, Arc::new(WriteCounts))?;
    Ok(())
}
