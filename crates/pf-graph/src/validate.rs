//! Output-attribution checks run as each application closes.

use pf_core::NodeId;

use crate::artifact::ArtifactSet;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::transform::TransformKind;

/// Verify that `outputs` are authored correctly by `node_id`.
///
/// A primitive must have produced every output itself and must not have nested
/// applications. A composite must not be the producer of any of its outputs; every one of
/// them must be attributed to a primitive node.
pub(crate) fn verify_output_attribution(
    graph: &Graph,
    node_id: NodeId,
    outputs: &ArtifactSet,
) -> GraphResult<()> {
    let node = graph.node(node_id)?;
    match node.kind() {
        Some(TransformKind::Primitive) => {
            if !node.children().is_empty() {
                return Err(GraphError::PrimitiveWithChildren {
                    node: node.full_name().to_owned(),
                    transform: node.transform_name(),
                });
            }
            for id in outputs {
                let artifact = graph.artifact(id)?;
                if artifact.producer() != Some(node_id) {
                    return Err(GraphError::PrimitiveOutputMismatch {
                        node: node.full_name().to_owned(),
                        transform: node.transform_name(),
                        artifact: artifact.display_name(),
                        producer: graph.hierarchy.describe(artifact.producer()),
                    });
                }
            }
        }
        Some(TransformKind::Composite) => {
            for id in outputs {
                let artifact = graph.artifact(id)?;
                if artifact.producer() == Some(node_id) {
                    return Err(GraphError::CompositeSelfProduced {
                        node: node.full_name().to_owned(),
                        transform: node.transform_name(),
                        artifact: artifact.display_name(),
                    });
                }
                let primitive = match artifact.producer() {
                    Some(producer) => {
                        graph.node(producer)?.kind() == Some(TransformKind::Primitive)
                    }
                    None => false,
                };
                if !primitive {
                    return Err(GraphError::CompositeOutputNotPrimitive {
                        node: node.full_name().to_owned(),
                        transform: node.transform_name(),
                        artifact: artifact.display_name(),
                        producer: graph.hierarchy.describe(artifact.producer()),
                    });
                }
            }
        }
        // The root placeholder never closes.
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::transform::Transform;

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

    /// Primitive that hands back its input instead of producing anything.
    #[derive(Debug)]
    struct PassThrough;

    impl Transform for PassThrough {
        fn kind(&self) -> TransformKind {
            TransformKind::Primitive
        }

        fn expand(&self, _graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet> {
            Ok(input.clone())
        }
    }

    /// Declared primitive, but expands like a composite.
    #[derive(Debug)]
    struct SecretComposite;

    impl Transform for SecretComposite {
        fn kind(&self) -> TransformKind {
            TransformKind::Primitive
        }

        fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
            graph.apply_root(Arc::new(Read))
        }
    }

    #[test]
    fn primitive_passing_through_foreign_output_fails() {
        let mut graph = Graph::default();
        let words = graph.apply_root(Arc::new(Read)).unwrap();
        let err = graph.apply(None, &words, Arc::new(PassThrough)).unwrap_err();
        match err {
            GraphError::PrimitiveOutputMismatch { node, producer, .. } => {
                assert_eq!(node, "PassThrough");
                assert!(producer.starts_with("Read"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn primitive_with_children_fails() {
        let mut graph = Graph::default();
        let err = graph.apply_root(Arc::new(SecretComposite)).unwrap_err();
        assert!(matches!(err, GraphError::PrimitiveWithChildren { .. }));
        assert!(graph.current_scope().is_root());
    }

    #[test]
    fn primitive_claiming_root_input_becomes_its_producer() {
        let mut graph = Graph::default();
        let raw: ArtifactSet = graph.create_named_artifact("raw").unwrap().into();
        graph.apply(None, &raw, Arc::new(PassThrough)).unwrap();
        let node = graph.node_by_name("PassThrough").unwrap();
        let id = raw.only().unwrap();
        assert_eq!(graph.artifact(id).unwrap().producer(), Some(node.id));
        assert_eq!(graph.artifact(id).unwrap().name(), Some("raw"));
    }
}
